use std::io::BufRead;
use std::path::Path;

use log::debug;

use homedepot_core::models::Fragment;
use homedepot_core::utils::get_dynamic_reader;
use homedepot_core::{HomedepotError, Result};

///
/// Visit every fragment record of a fragment file, together with its 1-based line
/// number, skipping `#` comment lines and blank lines. Malformed rows abort with an
/// `InputFormat` error naming the line, as does any error returned by `visit`.
///
pub fn for_each_fragment<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(usize, Fragment) -> Result<()>,
{
    let reader = get_dynamic_reader(path)?;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HomedepotError::line_read(path, index + 1, e))?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fragment = line.parse::<Fragment>().map_err(|msg| {
            HomedepotError::input_format(path.display().to_string(), index + 1, msg)
        })?;
        visit(index + 1, fragment)?;
    }

    Ok(())
}

pub(crate) fn overflow_error(path: &Path, line: usize) -> HomedepotError {
    HomedepotError::input_format(path.display().to_string(), line, "fragment count overflows")
}

///
/// Count the total number of fragments in a fragment file: the sum of the count
/// column over all records. A total that does not fit in a `u64` is an
/// `InputFormat` error.
///
pub fn count_fragments(path: &Path) -> Result<u64> {
    let mut total: u64 = 0;
    for_each_fragment(path, |line, fragment| {
        total = total
            .checked_add(fragment.count)
            .ok_or_else(|| overflow_error(path, line))?;
        Ok(())
    })?;

    debug!("File {:?} has {} fragments.", path, total);

    Ok(total)
}
