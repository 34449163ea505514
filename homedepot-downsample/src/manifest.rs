use std::collections::HashSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::debug;

use homedepot_core::utils::get_dynamic_reader;
use homedepot_core::{HomedepotError, Result};

///
/// One unit of downsampling work: a fragment file and where its downsampled
/// copy goes.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FilePair {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output: Q) -> Self {
        FilePair {
            input: input.into(),
            output: output.into(),
        }
    }
}

///
/// Read a manifest of `<input>\t<output>` lines. Blank lines and lines starting
/// with `#` are skipped.
///
/// Fails if a line does not hold exactly two paths, if two entries share an output,
/// if an output would overwrite one of the inputs, or if the manifest is empty.
///
pub fn read_manifest(path: &Path) -> Result<Vec<FilePair>> {
    let reader = get_dynamic_reader(path)?;
    let display_path = path.display().to_string();

    let mut pairs = Vec::new();
    let mut outputs: HashSet<PathBuf> = HashSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HomedepotError::line_read(path, index + 1, e))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(HomedepotError::input_format(
                &display_path,
                index + 1,
                format!(
                    "expected two columns (input, output), found {}: {:?}",
                    parts.len(),
                    line
                ),
            ));
        }

        let pair = FilePair::new(parts[0], parts[1]);
        if !outputs.insert(pair.output.clone()) {
            return Err(HomedepotError::input_format(
                &display_path,
                index + 1,
                format!("output {:?} is listed more than once", pair.output),
            ));
        }

        debug!("Get input: {:?}; output: {:?}.", pair.input, pair.output);
        pairs.push(pair);
    }

    if pairs.is_empty() {
        return Err(HomedepotError::EmptyInput);
    }

    if let Some(pair) = pairs.iter().find(|p| outputs.contains(&p.input)) {
        return Err(HomedepotError::input_format(
            &display_path,
            0,
            format!("input {:?} is also listed as an output", pair.input),
        ));
    }

    Ok(pairs)
}
