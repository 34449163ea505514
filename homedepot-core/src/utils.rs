use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use tempfile::NamedTempFile;

use crate::errors::{HomedepotError, Result};
use crate::models::ChromSizes;

pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).map_err(|e| HomedepotError::file_access(path, e))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Write a file all-or-nothing. The content is written to a temporary file next to
/// `path` (gzip-compressed when `path` ends in `.gz`) and only renamed onto `path`
/// once `write` has returned successfully and every byte is flushed. On any error the
/// temporary file is removed and `path` is left untouched.
///
/// # Arguments
///
/// - path: final location of the file
/// - write: callback producing the file content
///
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| HomedepotError::file_access(dir, e))?;

    {
        let buf_writer = BufWriter::new(&mut tmp);
        if is_gzipped(path) {
            let mut encoder = GzEncoder::new(buf_writer, Compression::default());
            write(&mut encoder).map_err(|e| e.with_path(path))?;
            let mut buf_writer = encoder
                .finish()
                .map_err(|e| HomedepotError::file_access(path, e))?;
            buf_writer
                .flush()
                .map_err(|e| HomedepotError::file_access(path, e))?;
        } else {
            let mut buf_writer = buf_writer;
            write(&mut buf_writer).map_err(|e| e.with_path(path))?;
            buf_writer
                .flush()
                .map_err(|e| HomedepotError::file_access(path, e))?;
        }
    }

    tmp.persist(path)
        .map_err(|e| HomedepotError::file_access(path, e.error))?;

    Ok(())
}

///
/// Read a chromosome sizes file: two whitespace separated columns, `name` and `size`,
/// no header. Lines starting with `#` and blank lines are skipped.
///
pub fn read_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<ChromSizes> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;
    let display_path = path.display().to_string();

    let mut sizes = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HomedepotError::line_read(path, index + 1, e))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(name), Some(size)) = (parts.next(), parts.next()) else {
            return Err(HomedepotError::input_format(
                &display_path,
                index + 1,
                format!("expected two columns (name, size), found: {:?}", line),
            ));
        };

        let size = size.parse::<i64>().ok().filter(|s| *s >= 0).ok_or_else(|| {
            HomedepotError::input_format(
                &display_path,
                index + 1,
                format!("chromosome size is not a non-negative integer: {:?}", size),
            )
        })?;

        sizes.push((name.to_string(), size));
    }

    Ok(sizes.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::fs;

    #[fixture]
    fn tmp_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[rstest]
    fn test_read_chrom_sizes(tmp_dir: tempfile::TempDir) {
        let path = tmp_dir.path().join("hg38.chrom.sizes");
        fs::write(&path, "# comment\nchr1\t5000\n\nchr2\t300\n").unwrap();

        let sizes = read_chrom_sizes(&path).unwrap();
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes.get("chr1"), Some(5000));
        assert_eq!(sizes.get("chr2"), Some(300));
    }

    #[rstest]
    #[case("chr1\n")]
    #[case("chr1\tbig\n")]
    #[case("chr1\t-5\n")]
    fn test_read_malformed_chrom_sizes(tmp_dir: tempfile::TempDir, #[case] content: &str) {
        let path = tmp_dir.path().join("bad.sizes");
        fs::write(&path, content).unwrap();

        let err = read_chrom_sizes(&path).unwrap_err();
        assert!(matches!(err, HomedepotError::InputFormat { line: 1, .. }));
    }

    #[rstest]
    fn test_missing_file_reports_path(tmp_dir: tempfile::TempDir) {
        let path = tmp_dir.path().join("nope.sizes");
        let err = read_chrom_sizes(&path).unwrap_err();
        assert!(matches!(err, HomedepotError::FileAccess { .. }));
    }

    #[rstest]
    fn test_write_atomically_gzip_roundtrip(tmp_dir: tempfile::TempDir) {
        let path = tmp_dir.path().join("out.tsv.gz");
        write_atomically(&path, |w| {
            w.write_all(b"a\t1\nb\t2\n")?;
            Ok(())
        })
        .unwrap();

        let lines: Vec<String> = get_dynamic_reader(&path)
            .unwrap()
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a\t1", "b\t2"]);
    }

    #[rstest]
    #[case("out.tsv.gz")]
    #[case("out.bed")]
    fn test_write_error_names_output(tmp_dir: tempfile::TempDir, #[case] name: &str) {
        let path = tmp_dir.path().join(name);
        let err = write_atomically(&path, |_| -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "No space left on device").into())
        })
        .unwrap_err();

        assert!(matches!(err, HomedepotError::FileAccess { .. }));
        assert!(err.to_string().contains(name), "{}", err);
        assert!(!path.exists());
    }

    #[rstest]
    fn test_read_chrom_sizes_invalid_utf8(tmp_dir: tempfile::TempDir) {
        let path = tmp_dir.path().join("bad.sizes");
        fs::write(&path, b"chr1\t5000\nchr\xff\xfe2\t300\n").unwrap();

        let err = read_chrom_sizes(&path).unwrap_err();
        assert!(matches!(err, HomedepotError::InputFormat { line: 2, .. }));
    }

    #[rstest]
    fn test_write_atomically_leaves_nothing_on_error(tmp_dir: tempfile::TempDir) {
        let path = tmp_dir.path().join("out.bed");
        let res = write_atomically(&path, |w| {
            w.write_all(b"partial")?;
            Err(HomedepotError::EmptyInput)
        });

        assert!(res.is_err());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
    }
}
