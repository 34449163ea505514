use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HomedepotError {
    #[error("Malformed input in {path}, line {line}: {message}")]
    InputFormat {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Chromosome not found in chrom sizes table: {0}")]
    UnknownChromosome(String),

    #[error(
        "Can't sample {requested} fragments from {path}: the file only holds {available} fragments"
    )]
    InsufficientData {
        path: String,
        requested: u64,
        available: u64,
    },

    #[error("No input files were given")]
    EmptyInput,

    #[error("Can't access file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HomedepotError {
    pub fn input_format(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        HomedepotError::InputFormat {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HomedepotError::FileAccess {
            path: path.into(),
            source,
        }
    }

    ///
    /// Classify an error hit while reading line `line` of `path`. Undecodable
    /// content is malformed input; anything else is a file access problem.
    ///
    pub fn line_read(path: &Path, line: usize, source: std::io::Error) -> Self {
        match source.kind() {
            ErrorKind::InvalidData => HomedepotError::input_format(
                path.display().to_string(),
                line,
                format!("unreadable line: {}", source),
            ),
            _ => HomedepotError::file_access(path, source),
        }
    }

    ///
    /// Attach `path` to a bare io error; other variants pass through unchanged.
    ///
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            HomedepotError::Io(source) => HomedepotError::file_access(path, source),
            other => other,
        }
    }
}


pub type Result<T> = std::result::Result<T, HomedepotError>;
