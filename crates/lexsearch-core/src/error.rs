use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed corpus: {0}")]
    CorpusParse(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Matrix has {rows} rows but the corpus has {units} units")]
    RowCountMismatch { units: usize, rows: usize },

    #[error("Lemmatizer failed: {0}")]
    Lemmatizer(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
