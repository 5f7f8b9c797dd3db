use std::path::PathBuf;

use crate::fsutil;

/// Errors that may occur while reading the static mount table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to read line for file `{path}`: {source}")]
    ReadLine {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse line {line} in file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: super::parser::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
