use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading doc records or configuration.
///
/// Expansion itself never fails; only the I/O around it does.
#[derive(Error, Debug)]
pub enum Error {
    /// A source or config file could not be read
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Doclet JSON did not have the expected shape
    #[error("failed to parse doc records from {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// The external parser command could not be started or exited unsuccessfully
    #[error("parser `{}` failed on '{}': {}", .program, .path.display(), .details)]
    Parser {
        program: String,
        path: PathBuf,
        details: String,
    },

    /// No record source knows how to read this file
    #[error("unsupported file type: {}", .path.display())]
    Unsupported { path: PathBuf },

    /// The TOML config file was invalid
    #[error("failed to parse config '{}': {}", .path.display(), .details)]
    Config { path: PathBuf, details: String },
}

pub type Result<T> = std::result::Result<T, Error>;
