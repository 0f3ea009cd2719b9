// src/error.rs

//! Error types for debmark
//!
//! Missing source files and a failing apt-mark are everyday conditions on
//! the systems this tool runs on, so both map to recoverable variants the
//! callers degrade over instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A source database could not be opened or read.
    #[error("cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external manual-mark command failed, was not found, or timed out.
    #[error("{0}")]
    ExternalCommand(String),

    /// Plain I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
