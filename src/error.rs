// ./src/error.rs
//! Error types for the proof crate
//!
//! Only failures that stop a proof run live here. Problems with an individual
//! record (bad JSON, empty `data`, API errors) are not errors: they degrade to
//! [`crate::types::Lookup::Missing`] and end up as a zero ownership score.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the proof crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Submission directory errors
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// Result writing errors
    #[error(transparent)]
    Output(#[from] OutputError),

    /// The wellness API client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Errors that can occur while assembling a [`crate::config::ProofConfig`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required option has no value
    #[error("Missing required config option: {0}")]
    Missing(&'static str),

    /// An option is present but cannot be used
    #[error("Invalid value for {option}: {reason}")]
    Invalid {
        option: &'static str,
        reason: String,
    },

    /// The config file could not be read or parsed
    #[error("Failed to load config file {path:?}: {reason}")]
    File { path: PathBuf, reason: String },
}

/// Errors that can occur while scanning the submission directory
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SubmissionError {
    /// The input directory cannot be listed
    #[error("Cannot read input directory {path:?}: {source}")]
    UnreadableDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input directory holds no files at all
    #[error("No input files found in {0:?}")]
    Empty(PathBuf),
}

/// Errors that can occur while persisting a proof
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OutputError {
    /// Filesystem failure
    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure
    #[error("Failed to serialize proof: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
