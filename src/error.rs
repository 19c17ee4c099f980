//! Error types for the point editor and its fitting engine
//!
//! None of these are fatal: the [`crate::Session`] recovers from every variant
//! locally, either by ignoring the request, skipping the offending input, or
//! falling back to demo data. They are still surfaced as values so that
//! callers driving the engine directly can react to them.

use std::path::PathBuf;

/// Errors that can occur while editing, loading or saving a point set.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A point was addressed by an index that does not exist.
    #[error("Point index {index} is out of range for a set of {len} points")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of points at the time of the request
        len: usize,
    },

    /// A prediction input or data line could not be read as numbers.
    #[error("Could not parse `{0}` as a number")]
    Parse(String),

    /// A data file could not be opened for reading or writing.
    #[error("Unable to open file {}: {source}", path.display())]
    FileUnavailable {
        /// Path of the file that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Writing to an already opened destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file contained invalid entries.
    #[error("Illegal config entry: {0}")]
    Config(#[from] toml::de::Error),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,
}

/// Result type for the point editor
pub type Result<T> = std::result::Result<T, Error>;
