//! Error types for the parcelscan-core library.

use thiserror::Error;

/// Main error type for the parcelscan library.
///
/// A field that never matched anywhere on the label is not an error; it
/// comes back as an empty value and the validator decides what to do with
/// it. Errors are reserved for the boundary: unreadable input, bad
/// configuration, I/O.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Capture snapshot could not be decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parcelscan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
