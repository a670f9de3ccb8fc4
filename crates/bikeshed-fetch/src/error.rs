use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be returned by bikeshed-fetch operations.
///
/// A non-empty error report or a non-200 HTML response is not an error here;
/// both are recorded in [`crate::ConversionReport`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// An HTTP request failed at the transport level (connect, DNS, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The input file is missing or unreadable.
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or removing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input path has no file name or cannot be made absolute.
    #[error("Invalid input path: {message}")]
    InvalidPath { message: String },
}
