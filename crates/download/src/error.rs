//! Download Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A download error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for download operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The request could not be completed (DNS, connection, timeout).
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// A response arrived but carried a failure status. Raised before the
    /// response body is touched.
    #[display("HTTP {status} from {url}")]
    Status {
        /// The failure status code (4xx/5xx).
        status: u16,
        /// The URL that answered with it.
        url: String,
    },
    /// Destination (or one of its parents) does not exist.
    #[display("file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// Access denied writing the destination.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error.
    #[display("I/O error: {_0}")]
    Io(IoError),
}

impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    ///
    /// Transport and server-side failures may clear up on a later run. The
    /// tool itself runs single-shot and never retries; this is metadata for
    /// whatever invoked it.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Io(_) => true,
            Self::Status { status, .. } => (500..600).contains(status),
            Self::NotFound(_) | Self::PermissionDenied(_) => false,
        }
    }
}
