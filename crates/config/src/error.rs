//! Configuration Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The configuration sources could not be read or deserialized.
    #[display("cannot read configuration: {_0}")]
    Figment(figment::Error),
    /// The index URL is unusable for building listing URLs.
    #[display("index URL must be HTTP(S) and end with `/`: {_0}")]
    InvalidIndexUrl(#[error(not(source))] String),
    /// The download template has nowhere to put the archive path.
    #[display("download URL template is missing the `{{path}}` placeholder: {_0}")]
    InvalidTemplate(#[error(not(source))] String),
    /// An empty suffix would match any listed file.
    #[display("platform suffix must not be empty")]
    EmptySuffix,
    /// Destination resolution must not depend on the invocation directory.
    #[display("destination must be an absolute path: {}", _0.display())]
    RelativeDestination(#[error(not(source))] PathBuf),
}
