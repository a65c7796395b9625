//! Top-level Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Every category here is fatal: the
//! tool is single-shot, and the correct response to any failure is to stop
//! with a non-zero exit and let the operator investigate.

use capfetch_config::error::Error as ConfigError;
use capfetch_download::error::Error as DownloadError;
use derive_more::{Display, Error};
use std::path::{Path, PathBuf};

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Configuration could not be loaded or failed validation.
    #[display("configuration error: {_0}")]
    Config(#[error(not(source))] String),
    /// No entry in the release index starts with the requested prefix.
    #[display("no release matching version prefix `{_0}`")]
    UnknownVersion(#[error(not(source))] String),
    /// The release line exists but lists no archive for the platform.
    #[display("no archive ending in `{suffix}` under release `{release}`")]
    MissingArchive {
        /// The release-line entry that was searched.
        release: String,
        /// The platform suffix nothing matched.
        suffix: String,
    },
    /// A fetch failed: transport trouble or an HTTP failure status.
    #[display("download error: {_0}")]
    Download(#[error(not(source))] String),
    /// The archive could not be written to its destination.
    #[display("failed to write archive to {}: {reason}", path.display())]
    Write {
        /// The configured destination path.
        path: PathBuf,
        /// What the filesystem had to say about it.
        reason: String,
    },
}

impl ErrorKind {
    /// Re-raise a configuration error, preserving its error tree.
    #[track_caller]
    pub fn config(err: ConfigError) -> Error {
        let message = (*err).to_string();
        err.raise(ErrorKind::Config(message))
    }

    /// Re-raise a fetch error, preserving its error tree.
    #[track_caller]
    pub fn download(err: DownloadError) -> Error {
        let message = (*err).to_string();
        err.raise(ErrorKind::Download(message))
    }

    /// Re-raise a write error against the destination path.
    #[track_caller]
    pub fn write(err: DownloadError, path: &Path) -> Error {
        let reason = (*err).to_string();
        err.raise(ErrorKind::Write { path: path.to_path_buf(), reason })
    }
}
