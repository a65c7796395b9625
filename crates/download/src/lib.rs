//! Remote fetching and archive write-out.
//!
//! The [`RemoteSource`] trait is the only seam between the pipeline and the
//! network: one GET per call, failure statuses raised before the body is
//! consumed. [`HttpSource`] is the production implementation;
//! [`MockSource`] (behind the `mock` feature) serves canned responses for
//! tests. [`write_archive`] puts the downloaded bytes on disk with plain
//! overwrite semantics.

pub mod error;
mod file;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use crate::file::write_archive;
#[cfg(feature = "mock")]
pub use crate::mock::MockSource;
pub use crate::source::{HttpSource, RemoteSource};
