//! Writing downloaded archives to disk.

use crate::error::{ErrorKind, Result};
use std::path::Path;
use tokio::fs;
use tracing::instrument;

/// Write the downloaded archive to `path`, replacing any existing file.
///
/// The write is a single `tokio::fs::write` call: no temp-file staging and
/// no fsync. A crash mid-write can leave a partial file behind; the next
/// successful run replaces it.
///
/// Parent directories are not created. Provisioning images are expected to
/// ship the destination directory, so a missing parent surfaces as
/// [`ErrorKind::NotFound`].
#[instrument(skip(data), fields(path = %path.display(), bytes = data.len()))]
pub async fn write_archive(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).await.map_err(|err| map_io_error(err, path))?;
    Ok(())
}

fn map_io_error(err: std::io::Error, path: &Path) -> ErrorKind {
    match err.kind() {
        std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
        _ => ErrorKind::Io(err),
    }
}
