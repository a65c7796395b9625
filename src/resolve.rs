//! The locate-then-download pipeline.
//!
//! Two index pages deep: the release index lists one subdirectory per
//! release line, and each release line lists one archive per platform
//! variant. Both lookups take the first match in listing order, and a miss
//! at either level aborts the run before any further network traffic.

use crate::error::{ErrorKind, Result};
use capfetch_config::Config;
use capfetch_download::{RemoteSource, write_archive};
use capfetch_index::Listing;
use exn::OptionExt;
use tracing::instrument;

/// Resolve `version_prefix` against the release index and download the
/// matching platform archive to the configured destination.
///
/// Strictly sequential: each step's output is the next step's input.
///
/// 1. Fetch the release index; take the first entry starting with
///    `version_prefix`.
/// 2. Fetch that release line's own index; take the first entry ending with
///    the platform suffix.
/// 3. Fetch the archive through the mirror resolver and write it to the
///    destination file.
///
/// # Errors
///
/// Any failure is fatal. Fetch and status failures surface as
/// [`ErrorKind::Download`], an exhausted search as
/// [`ErrorKind::UnknownVersion`] or [`ErrorKind::MissingArchive`], and
/// filesystem trouble as [`ErrorKind::Write`].
#[instrument(skip(source, config))]
pub async fn run<S: RemoteSource>(source: &S, config: &Config, version_prefix: &str) -> Result<()> {
    let body = source.fetch(&config.index_url).await.map_err(ErrorKind::download)?;
    let index = Listing::parse(body);
    tracing::debug!(entries = index.len(), "release index fetched");

    let release = index
        .first_starting_with(version_prefix)
        .ok_or_raise(|| ErrorKind::UnknownVersion(version_prefix.to_string()))?
        .to_string();
    tracing::debug!(release = %release, "matched release line");

    let body = source.fetch(&config.release_url(&release)).await.map_err(ErrorKind::download)?;
    let files = Listing::parse(body);
    tracing::debug!(entries = files.len(), "release listing fetched");

    let archive = files.first_ending_with(&config.platform_suffix).ok_or_raise(|| {
        ErrorKind::MissingArchive {
            release: release.clone(),
            suffix: config.platform_suffix.clone(),
        }
    })?;

    // The listing entry keeps its trailing slash, so release + archive is
    // already the release-relative path the resolver expects.
    let download_url = config.download_url(&format!("{release}{archive}"));
    tracing::info!(url = %download_url, "downloading archive");
    let payload = source.fetch(&download_url).await.map_err(ErrorKind::download)?;

    write_archive(&config.destination, &payload)
        .await
        .map_err(|err| ErrorKind::write(err, &config.destination))?;
    tracing::info!(path = %config.destination.display(), bytes = payload.len(), "archive written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use capfetch_download::MockSource;
    use rstest::rstest;
    use std::path::PathBuf;

    const INDEX_URL: &str = "https://mirror.example.test/releases/";
    const RELEASE_URL: &str = "https://mirror.example.test/releases/2.1/";
    const DOWNLOAD_URL: &str = "https://downloads.example.test/download.php\
        ?file=/releases/2.1/capella-2.1.0-linux-gtk-x86_64.tar.gz&r=1";

    const ROOT_LISTING: &str =
        r#"<a href="1.0/">1.0/</a><a href="2.0/">2.0/</a><a href="2.1/">2.1/</a>"#;
    const RELEASE_LISTING: &str = r#"<pre>
<a href="capella-2.1.0-linux-gtk-x86_64.tar.gz">capella-2.1.0-linux-gtk-x86_64.tar.gz</a>
<a href="capella-2.1.0-win32.zip">capella-2.1.0-win32.zip</a>
</pre>"#;
    const ARCHIVE_BYTES: &[u8] = b"\x1f\x8b\x08 pretend tarball";

    fn test_config(destination: PathBuf) -> Config {
        Config {
            index_url: INDEX_URL.to_string(),
            download_url_template:
                "https://downloads.example.test/download.php?file=/releases/{path}&r=1".to_string(),
            platform_suffix: "linux-gtk-x86_64.tar.gz".to_string(),
            destination,
        }
    }

    /// Mock remote with the full happy path registered. The download URL is
    /// exact: a wrongly built relative path answers 404 and fails the test.
    fn happy_source() -> MockSource {
        MockSource::with_responses([
            (INDEX_URL, ROOT_LISTING.as_bytes()),
            (RELEASE_URL, RELEASE_LISTING.as_bytes()),
            (DOWNLOAD_URL, ARCHIVE_BYTES),
        ])
    }

    #[tokio::test]
    async fn downloads_the_first_matching_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        let source = happy_source();

        run(&source, &config, "2.1").await.unwrap();

        assert_eq!(std::fs::read(&config.destination).unwrap(), ARCHIVE_BYTES);
        assert_eq!(source.requests(), [INDEX_URL, RELEASE_URL, DOWNLOAD_URL]);
    }

    #[rstest]
    #[case("9.9")]
    #[case("2.1.0")]
    #[tokio::test]
    async fn unknown_version_prefix_stops_before_the_release_fetch(#[case] prefix: &str) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        let source = happy_source();

        let err = run(&source, &config, prefix).await.unwrap_err();

        assert!(matches!(&*err, ErrorKind::UnknownVersion(p) if p == prefix));
        assert_eq!(source.requests(), [INDEX_URL]);
        assert!(!config.destination.exists());
    }

    #[tokio::test]
    async fn missing_platform_archive_stops_before_the_download() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        let source = MockSource::with_responses([
            (INDEX_URL, ROOT_LISTING.as_bytes()),
            (RELEASE_URL, r#"<a href="capella-2.1.0-win32.zip">capella-2.1.0-win32.zip</a>"#.as_bytes()),
        ]);

        let err = run(&source, &config, "2.1").await.unwrap_err();

        assert!(matches!(
            &*err,
            ErrorKind::MissingArchive { release, .. } if release == "2.1/"
        ));
        assert_eq!(source.requests(), [INDEX_URL, RELEASE_URL]);
        assert!(!config.destination.exists());
    }

    #[tokio::test]
    async fn failing_root_index_fetch_short_circuits_everything() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        let source = MockSource::default().with_status(INDEX_URL, 503);

        let err = run(&source, &config, "2.1").await.unwrap_err();

        assert!(matches!(&*err, ErrorKind::Download(_)));
        assert_eq!(source.requests(), [INDEX_URL]);
        assert!(!config.destination.exists());
    }

    #[tokio::test]
    async fn failing_download_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        let source = MockSource::with_responses([
            (INDEX_URL, ROOT_LISTING.as_bytes()),
            (RELEASE_URL, RELEASE_LISTING.as_bytes()),
        ])
        .with_status(DOWNLOAD_URL, 500);

        let err = run(&source, &config, "2.1").await.unwrap_err();

        assert!(matches!(&*err, ErrorKind::Download(_)));
        assert_eq!(source.requests().len(), 3);
        assert!(!config.destination.exists());
    }

    #[tokio::test]
    async fn rerunning_overwrites_with_identical_bytes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        let source = happy_source();

        run(&source, &config, "2.1").await.unwrap();
        let first = std::fs::read(&config.destination).unwrap();
        run(&source, &config, "2.1").await.unwrap();
        let second = std::fs::read(&config.destination).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, ARCHIVE_BYTES);
    }

    #[tokio::test]
    async fn overlapping_prefixes_take_the_first_listed_release() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path().join("capella.tar.gz"));
        // Both lines match the prefix; the pipeline must descend into the
        // one the server listed first, not the more specific one.
        let source = MockSource::with_responses([
            (INDEX_URL, r#"<a href="2.1/">2.1/</a><a href="2.1.1/">2.1.1/</a>"#.as_bytes()),
            (RELEASE_URL, RELEASE_LISTING.as_bytes()),
            (DOWNLOAD_URL, ARCHIVE_BYTES),
        ]);

        run(&source, &config, "2.1").await.unwrap();

        assert_eq!(source.requests()[1], RELEASE_URL);
    }
}
