//! Configuration loading and validation.
//!
//! The tool's selection constants (where the release index lives, how the
//! final download URL is built, which platform archive to pick and where it
//! lands on disk) are process-wide configuration: set once, read-only
//! thereafter. Values are layered figment-style: compiled-in defaults, then
//! an optional TOML file, then `CAPFETCH_*` environment variables.

pub mod error;

use crate::error::{ErrorKind, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;
use url::Url;

/// Placeholder in [`Config::download_url_template`] replaced by the
/// release-relative archive path.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Environment variable prefix for overrides, e.g. `CAPFETCH_PLATFORM_SUFFIX`.
const ENV_PREFIX: &str = "CAPFETCH_";

/// Process-wide configuration for one run.
///
/// Defaults point at the official Capella release mirror and match the
/// values the provisioning setup has always used.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Config {
    /// Root index page, one hyperlink per release-line subdirectory. Must
    /// end with `/`: listing entries are concatenated onto it verbatim.
    pub index_url: String,
    /// Mirror-resolution endpoint; [`PATH_PLACEHOLDER`] is replaced with the
    /// release-relative archive path. The fixed `&r=1` query parameter asks
    /// the resolver to redirect straight to a mirror.
    pub download_url_template: String,
    /// Filename suffix identifying the build variant for the target
    /// platform among the archives of one release line.
    pub platform_suffix: String,
    /// Where the downloaded archive is written. Absolute, overwritten on
    /// every successful run.
    pub destination: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: "https://mirror.dkm.cz/eclipse/capella/core/products/releases/".to_string(),
            download_url_template:
                "https://www.eclipse.org/downloads/download.php?file=/capella/core/products/releases/{path}&r=1"
                    .to_string(),
            platform_suffix: "linux-gtk-x86_64.tar.gz".to_string(),
            destination: PathBuf::from("/opt/capella.tar.gz"),
        }
    }
}

impl Config {
    /// Load and validate the configuration.
    ///
    /// An explicitly requested `file` must exist; the default location (the
    /// platform config directory) is merged only when present. Environment
    /// variables win over both.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Figment`] when a source cannot be read or
    /// deserialized, or the relevant validation kind when a value is
    /// unusable (see [`Config::validate`]).
    #[instrument]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        match file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "merging requested configuration file");
                figment = figment.merge(Toml::file_exact(path));
            }
            None => {
                if let Some(path) = default_config_file() {
                    tracing::debug!(path = %path.display(), "merging default configuration file");
                    figment = figment.merge(Toml::file(path));
                }
            }
        }
        let config: Self =
            figment.merge(Env::prefixed(ENV_PREFIX)).extract().map_err(ErrorKind::Figment)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable before any network traffic happens.
    pub fn validate(&self) -> Result<()> {
        let parsed =
            Url::parse(&self.index_url).map_err(|_| ErrorKind::InvalidIndexUrl(self.index_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") || !self.index_url.ends_with('/') {
            exn::bail!(ErrorKind::InvalidIndexUrl(self.index_url.clone()));
        }
        if !self.download_url_template.contains(PATH_PLACEHOLDER) {
            exn::bail!(ErrorKind::InvalidTemplate(self.download_url_template.clone()));
        }
        if self.platform_suffix.is_empty() {
            exn::bail!(ErrorKind::EmptySuffix);
        }
        if !self.destination.is_absolute() {
            exn::bail!(ErrorKind::RelativeDestination(self.destination.clone()));
        }
        Ok(())
    }

    /// URL of a release line's own index page: the matched listing entry
    /// concatenated onto the root index URL, exactly as the listing spelled
    /// it (trailing slash included).
    pub fn release_url(&self, entry: &str) -> String {
        format!("{}{}", self.index_url, entry)
    }

    /// Final download URL for a release-relative archive path.
    pub fn download_url(&self, archive_path: &str) -> String {
        self.download_url_template.replace(PATH_PLACEHOLDER, archive_path)
    }
}

/// `<config dir>/capfetch/config.toml`, if a home directory can be found.
fn default_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "capfetch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
