//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

/// Locate and download an Eclipse Capella release archive.
///
/// Scrapes the release index for the first release line matching the given
/// version prefix, picks the first archive for the configured platform from
/// that line, downloads it through the mirror resolver and writes it to the
/// configured destination.
#[derive(Debug, Parser)]
#[command(name = "capfetch", about, disable_version_flag = true)]
pub struct Cli {
    /// Version prefix to match against the release index, e.g. `6.0` or `6.0.0`.
    pub version: String,

    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
