//! Directory-index parsing for mirror listing pages.
//!
//! Release mirrors serve plain HTML pages generated by the web server, one
//! anchor per file or subdirectory. These pages are rarely well-formed, so
//! everything runs through a lenient HTML5 parser and parsing never fails
//! outright: a page with no recognisable anchors simply produces an empty
//! listing.

mod consts;

use scraper::Html;
use tracing::instrument;

/// The anchor-text entries of one directory-index page, in document order.
///
/// Entries are kept exactly as they appear in the page: no deduplication, no
/// trimming, and subdirectory names keep their trailing `/`. Document order
/// is load-bearing, since both selection operations take the *first* match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    entries: Vec<String>,
}

impl Listing {
    /// Parse a directory-index page into its anchor-text entries.
    ///
    /// Accepts raw bytes, instead of requiring HTML to be valid UTF-8.
    /// Invalid byte sequences are replaced with U+FFFD during parsing.
    /// Malformed or truncated markup degrades to whatever anchors the
    /// parser can still recover, never to an error.
    #[instrument(skip(html), fields(html_size = html.as_ref().len()))]
    pub fn parse(html: impl AsRef<[u8]>) -> Self {
        let html = String::from_utf8_lossy(html.as_ref());
        let document = Html::parse_document(&html);
        let entries = document
            .select(&consts::ANCHOR_SELECTOR)
            .map(|element| element.text().collect::<String>())
            .collect();
        Self { entries }
    }

    /// All entries, in the order the anchors appear in the page.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose text starts with `prefix`, in listing order.
    ///
    /// Returns `None` when the listing is exhausted without a match; the
    /// caller decides whether that is fatal.
    pub fn first_starting_with(&self, prefix: &str) -> Option<&str> {
        self.entries.iter().map(String::as_str).find(|entry| entry.starts_with(prefix))
    }

    /// First entry whose text ends with `suffix`, in listing order.
    pub fn first_ending_with(&self, suffix: &str) -> Option<&str> {
        self.entries.iter().map(String::as_str).find(|entry| entry.ends_with(suffix))
    }
}
