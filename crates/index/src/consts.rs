use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

// Every hyperlink in the page, in document order. Server-generated index
// pages emit one anchor per file or subdirectory (plus sort headers and a
// parent-directory link, which never match a version prefix or archive
// suffix).
selector!(ANCHOR_SELECTOR, "a");
