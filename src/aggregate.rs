//! Merging per-source parser output into one collection.

use tracing::warn;

use crate::browsers::{Bookmark, BrowserKind, SourceGroup};
use crate::{chromium, firefox};

/// Collect bookmarks from every located storage file, tagged by browser.
///
/// With `only` set, all other browsers are skipped. A file that fails to
/// parse contributes nothing; the failure is logged and the remaining
/// files are still read. No deduplication: a URL bookmarked in two
/// browsers appears twice, with distinct source tags.
pub fn collect(sources: &SourceGroup, only: Option<BrowserKind>) -> Vec<Bookmark> {
    let mut all = Vec::new();
    for (&kind, paths) in sources {
        if only.is_some_and(|wanted| wanted != kind) {
            continue;
        }
        for path in paths {
            let parsed = match kind {
                BrowserKind::Firefox => firefox::read_bookmarks(path),
                _ => chromium::read_bookmarks(path, kind),
            };
            match parsed {
                Ok(bookmarks) => all.extend(bookmarks),
                Err(e) => warn!("Error reading {} bookmarks from {:?}: {:#}", kind, path, e),
            }
        }
    }
    all
}

/// Case-insensitive substring search over title, url and folder path.
/// Input order is preserved.
pub fn filter<'a>(bookmarks: &'a [Bookmark], term: &str) -> Vec<&'a Bookmark> {
    let needle = term.to_lowercase();
    bookmarks
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle)
                || b.url.to_lowercase().contains(&needle)
                || b.folder.to_lowercase().contains(&needle)
        })
        .collect()
}
