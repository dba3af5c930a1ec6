use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A single normalized bookmark, whatever browser it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub source: BrowserKind,
    /// Slash-joined folder path above the bookmark. Empty for the flat
    /// Firefox store and for entries at a tree root.
    pub folder: String,
}

/// The browsers we know how to read bookmarks from.
///
/// Ordering follows declaration order, so a `SourceGroup` iterates
/// firefox, chrome, chromium, brave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    Firefox,
    Chrome,
    Chromium,
    Brave,
}

impl BrowserKind {
    pub const ALL: [BrowserKind; 4] = [
        BrowserKind::Firefox,
        BrowserKind::Chrome,
        BrowserKind::Chromium,
        BrowserKind::Brave,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BrowserKind::Firefox => "firefox",
            BrowserKind::Chrome => "chrome",
            BrowserKind::Chromium => "chromium",
            BrowserKind::Brave => "brave",
        }
    }

    /// Executable used to open a URL in this browser. The identity string
    /// doubles as the command name for every supported family; kept as an
    /// explicit table so the relation stays visible.
    pub fn launch_command(&self) -> &'static str {
        match self {
            BrowserKind::Firefox => "firefox",
            BrowserKind::Chrome => "chrome",
            BrowserKind::Chromium => "chromium",
            BrowserKind::Brave => "brave",
        }
    }

    pub fn parse(s: &str) -> Option<BrowserKind> {
        match s.trim().to_lowercase().as_str() {
            "firefox" => Some(BrowserKind::Firefox),
            "chrome" => Some(BrowserKind::Chrome),
            "chromium" => Some(BrowserKind::Chromium),
            "brave" => Some(BrowserKind::Brave),
            _ => None,
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map from browser to the bookmark storage files found for it, in profile
/// discovery order. Built once at startup, read-only afterwards.
pub type SourceGroup = BTreeMap<BrowserKind, Vec<PathBuf>>;

/// Find browser bookmark storage files under the current user's home.
pub fn locate() -> Result<SourceGroup> {
    let home = PathBuf::from(std::env::var("HOME")?);
    Ok(locate_under(&home))
}

/// Scan the known per-browser profile roots beneath `home`.
///
/// A browser is included only if at least one storage file was found;
/// missing profile roots are skipped without comment.
pub fn locate_under(home: &Path) -> SourceGroup {
    let mut sources = SourceGroup::new();

    // Firefox keeps one places.sqlite per profile directory.
    let places = scan_profiles(&home.join(".mozilla/firefox"), "places.sqlite", true);
    if !places.is_empty() {
        sources.insert(BrowserKind::Firefox, places);
    }

    // Chromium-family browsers keep one Bookmarks JSON file per profile.
    for (kind, config_dir) in [
        (BrowserKind::Chrome, ".config/google-chrome"),
        (BrowserKind::Chromium, ".config/chromium"),
        (BrowserKind::Brave, ".config/BraveSoftware/Brave-Browser"),
    ] {
        let files = scan_profiles(&home.join(config_dir), "Bookmarks", false);
        if !files.is_empty() {
            sources.insert(kind, files);
        }
    }

    sources
}

/// Append a manually configured storage file to a browser's path list.
///
/// Returns false (after logging) when the file does not exist, so a stale
/// override never aborts the run.
pub fn add_override(sources: &mut SourceGroup, kind: BrowserKind, path: PathBuf) -> bool {
    if !path.is_file() {
        warn!("Ignoring override for {}: {:?} is not a file", kind, path);
        return false;
    }
    debug!("Using manual {} bookmark file: {:?}", kind, path);
    sources.entry(kind).or_default().push(path);
    true
}

/// Check each immediate, non-hidden subdirectory of `root` for a storage
/// file named `file_name`. Entries are visited in sorted name order so
/// discovery order is reproducible.
fn scan_profiles(root: &Path, file_name: &str, require_nonempty: bool) -> Vec<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        // Browser not installed; nothing to report.
        Err(_) => return Vec::new(),
    };

    let mut profile_dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.'))
        })
        .collect();
    profile_dirs.sort();

    let mut found = Vec::new();
    for dir in profile_dirs {
        let candidate = dir.join(file_name);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() && (!require_nonempty || meta.len() > 0) => {
                debug!("Found bookmark store at {:?}", candidate);
                found.push(candidate);
            }
            _ => {}
        }
    }
    found
}
