//! Chromium-family Bookmarks JSON extraction.
//!
//! Chrome, Chromium and Brave share the same on-disk format: a JSON
//! document whose top-level "roots" object holds nested folder/url nodes.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::browsers::{Bookmark, BrowserKind};

/// Read URL bookmarks out of a Chromium `Bookmarks` file, tagging each
/// record with `source`.
pub fn read_bookmarks(path: &Path, source: BrowserKind) -> Result<Vec<Bookmark>> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    let json: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("invalid bookmark JSON in {:?}", path))?;

    let mut bookmarks = Vec::new();
    if let Some(roots) = json.get("roots").and_then(|v| v.as_object()) {
        for (root_name, root) in roots {
            walk_node(root, root_name, source, &mut bookmarks);
        }
    }

    debug!("Read {} bookmarks from {:?}", bookmarks.len(), path);
    Ok(bookmarks)
}

/// Depth-first walk of one bookmark tree node, children in stored order.
///
/// A node with a "children" array is a folder: the accumulated path is
/// extended with its name and the walk recurses. A url-typed leaf is
/// emitted with the path accumulated so far (its own name is not part of
/// the folder). Leaves with non-http(s) schemes (javascript:, chrome://,
/// ftp://, ...) are dropped.
fn walk_node(
    node: &serde_json::Value,
    folder: &str,
    source: BrowserKind,
    out: &mut Vec<Bookmark>,
) {
    if let Some(children) = node.get("children").and_then(|v| v.as_array()) {
        let name = node.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let joined = format!("{}/{}", folder, name);
        let path = joined.trim_matches('/');
        for child in children {
            walk_node(child, path, source, out);
        }
        return;
    }

    if node.get("type").and_then(|v| v.as_str()) != Some("url") {
        return;
    }
    let Some(url) = node.get("url").and_then(|v| v.as_str()) else {
        return;
    };
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return;
    }

    let name = node.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let title = if name.is_empty() {
        url.to_string()
    } else {
        name.to_string()
    };
    out.push(Bookmark {
        url: url.to_string(),
        title,
        source,
        folder: folder.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<Bookmark> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        std::fs::write(&path, value.to_string()).unwrap();
        read_bookmarks(&path, BrowserKind::Chromium).unwrap()
    }

    #[test]
    fn single_leaf_under_a_root() {
        let bookmarks = parse(json!({
            "roots": {
                "bookmark_bar": {
                    "children": [
                        {"type": "url", "name": "Ex", "url": "https://ex.com"}
                    ]
                }
            }
        }));

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].url, "https://ex.com");
        assert_eq!(bookmarks[0].title, "Ex");
        assert_eq!(bookmarks[0].folder, "bookmark_bar");
        assert_eq!(bookmarks[0].source, BrowserKind::Chromium);
    }

    #[test]
    fn folder_paths_accumulate_depth_first() {
        let bookmarks = parse(json!({
            "roots": {
                "bookmark_bar": {
                    "children": [
                        {"name": "A", "children": [
                            {"name": "B", "children": [
                                {"type": "url", "name": "deep", "url": "https://deep.example/"}
                            ]},
                            {"type": "url", "name": "shallow", "url": "https://shallow.example/"}
                        ]}
                    ]
                }
            }
        }));

        let folders: Vec<(&str, &str)> = bookmarks
            .iter()
            .map(|b| (b.title.as_str(), b.folder.as_str()))
            .collect();
        assert_eq!(
            folders,
            vec![
                ("deep", "bookmark_bar/A/B"),
                ("shallow", "bookmark_bar/A"),
            ]
        );
    }

    #[test]
    fn named_root_node_contributes_a_segment() {
        // Real Chrome files name their roots ("Bookmarks bar" etc.); the
        // name lands in the path after the root key.
        let bookmarks = parse(json!({
            "roots": {
                "bookmark_bar": {
                    "name": "Bookmarks bar",
                    "children": [
                        {"type": "url", "name": "top", "url": "http://top.example/"}
                    ]
                }
            }
        }));

        assert_eq!(bookmarks[0].folder, "bookmark_bar/Bookmarks bar");
    }

    #[test]
    fn non_http_leaves_are_never_emitted() {
        let bookmarks = parse(json!({
            "roots": {
                "other": {
                    "children": [
                        {"type": "url", "name": "js", "url": "javascript:void(0)"},
                        {"type": "url", "name": "internal", "url": "chrome://settings"},
                        {"type": "url", "name": "ftp", "url": "ftp://old.example/"},
                        {"type": "url", "name": "ok", "url": "http://ok.example/"}
                    ]
                }
            }
        }));

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].title, "ok");
        assert!(bookmarks.iter().all(|b| {
            b.url.starts_with("http://") || b.url.starts_with("https://")
        }));
    }

    #[test]
    fn title_falls_back_to_url() {
        let bookmarks = parse(json!({
            "roots": {
                "other": {
                    "children": [
                        {"type": "url", "url": "https://nameless.example/"},
                        {"type": "url", "name": "", "url": "https://blank.example/"}
                    ]
                }
            }
        }));

        assert_eq!(bookmarks[0].title, "https://nameless.example/");
        assert_eq!(bookmarks[1].title, "https://blank.example/");
    }

    #[test]
    fn leaf_without_url_field_is_skipped() {
        let bookmarks = parse(json!({
            "roots": {
                "other": {
                    "children": [
                        {"type": "url", "name": "broken"}
                    ]
                }
            }
        }));
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn document_without_roots_yields_nothing() {
        assert!(parse(json!({"version": 1})).is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bookmarks");
        std::fs::write(&path, "{not json").unwrap();
        assert!(read_bookmarks(&path, BrowserKind::Brave).is_err());
    }
}
