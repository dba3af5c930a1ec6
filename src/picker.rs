//! fzf collaborator integration.
//!
//! The picker is handed one line per bookmark on stdin
//! ("title | url | source | folder") and hands the chosen line back on
//! stdout. Unlike the browser launch, we wait for fzf to exit: its output
//! is the selection.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

use crate::browsers::{Bookmark, BrowserKind};

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("fzf not found on PATH")]
    NotInstalled,
    #[error("failed to run fzf: {0}")]
    Io(#[from] std::io::Error),
}

/// The record the user picked, recovered from the chosen line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub url: String,
    /// None when the source field did not survive the round trip; the
    /// caller falls back to the default URL handler.
    pub source: Option<BrowserKind>,
}

/// One bookmark rendered as an fzf input line.
pub fn format_line(bookmark: &Bookmark) -> String {
    format!(
        "{} | {} | {} | {}",
        bookmark.title,
        bookmark.url,
        bookmark.source.name(),
        bookmark.folder
    )
}

/// Present all bookmarks in fzf and return the selection, if any.
///
/// Ok(None) means the user cancelled: fzf exited non-zero or printed
/// nothing.
pub fn pick(bookmarks: &[Bookmark]) -> Result<Option<Selection>, PickerError> {
    let payload = bookmarks
        .iter()
        .map(format_line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut child = Command::new("fzf")
        .args([
            "--delimiter",
            "|",
            "--with-nth",
            "1,3,4",
            "--preview",
            "echo \"URL: {2}\nFolder: {4}\"",
            "--preview-window",
            "down:2:wrap",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PickerError::NotInstalled,
            _ => PickerError::Io(e),
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(payload.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() || output.stdout.is_empty() {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(&output.stdout);
    Ok(parse_selection(line.trim()))
}

/// Split a chosen line back into url + source browser.
pub fn parse_selection(line: &str) -> Option<Selection> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 2 {
        return None;
    }
    let url = parts[1].trim();
    if url.is_empty() {
        return None;
    }
    let source = parts.get(2).and_then(|s| BrowserKind::parse(s));
    Some(Selection {
        url: url.to_string(),
        source,
    })
}
