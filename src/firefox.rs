//! Firefox places.sqlite bookmark extraction.

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

use crate::browsers::{Bookmark, BrowserKind};

/// Read URL bookmarks out of a `places.sqlite` database.
///
/// The database is opened read-only so a running Firefox holding its own
/// lock is never blocked or corrupted. Only type-1 (URL) bookmark entries
/// joined to an http(s) place are returned; folders and separators
/// (types 2 and 3) and `place:` queries never match.
pub fn read_bookmarks(db_path: &Path) -> Result<Vec<Bookmark>> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
    )
    .with_context(|| format!("failed to open {:?} read-only", db_path))?;

    let mut stmt = conn
        .prepare(
            "SELECT p.url, b.title
             FROM moz_places p
             JOIN moz_bookmarks b ON p.id = b.fk
             WHERE b.type = 1
               AND p.url IS NOT NULL
               AND p.url LIKE 'http%'",
        )
        .with_context(|| format!("unexpected schema in {:?}", db_path))?;

    let rows = stmt.query_map([], |row| {
        let url: String = row.get(0)?;
        let title: Option<String> = row.get(1)?;
        Ok((url, title))
    })?;

    let mut bookmarks = Vec::new();
    for row in rows {
        let (url, title) = row?;
        let title = match title {
            Some(t) if !t.is_empty() => t,
            _ => url.clone(),
        };
        bookmarks.push(Bookmark {
            url,
            title,
            source: BrowserKind::Firefox,
            folder: String::new(),
        });
    }

    debug!("Read {} bookmarks from {:?}", bookmarks.len(), db_path);
    Ok(bookmarks)
}
