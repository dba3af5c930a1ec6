//! Launching a bookmark URL in its owning browser.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Spawn the browser (or the desktop default handler when no command is
/// given) and detach. The launched process may outlive us by hours, so we
/// never wait on it; its output is discarded.
pub fn open_url(url: &str, command: Option<&str>) -> Result<()> {
    let program = command.unwrap_or("xdg-open");
    debug!("Launching: {} {}", program, url);

    Command::new(program)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {}", program))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_is_an_error() {
        let result = open_url(
            "https://example.com/",
            Some("definitely-not-a-real-browser-binary"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn spawn_detaches_without_waiting() {
        // `true` exits immediately; open_url must return Ok without
        // blocking on or reaping the child.
        assert!(open_url("https://example.com/", Some("true")).is_ok());
    }
}
