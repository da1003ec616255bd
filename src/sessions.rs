//! Session listing.
//!
//! Queries the host for every pane, keeps the ones whose title carries our
//! invisible marker, and prints one space-joined line of unmarked labels per
//! window that contains any.

use crate::error::Error;
use crate::host::{PaneHost, SessionInfo};
use crate::hostspec::SESSION_MARKER;

/// Formats the marked sessions as one line per window, in host order.
#[must_use]
pub fn marked_lines(sessions: &[SessionInfo]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut windows: Vec<&crate::host::WindowId> = Vec::new();

    for info in sessions {
        let Some(label) = info.title.strip_prefix(SESSION_MARKER) else {
            continue;
        };
        match windows.iter().position(|w| **w == info.window) {
            Some(i) => {
                lines[i].push(' ');
                lines[i].push_str(label);
            }
            None => {
                windows.push(&info.window);
                lines.push(label.to_string());
            }
        }
    }
    lines
}

/// Prints every window's marked session labels to stdout.
///
/// # Errors
/// Returns the host error if enumeration fails.
pub async fn list<H: PaneHost>(host: &H) -> Result<(), Error> {
    let sessions = host.list_sessions().await?;
    for line in marked_lines(&sessions) {
        println!("{line}");
    }
    Ok(())
}
