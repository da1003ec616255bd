//! Local login-shell discovery and POSIX quoting.
//!
//! Every pane command runs through the user's interactive login shell so that
//! shell environment and aliases are honored inside the pane.

use std::env;
use std::path::Path;

use crate::error::Error;

/// Fallback shells tried when `$SHELL` is unset or missing.
const FALLBACK_SHELLS: [&str; 2] = ["/bin/bash", "/bin/sh"];

/// Returns the user's login shell.
///
/// Prefers `$SHELL`, then the usual system shells.
///
/// # Errors
/// Returns [`Error::ShellNotFound`] if no candidate exists on disk.
pub fn login_shell() -> Result<String, Error> {
    if let Ok(shell) = env::var("SHELL") {
        if !shell.is_empty() && Path::new(&shell).exists() {
            return Ok(shell);
        }
    }
    for candidate in FALLBACK_SHELLS {
        if Path::new(candidate).exists() {
            return Ok(candidate.to_string());
        }
    }
    Err(Error::ShellNotFound)
}

/// Quotes a string for a POSIX shell.
///
/// Strings made only of safe characters pass through unchanged; everything
/// else is single-quoted, with embedded single quotes escaped as `'\''`.
#[must_use]
pub fn quote(s: &str) -> String {
    if !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c))
    {
        return s.to_string();
    }
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Wraps a command so it runs through an interactive instance of `shell`.
#[must_use]
pub fn wrap_interactive(shell: &str, command: &str) -> String {
    format!("{} -i -c {}", shell, quote(command))
}
