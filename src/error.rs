//! Fatal error types for sshgrid.
//!
//! Every error here aborts the run at the point it is detected; nothing is
//! retried. Parsing-stage errors (`InvalidDestination`, `InvalidGridConstraint`,
//! `ShellNotFound`) are raised before any pane-host side effect, so purely
//! local input mistakes never leave a partially built window behind.

use thiserror::Error;

use crate::host::HostError;

/// Exit code for fatal runtime errors.
pub const EXIT_FAILURE: i32 = 1;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A destination token did not match `[user@]host[:port]`.
    #[error("invalid destination '{0}'")]
    InvalidDestination(String),

    /// Bad or contradictory grid constraint (columns/rows).
    #[error("invalid grid constraint: {0}")]
    InvalidGridConstraint(String),

    /// No usable local login shell was found.
    #[error("no usable login shell found (set $SHELL)")]
    ShellNotFound,

    /// A pane-host call failed or the host is unreachable.
    #[error("pane host error: {0}")]
    Host(#[from] HostError),
}

impl Error {
    /// Returns the process exit code for this error.
    ///
    /// All fatal errors map to 1; usage errors (missing destinations,
    /// conflicting flags) never reach this type because clap reports them
    /// with exit code 2.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_fatal() {
        assert_eq!(Error::ShellNotFound.exit_code(), 1);
        assert_eq!(Error::InvalidDestination("@".into()).exit_code(), 1);
    }

    #[test]
    fn test_invalid_destination_names_token() {
        let err = Error::InvalidDestination(":22".to_string());
        assert_eq!(err.to_string(), "invalid destination ':22'");
    }
}
