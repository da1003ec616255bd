//! Destination parsing and pane command construction.
//!
//! A destination token follows the grammar `[user@]host[:port]`, where `host`
//! may be an IPv6 literal wrapped in `[...]`. Each resolved destination yields
//! one [`PaneSpec`]: the pane's label and the full command line that opens the
//! remote-shell connection.

use tracing::debug;

use crate::config::RunConfig;
use crate::error::Error;
use crate::shell;

/// Invisible marker prefixed to every real pane label.
///
/// Lets the list-sessions mode tell panes this tool created apart from
/// arbitrary other panes in the same server. ZERO WIDTH SPACE renders as
/// nothing in pane titles.
pub const SESSION_MARKER: char = '\u{200B}';

/// Wrapper binary prefixed to the connection command with `--keep-awake`.
const KEEP_AWAKE_WRAPPER: &str = "caffeinate";

/// Command run inside placeholder panes.
pub const PLACEHOLDER_COMMAND: &str =
    "clear; printf 'not in use'; while :; do sleep 3600; done";

/// A resolved destination. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Username from the token, if any.
    pub user: Option<String>,
    /// Hostname or address literal. Never empty.
    pub host: String,
    /// Port from the token, if any.
    pub port: Option<u16>,
}

impl Destination {
    /// Parses a raw `[user@]host[:port]` token.
    ///
    /// The strip order is left to right: an optional `user@` prefix first,
    /// then a bracketed IPv6 literal or a bare hostname, then an optional
    /// `:port` suffix.
    ///
    /// # Errors
    /// Returns [`Error::InvalidDestination`] naming the original token when no
    /// hostname remains after stripping, when an IPv6 bracket is unmatched, or
    /// when the port is empty or not a number.
    pub fn parse(token: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidDestination(token.to_string());

        let mut rest = token;
        let mut user = None;
        if let Some(at) = rest.find('@') {
            let name = &rest[..at];
            if !name.is_empty() {
                user = Some(name.to_string());
            }
            rest = &rest[at + 1..];
        }

        let (host, port_part) = if let Some(bracketed) = rest.strip_prefix('[') {
            let end = bracketed.find(']').ok_or_else(invalid)?;
            let after = &bracketed[end + 1..];
            match after.strip_prefix(':') {
                Some(p) => (&bracketed[..end], Some(p)),
                None if after.is_empty() => (&bracketed[..end], None),
                None => return Err(invalid()),
            }
        } else if let Some(colon) = rest.find(':') {
            (&rest[..colon], Some(&rest[colon + 1..]))
        } else {
            (rest, None)
        };

        if host.is_empty() {
            return Err(invalid());
        }
        let port = match port_part {
            Some(p) => Some(p.parse::<u16>().map_err(|_| invalid())?),
            None => None,
        };

        Ok(Self {
            user,
            host: host.to_string(),
            port,
        })
    }

    /// Returns the `host[:port]` connection target, re-bracketing IPv6
    /// literals when a port is present.
    #[must_use]
    pub fn connection_target(&self) -> String {
        match self.port {
            Some(port) if self.host.contains(':') => format!("[{}]:{}", self.host, port),
            Some(port) => format!("{}:{}", self.host, port),
            None if self.host.contains(':') => format!("[{}]", self.host),
            None => self.host.clone(),
        }
    }

    /// Returns the human-readable label, `user@host` or bare `host`.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, self.host),
            None => self.host.clone(),
        }
    }
}

/// Everything needed to open one real pane.
#[derive(Debug, Clone)]
pub struct PaneSpec {
    /// 0-based launch order.
    pub index: usize,
    /// The resolved destination.
    pub destination: Destination,
    /// Marker-prefixed pane label.
    pub label: String,
    /// Full launch command, already wrapped in the login shell.
    pub command: String,
}

impl PaneSpec {
    fn new(index: usize, destination: Destination, config: &RunConfig, login_shell: &str) -> Self {
        let label = format!("{}{}", SESSION_MARKER, destination.display());
        let command = build_command(&destination, config, login_shell);
        Self {
            index,
            destination,
            label,
            command,
        }
    }
}

/// Assembles the remote-shell invocation for one destination.
///
/// Per-destination user/port win over the configured defaults. Flag order,
/// outer to inner: binary, repeated `-o` options, `-J` jump spec, `-p` port,
/// `-l` user, hostname. The whole command is then wrapped in the interactive
/// login shell.
fn build_command(dest: &Destination, config: &RunConfig, login_shell: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    if config.keep_awake {
        parts.push(KEEP_AWAKE_WRAPPER.to_string());
    }
    parts.push(config.ssh_binary.clone());
    for opt in &config.ssh_options {
        parts.push("-o".to_string());
        parts.push(shell::quote(opt));
    }
    if let Some(jump) = &config.jump_host {
        parts.push("-J".to_string());
        parts.push(shell::quote(jump));
    }
    if let Some(port) = dest.port.or(config.port) {
        parts.push("-p".to_string());
        parts.push(port.to_string());
    }
    if let Some(user) = dest.user.as_ref().or(config.login.as_ref()) {
        parts.push("-l".to_string());
        parts.push(shell::quote(user));
    }
    parts.push(shell::quote(&dest.host));

    shell::wrap_interactive(login_shell, &parts.join(" "))
}

/// Resolves every destination token into a [`PaneSpec`].
///
/// Fails fast on the first malformed token, before any pane-host side effect.
///
/// # Errors
/// Returns [`Error::InvalidDestination`] for the first token that fails to
/// parse.
pub fn pane_specs(
    tokens: &[String],
    config: &RunConfig,
    login_shell: &str,
) -> Result<Vec<PaneSpec>, Error> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let destination = Destination::parse(token)?;
            debug!(token, host = %destination.host, "resolved destination");
            Ok(PaneSpec::new(index, destination, config, login_shell))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(token: &str) -> Destination {
        Destination::parse(token).unwrap()
    }

    #[test]
    fn test_parse_bare_host() {
        assert_eq!(
            dest("host"),
            Destination {
                user: None,
                host: "host".to_string(),
                port: None,
            }
        );
    }

    #[test]
    fn test_parse_user_host_port() {
        assert_eq!(
            dest("user@host:2222"),
            Destination {
                user: Some("user".to_string()),
                host: "host".to_string(),
                port: Some(2222),
            }
        );
    }

    #[test]
    fn test_parse_ipv6_literal() {
        assert_eq!(
            dest("[::1]:22"),
            Destination {
                user: None,
                host: "::1".to_string(),
                port: Some(22),
            }
        );
        assert_eq!(dest("root@[fe80::1]").host, "fe80::1");
    }

    #[test]
    fn test_parse_splits_on_first_at() {
        // Everything after the first '@' belongs to the host part.
        let d = dest("user@name@host");
        assert_eq!(d.user.as_deref(), Some("user"));
        assert_eq!(d.host, "name@host");
    }

    #[test]
    fn test_parse_rejects_empty_host() {
        assert!(Destination::parse("@").is_err());
        assert!(Destination::parse(":22").is_err());
        assert!(Destination::parse("").is_err());
        assert!(Destination::parse("user@").is_err());
        assert!(Destination::parse("user@:22").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_tokens() {
        assert!(Destination::parse("[::1").is_err());
        assert!(Destination::parse("[::1]x").is_err());
        assert!(Destination::parse("host:").is_err());
        assert!(Destination::parse("host:port").is_err());
        assert!(Destination::parse("host:70000").is_err());
    }

    #[test]
    fn test_connection_target_round_trip() {
        assert_eq!(dest("host").connection_target(), "host");
        assert_eq!(dest("host:2222").connection_target(), "host:2222");
        assert_eq!(dest("[::1]:22").connection_target(), "[::1]:22");
        assert_eq!(dest("u@[fe80::1]").connection_target(), "[fe80::1]");
    }

    #[test]
    fn test_command_flag_order() {
        let config = RunConfig {
            jump_host: Some("bastion".to_string()),
            ssh_options: vec!["StrictHostKeyChecking=no".to_string()],
            ..RunConfig::default()
        };
        let specs = pane_specs(&["admin@db1:2200".to_string()], &config, "/bin/sh").unwrap();
        assert_eq!(
            specs[0].command,
            "/bin/sh -i -c 'ssh -o StrictHostKeyChecking=no -J bastion -p 2200 -l admin db1'"
        );
    }

    #[test]
    fn test_token_overrides_beat_defaults() {
        let config = RunConfig {
            login: Some("fallback".to_string()),
            port: Some(22),
            ..RunConfig::default()
        };
        let specs = pane_specs(
            &["db1".to_string(), "root@db2:2222".to_string()],
            &config,
            "/bin/sh",
        )
        .unwrap();
        assert!(specs[0].command.contains("-p 22 -l fallback db1"));
        assert!(specs[1].command.contains("-p 2222 -l root db2"));
    }

    #[test]
    fn test_keep_awake_prefixes_command() {
        let config = RunConfig {
            keep_awake: true,
            ..RunConfig::default()
        };
        let specs = pane_specs(&["host".to_string()], &config, "/bin/sh").unwrap();
        assert!(specs[0].command.contains("caffeinate ssh"));
    }

    #[test]
    fn test_label_carries_marker() {
        let specs =
            pane_specs(&["u@host".to_string()], &RunConfig::default(), "/bin/sh").unwrap();
        assert_eq!(specs[0].label, format!("{}u@host", SESSION_MARKER));
        assert_eq!(specs[0].index, 0);
    }
}
