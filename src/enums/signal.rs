//! Signals accepted by `nginx -s`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SitesError;

use super::constants::Constants;

/// A signal sent to the nginx master process, e.g. `nginx -s reload`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NginxSignal {
    /// Shut down gracefully.
    Quit,
    /// Reload configuration, start new workers and gracefully shut down old ones.
    Reload,
    /// Reopen log files.
    Reopen,
    /// Shut down quickly.
    Stop,
}

impl Constants for NginxSignal {
    const ENUMERATION: &'static str = "nginx signal";
    const ALL: &'static [Self] = &[Self::Quit, Self::Reload, Self::Reopen, Self::Stop];

    fn value(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Reload => "reload",
            Self::Reopen => "reopen",
            Self::Stop => "stop",
        }
    }

    fn constant_name(self) -> &'static str {
        match self {
            Self::Quit => "QUIT",
            Self::Reload => "RELOAD",
            Self::Reopen => "REOPEN",
            Self::Stop => "STOP",
        }
    }
}

impl fmt::Display for NginxSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for NginxSignal {
    type Err = SitesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_declaration_order() {
        assert_eq!(NginxSignal::values(), vec!["quit", "reload", "reopen", "stop"]);
    }

    #[test]
    fn test_get() {
        assert_eq!(NginxSignal::get("quit", "default"), "quit");
        assert_eq!(NginxSignal::get("invalid", "default"), "default");
    }

    #[test]
    fn test_includes() {
        assert!(NginxSignal::includes("stop"));
        assert!(!NginxSignal::includes("not-exist"));
        assert!(!NginxSignal::includes("STOP"));
    }

    #[test]
    fn test_name_of() {
        assert_eq!(NginxSignal::name_of("reload"), Some("RELOAD"));
        assert_eq!(NginxSignal::name_of("invalid"), None);
    }

    #[test]
    fn test_validate_matches_values() {
        for token in NginxSignal::values() {
            assert!(NginxSignal::validate(token).is_ok());
        }
        assert!(NginxSignal::validate("nope").is_err());
        assert!(NginxSignal::validate("").is_err());
    }

    #[test]
    fn test_from_str_and_serde() {
        let signal: NginxSignal = "reopen".parse().unwrap();
        assert_eq!(signal, NginxSignal::Reopen);
        assert_eq!(signal.to_string(), "reopen");

        let parsed: NginxSignal = serde_json::from_value(serde_json::json!("quit")).unwrap();
        assert_eq!(parsed, NginxSignal::Quit);
    }
}
