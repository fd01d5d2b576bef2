//! Host service managers.
//!
//! Picks the service-control command for the host platform: Homebrew
//! services on macOS, systemd everywhere else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::executor::Invocation;

use super::traits::ServiceDefinition;

/// A service-control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceVerb {
    Start,
    Stop,
    Restart,
    Reload,
}

impl ServiceVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Reload => "reload",
        }
    }
}

impl fmt::Display for ServiceVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The service manager of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceManager {
    /// `brew services <verb> <formula>`.
    Homebrew,
    /// `systemctl <verb> <unit>`.
    Systemd,
}

impl ServiceManager {
    /// The manager for the platform this binary was built for.
    pub fn detect() -> Self {
        if is_mac_host() {
            Self::Homebrew
        } else {
            Self::Systemd
        }
    }

    /// The verb this manager understands for `verb`.
    ///
    /// Homebrew services has no reload; it restarts instead.
    pub fn verb(self, verb: ServiceVerb) -> ServiceVerb {
        match (self, verb) {
            (Self::Homebrew, ServiceVerb::Reload) => ServiceVerb::Restart,
            (_, verb) => verb,
        }
    }

    /// The command running `verb` on `service`.
    pub fn command(self, verb: ServiceVerb, service: &dyn ServiceDefinition) -> Invocation {
        let verb = self.verb(verb).as_str();
        match self {
            Self::Homebrew => Invocation::new("brew").args([
                "services",
                verb,
                service.homebrew_formula(),
            ]),
            Self::Systemd => Invocation::new("systemctl").args([verb, service.systemd_unit()]),
        }
    }
}

/// Whether the host is macOS.
pub fn is_mac_host() -> bool {
    cfg!(target_os = "macos")
}
