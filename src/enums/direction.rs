//! Redirect directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SitesError;

use super::constants::Constants;

/// Which way a redirect rule sends traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectDirection {
    /// `www.example.com` → `example.com`.
    Inbound,
    /// `example.com` → `www.example.com`.
    #[default]
    Outbound,
}

impl RedirectDirection {
    /// Parse a direction token, failing with [`SitesError::InvalidDirection`].
    pub fn parse(token: &str) -> Result<Self, SitesError> {
        Self::find(token).ok_or_else(|| SitesError::InvalidDirection {
            direction: token.to_string(),
        })
    }
}

impl Constants for RedirectDirection {
    const ENUMERATION: &'static str = "redirect direction";
    const ALL: &'static [Self] = &[Self::Inbound, Self::Outbound];

    fn value(self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn constant_name(self) -> &'static str {
        match self {
            Self::Inbound => "INBOUND",
            Self::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for RedirectDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for RedirectDirection {
    type Err = SitesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
