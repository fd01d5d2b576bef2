//! Well-known directories inside the nginx configuration directory.

use std::fmt;

use super::constants::Constants;

/// Path segments under the nginx configuration directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NginxPath {
    /// `sites-available`: every defined site configuration.
    SitesAvailable,
    /// `sites-enabled`: symlinks to the active site configurations.
    SitesEnabled,
    /// `snippets`: reusable configuration fragments.
    Snippets,
}

impl Constants for NginxPath {
    const ENUMERATION: &'static str = "nginx path";
    const ALL: &'static [Self] = &[Self::SitesAvailable, Self::SitesEnabled, Self::Snippets];

    fn value(self) -> &'static str {
        match self {
            Self::SitesAvailable => "sites-available",
            Self::SitesEnabled => "sites-enabled",
            Self::Snippets => "snippets",
        }
    }

    fn constant_name(self) -> &'static str {
        match self {
            Self::SitesAvailable => "SITES_AVAILABLE",
            Self::SitesEnabled => "SITES_ENABLED",
            Self::Snippets => "SNIPPETS",
        }
    }
}

impl fmt::Display for NginxPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
