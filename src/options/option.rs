//! Names of the nginx options and their command-line flags.

use std::fmt;

use crate::enums::Constants;
use crate::error::SitesError;

/// Every option an [`NginxOptions`](super::NginxOptions) record carries.
///
/// The default options map 1:1 onto `nginx` command-line flags. The extras
/// configure this crate and never reach the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NginxOption {
    // Default options
    Config,
    Error,
    Global,
    Help,
    Prefix,
    Quiet,
    Signal,
    Test,
    TestFull,
    Version,
    VersionFull,

    // Extras
    Conf,
    Dir,
    Enabled,
    Init,
    Logs,
    Sudo,
}

impl NginxOption {
    /// Options rendered on the command line, in flag-table order.
    pub const DEFAULTS: &'static [Self] = &[
        Self::Config,
        Self::Error,
        Self::Global,
        Self::Help,
        Self::Prefix,
        Self::Quiet,
        Self::Signal,
        Self::Test,
        Self::TestFull,
        Self::Version,
        Self::VersionFull,
    ];

    /// Options that have no command-line representation.
    pub const EXTRAS: &'static [Self] = &[
        Self::Conf,
        Self::Dir,
        Self::Enabled,
        Self::Init,
        Self::Logs,
        Self::Sudo,
    ];

    /// Whether this option is one of the extras.
    pub fn is_extra(self) -> bool {
        Self::EXTRAS.contains(&self)
    }

    /// The short flag (without the leading hyphen) for this option.
    ///
    /// Extras have no flag and fail with [`SitesError::UnknownOption`].
    pub fn command_option(self) -> Result<&'static str, SitesError> {
        let flag = match self {
            Self::Config => "c",
            Self::Error => "e",
            Self::Global => "g",
            Self::Help => "h",
            Self::Prefix => "p",
            Self::Quiet => "q",
            Self::Signal => "s",
            Self::Test => "t",
            Self::TestFull => "T",
            Self::Version => "v",
            Self::VersionFull => "V",
            Self::Conf | Self::Dir | Self::Enabled | Self::Init | Self::Logs | Self::Sudo => {
                return Err(SitesError::UnknownOption {
                    name: self.value().to_string(),
                })
            }
        };
        Ok(flag)
    }
}

/// Look up the short flag for an option name such as `"testFull"`.
pub fn get_command_option(name: &str) -> Result<&'static str, SitesError> {
    NginxOption::find(name)
        .ok_or_else(|| SitesError::UnknownOption {
            name: name.to_string(),
        })?
        .command_option()
}

impl Constants for NginxOption {
    const ENUMERATION: &'static str = "nginx option";
    const ALL: &'static [Self] = &[
        Self::Config,
        Self::Error,
        Self::Global,
        Self::Help,
        Self::Prefix,
        Self::Quiet,
        Self::Signal,
        Self::Test,
        Self::TestFull,
        Self::Version,
        Self::VersionFull,
        Self::Conf,
        Self::Dir,
        Self::Enabled,
        Self::Init,
        Self::Logs,
        Self::Sudo,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Error => "error",
            Self::Global => "global",
            Self::Help => "help",
            Self::Prefix => "prefix",
            Self::Quiet => "quiet",
            Self::Signal => "signal",
            Self::Test => "test",
            Self::TestFull => "testFull",
            Self::Version => "version",
            Self::VersionFull => "versionFull",
            Self::Conf => "conf",
            Self::Dir => "dir",
            Self::Enabled => "enabled",
            Self::Init => "init",
            Self::Logs => "logs",
            Self::Sudo => "sudo",
        }
    }

    fn constant_name(self) -> &'static str {
        match self {
            Self::Config => "CONFIG",
            Self::Error => "ERROR",
            Self::Global => "GLOBAL",
            Self::Help => "HELP",
            Self::Prefix => "PREFIX",
            Self::Quiet => "QUIET",
            Self::Signal => "SIGNAL",
            Self::Test => "TEST",
            Self::TestFull => "TEST_FULL",
            Self::Version => "VERSION",
            Self::VersionFull => "VERSION_FULL",
            Self::Conf => "CONF",
            Self::Dir => "DIR",
            Self::Enabled => "ENABLED",
            Self::Init => "INIT",
            Self::Logs => "LOGS",
            Self::Sudo => "SUDO",
        }
    }
}

impl fmt::Display for NginxOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
