//! The nginx option record and its partial overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::enums::{Constants, NginxPath, NginxSignal};
use crate::error::SitesError;

use super::option::NginxOption;

/// Key under which a raw configuration may nest the nginx options.
pub const NGINX_KEY: &str = "nginx";

/// The options of the `nginx` command, plus the extras that drive site
/// management (`conf`, `dir`, `enabled`, `init`, `logs`, `sudo`).
///
/// Deserializes from camelCase keys (`testFull`); snake_case aliases are
/// accepted so the record reads naturally from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NginxOptions {
    /// Path to the desired site configuration content.
    pub conf: Option<PathBuf>,
    /// `-c`: alternative configuration file.
    pub config: Option<String>,
    /// Base nginx configuration directory (e.g. `/etc/nginx`).
    pub dir: Option<PathBuf>,
    /// Master switch for lifecycle operations.
    pub enabled: bool,
    /// `-e`: alternative error log file, or `stderr`.
    pub error: Option<String>,
    /// `-g`: global configuration directives.
    pub global: Option<String>,
    /// `-h`: print help.
    pub help: bool,
    /// Bootstrap parameters for a new site.
    pub init: Option<String>,
    /// Nginx log directory.
    pub logs: Option<PathBuf>,
    /// `-p`: nginx path prefix.
    pub prefix: Option<String>,
    /// `-q`: suppress non-error messages while testing.
    pub quiet: bool,
    /// `-s`: signal sent to the master process.
    pub signal: Option<NginxSignal>,
    /// Run privileged operations through the elevation program.
    pub sudo: bool,
    /// `-t`: test the configuration.
    pub test: bool,
    /// `-T`: test and dump the configuration.
    #[serde(alias = "test_full")]
    pub test_full: bool,
    /// `-v`: print the version.
    pub version: bool,
    /// `-V`: print version and configure parameters.
    #[serde(alias = "version_full")]
    pub version_full: bool,
}

impl Default for NginxOptions {
    fn default() -> Self {
        Self {
            conf: None,
            config: None,
            dir: None,
            enabled: true,
            error: None,
            global: None,
            help: false,
            init: None,
            logs: None,
            prefix: None,
            quiet: false,
            signal: None,
            sudo: true,
            test: false,
            test_full: false,
            version: false,
            version_full: false,
        }
    }
}

/// A partial set of options, layered onto a record by [`NginxOptions::resolve`].
///
/// Every field left `None` keeps the value of the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NginxOptionsPatch {
    pub conf: Option<PathBuf>,
    pub config: Option<String>,
    pub dir: Option<PathBuf>,
    pub enabled: Option<bool>,
    pub error: Option<String>,
    pub global: Option<String>,
    pub help: Option<bool>,
    pub init: Option<String>,
    pub logs: Option<PathBuf>,
    pub prefix: Option<String>,
    pub quiet: Option<bool>,
    pub signal: Option<NginxSignal>,
    pub sudo: Option<bool>,
    pub test: Option<bool>,
    #[serde(alias = "test_full")]
    pub test_full: Option<bool>,
    pub version: Option<bool>,
    #[serde(alias = "version_full")]
    pub version_full: Option<bool>,
}

impl NginxOptionsPatch {
    /// Parse a patch from a raw JSON mapping.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, SitesError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// A patch that only sets the base configuration directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }
}

impl From<NginxOptions> for NginxOptionsPatch {
    fn from(options: NginxOptions) -> Self {
        Self {
            conf: options.conf,
            config: options.config,
            dir: options.dir,
            enabled: Some(options.enabled),
            error: options.error,
            global: options.global,
            help: Some(options.help),
            init: options.init,
            logs: options.logs,
            prefix: options.prefix,
            quiet: Some(options.quiet),
            signal: options.signal,
            sudo: Some(options.sudo),
            test: Some(options.test),
            test_full: Some(options.test_full),
            version: Some(options.version),
            version_full: Some(options.version_full),
        }
    }
}

/// The command-line value of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandValue<'a> {
    Flag,
    Text(&'a str),
}

fn flag(set: bool) -> Option<CommandValue<'static>> {
    set.then_some(CommandValue::Flag)
}

fn text(value: &Option<String>) -> Option<CommandValue<'_>> {
    value.as_deref().map(CommandValue::Text)
}

impl NginxOptions {
    /// Build a record from raw configuration.
    ///
    /// Reads the mapping under the `nginx` key when present, the whole
    /// mapping otherwise. Missing fields take their defaults.
    pub fn from_init(init: &serde_json::Value) -> Result<Self, SitesError> {
        let section = init.get(NGINX_KEY).unwrap_or(init);
        if section.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(section.clone())?)
    }

    /// Layer `patches` onto `base` (or the defaults), later patches winning
    /// per field. Neither input is modified.
    pub fn resolve<'a, I>(base: Option<&NginxOptions>, patches: I) -> NginxOptions
    where
        I: IntoIterator<Item = &'a NginxOptionsPatch>,
    {
        let mut resolved = base.cloned().unwrap_or_default();
        for patch in patches {
            resolved.apply(patch);
        }
        resolved
    }

    /// Overwrite every field the patch sets.
    pub fn apply(&mut self, patch: &NginxOptionsPatch) {
        if let Some(conf) = &patch.conf {
            self.conf = Some(conf.clone());
        }
        if let Some(config) = &patch.config {
            self.config = Some(config.clone());
        }
        if let Some(dir) = &patch.dir {
            self.dir = Some(dir.clone());
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(error) = &patch.error {
            self.error = Some(error.clone());
        }
        if let Some(global) = &patch.global {
            self.global = Some(global.clone());
        }
        if let Some(help) = patch.help {
            self.help = help;
        }
        if let Some(init) = &patch.init {
            self.init = Some(init.clone());
        }
        if let Some(logs) = &patch.logs {
            self.logs = Some(logs.clone());
        }
        if let Some(prefix) = &patch.prefix {
            self.prefix = Some(prefix.clone());
        }
        if let Some(quiet) = patch.quiet {
            self.quiet = quiet;
        }
        if let Some(signal) = patch.signal {
            self.signal = Some(signal);
        }
        if let Some(sudo) = patch.sudo {
            self.sudo = sudo;
        }
        if let Some(test) = patch.test {
            self.test = test;
        }
        if let Some(test_full) = patch.test_full {
            self.test_full = test_full;
        }
        if let Some(version) = patch.version {
            self.version = version;
        }
        if let Some(version_full) = patch.version_full {
            self.version_full = version_full;
        }
    }

    /// The value an option contributes to the command line, if any.
    fn command_value(&self, option: NginxOption) -> Option<CommandValue<'_>> {
        match option {
            NginxOption::Config => text(&self.config),
            NginxOption::Error => text(&self.error),
            NginxOption::Global => text(&self.global),
            NginxOption::Help => flag(self.help),
            NginxOption::Prefix => text(&self.prefix),
            NginxOption::Quiet => flag(self.quiet),
            NginxOption::Signal => self.signal.map(|signal| CommandValue::Text(signal.value())),
            NginxOption::Test => flag(self.test),
            NginxOption::TestFull => flag(self.test_full),
            NginxOption::Version => flag(self.version),
            NginxOption::VersionFull => flag(self.version_full),
            _ => None,
        }
    }

    /// Render the command-line arguments, skipping `excludes`.
    ///
    /// Only the default options are ever rendered, in flag-table order: a
    /// set flag becomes `-<flag>`, a text value becomes `-<flag> <value>`.
    pub fn to_command_line(&self, excludes: &[NginxOption]) -> Vec<String> {
        let mut args = Vec::new();
        for &option in NginxOption::DEFAULTS {
            if excludes.contains(&option) {
                continue;
            }
            let Ok(flag) = option.command_option() else {
                continue;
            };
            match self.command_value(option) {
                Some(CommandValue::Flag) => args.push(format!("-{}", flag)),
                Some(CommandValue::Text(value)) => {
                    args.push(format!("-{}", flag));
                    args.push(value.to_string());
                }
                None => {}
            }
        }
        args
    }

    /// The command-line arguments with every extra excluded.
    pub fn command_args(&self) -> Vec<String> {
        self.to_command_line(NginxOption::EXTRAS)
    }

    fn base_directory(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// `<dir>/sites-available`, or the bare segment when `dir` is unset.
    pub fn site_available_directory(&self) -> PathBuf {
        self.base_directory().join(NginxPath::SitesAvailable.value())
    }

    /// `<dir>/sites-enabled`, or the bare segment when `dir` is unset.
    pub fn site_enabled_directory(&self) -> PathBuf {
        self.base_directory().join(NginxPath::SitesEnabled.value())
    }
}

impl fmt::Display for NginxOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_args().join(" "))
    }
}
