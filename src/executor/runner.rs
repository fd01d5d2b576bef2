//! Process executor used by the site manager.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::SitesError;

use super::output::sanitize_output;
use super::subprocess::{SubprocessBuilder, DEFAULT_TIMEOUT};

/// Exit status of a successful step.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status reported for a failed step that has no process exit code.
pub const EXIT_FAILURE: i32 = 1;

/// Maximum lines of captured output forwarded to the log.
const MAX_OUTPUT_LINES: usize = 20;

/// Default elevation program.
pub const DEFAULT_ELEVATE_WITH: &str = "sudo";

/// One command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to execute.
    pub program: String,
    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,
    /// Run through the elevation program.
    pub sudo: bool,
    /// Log the command before running it.
    pub verbose: bool,
    /// Do not forward the process output.
    pub silent: bool,
}

impl Invocation {
    /// An unprivileged, quiet invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            sudo: false,
            verbose: false,
            silent: false,
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set privilege elevation.
    pub fn sudo(mut self, sudo: bool) -> Self {
        self.sudo = sudo;
        self
    }

    /// Set verbose and silent modes.
    pub fn mode(mut self, verbose: bool, silent: bool) -> Self {
        self.verbose = verbose;
        self.silent = silent;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs commands and reports their exit status.
///
/// A non-zero exit is a status, not an error. Errors are reserved for
/// failing to run the command at all (spawn failure, timeout).
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<i32, SitesError>;
}

/// Runs commands on the host, elevating through a configurable program.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    elevate_with: String,
    timeout: Duration,
}

impl SystemRunner {
    /// A runner elevating with `sudo` and the default timeout.
    pub fn new() -> Self {
        Self {
            elevate_with: DEFAULT_ELEVATE_WITH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the elevation program (e.g. `doas`).
    pub fn elevate_with(mut self, program: impl Into<String>) -> Self {
        self.elevate_with = program.into();
        self
    }

    /// Set the per-command timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The program and arguments actually executed for `invocation`.
    pub fn command_line(&self, invocation: &Invocation) -> (String, Vec<String>) {
        if invocation.sudo {
            let mut args = Vec::with_capacity(invocation.args.len() + 1);
            args.push(invocation.program.clone());
            args.extend(invocation.args.iter().cloned());
            (self.elevate_with.clone(), args)
        } else {
            (invocation.program.clone(), invocation.args.clone())
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32, SitesError> {
        let (program, args) = self.command_line(invocation);

        if invocation.verbose {
            info!(command = %invocation, sudo = invocation.sudo, "Running command");
        }

        let result = SubprocessBuilder::new(&program)
            .args(&args)
            .timeout(self.timeout)
            .run()?;

        if !invocation.silent {
            let stdout = result.stdout.trim();
            if !stdout.is_empty() {
                info!(command = %invocation, "{}", sanitize_output(stdout, MAX_OUTPUT_LINES));
            }
            let stderr = result.stderr.trim();
            if !stderr.is_empty() {
                // nginx -t reports through stderr even on success
                if result.success {
                    info!(command = %invocation, "{}", sanitize_output(stderr, MAX_OUTPUT_LINES));
                } else {
                    warn!(command = %invocation, "{}", sanitize_output(stderr, MAX_OUTPUT_LINES));
                }
            }
        }

        let status = result.exit_code.unwrap_or(EXIT_FAILURE);
        debug!(command = %invocation, status, "Command finished");
        Ok(status)
    }
}
