//! Nginx service control commands.
//!
//! `nginx.start`, `nginx.stop`, `nginx.restart` and `nginx.reload`, run
//! through the host service manager.

use std::sync::Arc;

use tracing::debug;

use crate::error::SitesError;
use crate::services::ServiceVerb;
use crate::sites::SiteManager;

use super::super::traits::Command;
use super::super::types::{CommandParams, CommandResult, ExecutionContext};

/// Drive the nginx service with one verb.
///
/// # Parameters
///
/// - `options` (optional): Per-call option overrides; `sudo` decides
///   elevation and `enabled = false` skips the call
/// - `verbose`, `silent` (optional, default false)
pub struct NginxControlCommand {
    manager: Arc<SiteManager>,
    verb: ServiceVerb,
}

impl NginxControlCommand {
    pub fn new(manager: Arc<SiteManager>, verb: ServiceVerb) -> Self {
        Self { manager, verb }
    }

    /// One command per service verb.
    pub fn all(manager: &Arc<SiteManager>) -> Vec<Self> {
        [
            ServiceVerb::Start,
            ServiceVerb::Stop,
            ServiceVerb::Restart,
            ServiceVerb::Reload,
        ]
        .into_iter()
        .map(|verb| Self::new(Arc::clone(manager), verb))
        .collect()
    }
}

impl Command for NginxControlCommand {
    fn name(&self) -> &'static str {
        match self.verb {
            ServiceVerb::Start => "nginx.start",
            ServiceVerb::Stop => "nginx.stop",
            ServiceVerb::Restart => "nginx.restart",
            ServiceVerb::Reload => "nginx.reload",
        }
    }

    fn validate(&self, params: &CommandParams) -> Result<(), SitesError> {
        params.get_options_patch()?;
        Ok(())
    }

    fn execute(
        &self,
        ctx: &ExecutionContext,
        params: CommandParams,
    ) -> Result<CommandResult, SitesError> {
        let overrides = params.get_options_patch()?;
        let verbose = params.get_optional_bool("verbose", false);
        let silent = params.get_optional_bool("silent", false);

        debug!(request_id = %ctx.request_id, action = %self.verb, "Controlling nginx");

        let status = self
            .manager
            .control(self.verb, overrides.as_ref(), verbose, silent)?;

        Ok(CommandResult::from_status(
            status,
            self.name(),
            serde_json::json!({
                "action": self.verb.as_str(),
                "status": status,
            }),
        ))
    }
}
