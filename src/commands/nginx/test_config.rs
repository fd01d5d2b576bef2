//! Test Nginx configuration command.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::SitesError;
use crate::sites::SiteManager;

use super::super::traits::Command;
use super::super::types::{CommandParams, CommandResult, ExecutionContext};

/// Test the Nginx configuration for syntax errors.
///
/// # Parameters
///
/// - `options` (optional): Per-call option overrides; `test` is always set
/// - `verbose`, `silent` (optional, default false)
///
/// Runs `nginx -t` plus any flags the resolved options enable.
pub struct TestNginxConfigCommand {
    manager: Arc<SiteManager>,
}

impl TestNginxConfigCommand {
    pub fn new(manager: Arc<SiteManager>) -> Self {
        Self { manager }
    }
}

impl Command for TestNginxConfigCommand {
    fn name(&self) -> &'static str {
        "nginx.test_config"
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

        debug!(request_id = %ctx.request_id, "Testing Nginx configuration");

        let status = self.manager.test(overrides.as_ref(), verbose, silent)?;

        if status == 0 {
            info!(request_id = %ctx.request_id, "Nginx configuration test passed");
        } else {
            warn!(request_id = %ctx.request_id, status, "Nginx configuration test failed");
        }

        Ok(CommandResult::from_status(
            status,
            "nginx -t",
            serde_json::json!({ "status": status }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, manager, nginx_dir, FakeRunner};

    #[test]
    fn test_command_name() {
        let dir = nginx_dir();
        let cmd = TestNginxConfigCommand::new(manager(dir.path(), FakeRunner::new(0)));
        assert_eq!(cmd.name(), "nginx.test_config");
        assert!(cmd.validate(&CommandParams::new(serde_json::json!({}))).is_ok());
    }

    #[test]
    fn test_runs_nginx_with_test_flag() {
        let dir = nginx_dir();
        let runner = FakeRunner::new(0);
        let cmd = TestNginxConfigCommand::new(manager(dir.path(), Arc::clone(&runner)));

        let params = CommandParams::new(serde_json::json!({
            "options": { "quiet": true, "test": false }
        }));
        let result = cmd.execute(&context("nginx.test_config"), params).unwrap();
        assert!(result.success);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "nginx");
        assert_eq!(calls[0].args, vec!["-q", "-t"]);
        assert!(calls[0].sudo);
    }

    #[test]
    fn test_failed_test_reports_status() {
        let dir = nginx_dir();
        let cmd = TestNginxConfigCommand::new(manager(dir.path(), FakeRunner::new(1)));
        let result = cmd
            .execute(&context("nginx.test_config"), CommandParams::new(serde_json::json!({})))
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.error_code.as_deref(), Some("NONZERO_EXIT"));
        assert_eq!(result.data.unwrap()["status"], 1);
    }
}
