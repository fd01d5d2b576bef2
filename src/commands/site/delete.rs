//! Delete site command.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::SitesError;
use crate::sites::SiteManager;
use crate::validation::validate_site_name;

use super::super::traits::Command;
use super::super::types::{CommandParams, CommandResult, ExecutionContext};

/// Remove a site configuration and its `sites-enabled` symlink.
///
/// # Parameters
///
/// - `site_name` (required): The configuration file name
/// - `options` (optional): Per-call option overrides
/// - `verbose` (optional, default false)
pub struct DeleteSiteCommand {
    manager: Arc<SiteManager>,
}

impl DeleteSiteCommand {
    pub fn new(manager: Arc<SiteManager>) -> Self {
        Self { manager }
    }
}

impl Command for DeleteSiteCommand {
    fn name(&self) -> &'static str {
        "site.delete"
    }

    fn validate(&self, params: &CommandParams) -> Result<(), SitesError> {
        let site_name = params.get_string("site_name")?;
        validate_site_name(&site_name)?;
        params.get_options_patch()?;
        Ok(())
    }

    fn execute(
        &self,
        ctx: &ExecutionContext,
        params: CommandParams,
    ) -> Result<CommandResult, SitesError> {
        let site_name = params.get_string("site_name")?;
        validate_site_name(&site_name)?;
        let overrides = params.get_options_patch()?;
        let verbose = params.get_optional_bool("verbose", false);

        debug!(request_id = %ctx.request_id, site_name = %site_name, "Deleting site");

        let status = self
            .manager
            .config_delete(&site_name, overrides.as_ref(), verbose)?;

        if status == 0 {
            info!(request_id = %ctx.request_id, site_name = %site_name, "Site deleted");
        } else {
            warn!(
                request_id = %ctx.request_id,
                site_name = %site_name,
                status,
                "Site deletion failed"
            );
        }

        Ok(CommandResult::from_status(
            status,
            "site.delete",
            serde_json::json!({
                "site_name": site_name,
                "status": status,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, manager, nginx_dir, FakeRunner};
    use std::fs;

    #[test]
    fn test_validate_missing_site_name() {
        let dir = nginx_dir();
        let cmd = DeleteSiteCommand::new(manager(dir.path(), FakeRunner::new(0)));
        assert_eq!(cmd.name(), "site.delete");
        assert!(cmd.validate(&CommandParams::new(serde_json::json!({}))).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_removes_file_and_symlink() {
        let dir = nginx_dir();
        let available = dir.path().join("sites-available/example.com");
        let enabled = dir.path().join("sites-enabled/example.com");
        fs::write(&available, "server {}").unwrap();
        std::os::unix::fs::symlink(&available, &enabled).unwrap();

        let cmd = DeleteSiteCommand::new(manager(dir.path(), FakeRunner::new(0)));
        let params = CommandParams::new(serde_json::json!({ "site_name": "example.com" }));
        let result = cmd.execute(&context("site.delete"), params).unwrap();

        assert!(result.success);
        assert!(!available.exists());
        assert!(fs::symlink_metadata(&enabled).is_err());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = DeleteSiteCommand::new(manager(dir.path(), FakeRunner::new(0)));
        let params = CommandParams::new(serde_json::json!({ "site_name": "example.com" }));
        let result = cmd.execute(&context("site.delete"), params);
        assert!(matches!(result, Err(SitesError::DirectoryNotFound { .. })));
    }
}
