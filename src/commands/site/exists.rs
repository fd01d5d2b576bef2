//! Site existence command.

use std::sync::Arc;

use tracing::debug;

use crate::error::SitesError;
use crate::sites::SiteManager;
use crate::validation::validate_site_name;

use super::super::traits::Command;
use super::super::types::{CommandParams, CommandResult, ExecutionContext};

/// Report whether a site configuration exists, optionally also enabled.
///
/// # Parameters
///
/// - `site_name` (required): The configuration file name
/// - `options` (optional): Per-call option overrides
/// - `check_symlink` (optional, default false): Also require the
///   `sites-enabled` symlink
pub struct SiteExistsCommand {
    manager: Arc<SiteManager>,
}

impl SiteExistsCommand {
    pub fn new(manager: Arc<SiteManager>) -> Self {
        Self { manager }
    }
}

impl Command for SiteExistsCommand {
    fn name(&self) -> &'static str {
        "site.exists"
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
        let check_symlink = params.get_optional_bool("check_symlink", false);

        let exists = self
            .manager
            .config_exists(&site_name, overrides.as_ref(), check_symlink)?;

        debug!(
            request_id = %ctx.request_id,
            site_name = %site_name,
            check_symlink,
            exists,
            "Checked site"
        );

        Ok(CommandResult::success(serde_json::json!({
            "site_name": site_name,
            "exists": exists,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, manager, nginx_dir, FakeRunner};
    use std::fs;

    fn exists(cmd: &SiteExistsCommand, check_symlink: bool) -> bool {
        let params = CommandParams::new(serde_json::json!({
            "site_name": "example.com",
            "check_symlink": check_symlink,
        }));
        let result = cmd.execute(&context("site.exists"), params).unwrap();
        result.data.unwrap()["exists"].as_bool().unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_exists_with_and_without_symlink() {
        let dir = nginx_dir();
        let cmd = SiteExistsCommand::new(manager(dir.path(), FakeRunner::new(0)));
        let available = dir.path().join("sites-available/example.com");

        assert!(!exists(&cmd, false));

        fs::write(&available, "server {}").unwrap();
        assert!(exists(&cmd, false));
        assert!(!exists(&cmd, true));

        std::os::unix::fs::symlink(&available, dir.path().join("sites-enabled/example.com"))
            .unwrap();
        assert!(exists(&cmd, true));
    }

    #[test]
    fn test_directory_is_not_a_site() {
        let dir = nginx_dir();
        fs::create_dir(dir.path().join("sites-available/example.com")).unwrap();
        let cmd = SiteExistsCommand::new(manager(dir.path(), FakeRunner::new(0)));
        assert!(!exists(&cmd, false));
    }
}
