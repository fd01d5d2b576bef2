//! Create site command.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CommandErrorKind, SitesError, ValidationErrorKind};
use crate::options::NginxOptionsPatch;
use crate::sites::SiteManager;
use crate::validation::validate_site_name;

use super::super::traits::Command;
use super::super::types::{CommandParams, CommandResult, ExecutionContext};

/// Write a site configuration to `sites-available` and enable it.
///
/// # Parameters
///
/// - `site_name` (required): The configuration file name
/// - `content` (optional): The configuration text
/// - `content_file` (optional): A file to read the configuration text from
/// - `options` (optional): Per-call option overrides
/// - `verbose`, `silent` (optional, default false)
///
/// Without `content` or `content_file`, the text is read from the resolved
/// `conf` option.
pub struct CreateSiteCommand {
    manager: Arc<SiteManager>,
}

impl CreateSiteCommand {
    pub fn new(manager: Arc<SiteManager>) -> Self {
        Self { manager }
    }

    fn content(
        &self,
        params: &CommandParams,
        overrides: Option<&NginxOptionsPatch>,
    ) -> Result<String, SitesError> {
        if let Some(content) = params.get_optional_string("content") {
            return Ok(content);
        }

        let source = match params.get_optional_string("content_file") {
            Some(path) => PathBuf::from(path),
            None => self
                .manager
                .resolve_options(&[overrides])
                .conf
                .ok_or_else(|| SitesError::Validation {
                    kind: ValidationErrorKind::MissingParameter {
                        param: "content".to_string(),
                    },
                })?,
        };

        fs::read_to_string(&source).map_err(|e| SitesError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                message: format!("Failed to read site content '{}': {}", source.display(), e),
            },
        })
    }
}

impl Command for CreateSiteCommand {
    fn name(&self) -> &'static str {
        "site.create"
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
        let silent = params.get_optional_bool("silent", false);

        let content = self.content(&params, overrides.as_ref())?;

        debug!(
            request_id = %ctx.request_id,
            site_name = %site_name,
            bytes = content.len(),
            "Creating site"
        );

        let status =
            self.manager
                .config_create(&site_name, &content, overrides.as_ref(), verbose, silent)?;

        if status == 0 {
            info!(request_id = %ctx.request_id, site_name = %site_name, "Site created");
        } else {
            warn!(
                request_id = %ctx.request_id,
                site_name = %site_name,
                status,
                "Site creation failed"
            );
        }

        Ok(CommandResult::from_status(
            status,
            "site.create",
            serde_json::json!({
                "site_name": site_name,
                "status": status,
            }),
        ))
    }
}
