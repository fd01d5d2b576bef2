//! Command trait definition.

use crate::error::SitesError;

use super::types::{CommandParams, CommandResult, ExecutionContext};

/// Core trait for all executable commands.
///
/// # Example
///
/// ```ignore
/// pub struct MyCommand;
///
/// impl Command for MyCommand {
///     fn name(&self) -> &'static str {
///         "my.command"
///     }
///
///     fn validate(&self, params: &CommandParams) -> Result<(), SitesError> {
///         params.get_string("site_name")?;
///         Ok(())
///     }
///
///     fn execute(
///         &self,
///         ctx: &ExecutionContext,
///         params: CommandParams,
///     ) -> Result<CommandResult, SitesError> {
///         let site_name = params.get_string("site_name")?;
///         Ok(CommandResult::success(serde_json::json!({"site_name": site_name})))
///     }
/// }
/// ```
pub trait Command: Send + Sync {
    /// Unique command identifier (e.g., "site.create", "nginx.reload").
    fn name(&self) -> &'static str;

    /// Validate the command parameters before execution.
    fn validate(&self, params: &CommandParams) -> Result<(), SitesError>;

    /// Execute the command with validated parameters.
    fn execute(
        &self,
        ctx: &ExecutionContext,
        params: CommandParams,
    ) -> Result<CommandResult, SitesError>;
}
