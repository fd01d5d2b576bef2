//! Command registry for dispatching requests to handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CommandErrorKind, SitesError};
use crate::sites::SiteManager;

use super::nginx::{NginxControlCommand, TestNginxConfigCommand};
use super::redirect::GenerateRedirectCommand;
use super::site::{CreateSiteCommand, DeleteSiteCommand, SiteExistsCommand};
use super::traits::Command;
use super::types::{CommandParams, CommandResult, ExecutionContext};

/// Registry of all available commands.
#[derive(Clone)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with every built-in command bound to `manager`.
    pub fn new(manager: Arc<SiteManager>) -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
        };

        // Site commands
        registry.register(Arc::new(CreateSiteCommand::new(Arc::clone(&manager))));
        registry.register(Arc::new(DeleteSiteCommand::new(Arc::clone(&manager))));
        registry.register(Arc::new(SiteExistsCommand::new(Arc::clone(&manager))));

        // Nginx commands
        registry.register(Arc::new(TestNginxConfigCommand::new(Arc::clone(&manager))));
        for command in NginxControlCommand::all(&manager) {
            registry.register(Arc::new(command));
        }

        // Redirect commands
        registry.register(Arc::new(GenerateRedirectCommand));

        info!(
            count = registry.commands.len(),
            "Command registry initialized"
        );

        registry
    }

    /// Register a command.
    fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name();
        debug!(command = name, "Registering command");
        self.commands.insert(name, command);
    }

    /// Dispatch a request to the appropriate command handler.
    pub fn dispatch(
        &self,
        ctx: &ExecutionContext,
        command_name: &str,
        params: CommandParams,
    ) -> Result<CommandResult, SitesError> {
        let command = self
            .commands
            .get(command_name)
            .ok_or_else(|| SitesError::Command {
                kind: CommandErrorKind::UnknownCommand {
                    name: command_name.to_string(),
                },
            })?;

        command.validate(&params)?;

        command.execute(ctx, params)
    }

    /// List all registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
