pub mod args;
pub mod commands;
pub mod output;
pub mod registry;
pub mod table;
pub mod views;

use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::services::ServiceError;
use crate::core::{Clock, SystemClock};
use crate::errors::ResultsError;

use registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("unknown command `{name}`{}", hint(.suggestion))]
    UnknownCommand {
        name: String,
        suggestion: Option<&'static str>,
    },
    #[error(transparent)]
    Results(#[from] ResultsError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

fn hint(suggestion: &Option<&'static str>) -> String {
    suggestion
        .map(|name| format!(" (did you mean `{name}`?)"))
        .unwrap_or_default()
}

pub type CommandResult = Result<(), CliError>;

/// State shared by every command handler for one invocation.
pub struct CliContext {
    pub registry: CommandRegistry,
    pub config: ConfigManager,
    clock: Box<dyn Clock>,
}

impl CliContext {
    pub fn new(config: ConfigManager, clock: Box<dyn Clock>) -> Self {
        Self {
            registry: CommandRegistry::new(commands::definitions()),
            config,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn load_config(&self) -> Result<Config, CliError> {
        Ok(self.config.load()?)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Runs one command line. An empty line shows the help overview.
    pub fn dispatch(&mut self, tokens: &[&str]) -> CommandResult {
        let Some((first, rest)) = tokens.split_first() else {
            return commands::print_overview(self);
        };
        let name = first.to_lowercase();
        let handler = match self.command(&name) {
            Some(entry) => entry.handler,
            None => {
                return Err(CliError::UnknownCommand {
                    name: first.to_string(),
                    suggestion: self.registry.suggest(first),
                })
            }
        };
        tracing::debug!(command = %name, args = rest.len(), "dispatching");
        handler(self, rest)
    }
}

/// Entry point for the binary: reads the process arguments and runs them
/// against the on-disk configuration and the system clock.
pub fn run_cli() -> CommandResult {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = args.iter().map(String::as_str).collect();
    let mut context = CliContext::new(ConfigManager::new()?, Box::new(SystemClock));
    context.dispatch(&tokens)
}
