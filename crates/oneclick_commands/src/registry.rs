//! Command registry
//!
//! Maps host command names to handlers and dispatches invocations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::builtins;
use crate::command::{CommandError, CommandHandler, CommandResult, Invocation};
use crate::context::CommandContext;

/// Registered command handlers
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    aliases: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Create a registry with the hand-off commands and their runtime aliases
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register the hand-off commands
    ///
    /// Commands already present are left alone.
    pub fn register_builtins(&mut self) {
        for handler in builtins::all() {
            let name = handler.name().to_string();
            if let Err(e) = self.register(handler) {
                log::debug!("Skipping {}: {}", name, e);
            }
        }

        for (alias, target) in builtins::RUNTIME_ALIASES {
            self.add_alias(alias, target);
        }
    }

    /// Register a command handler
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) -> Result<(), CommandError> {
        let name = handler.name().to_string();
        if self.handlers.contains_key(&name) {
            return Err(CommandError::AlreadyRegistered(name));
        }
        log::debug!("Registered command {}", name);
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Unregister a command handler and every alias pointing at it
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        let handler = self.handlers.remove(name)?;
        self.aliases.retain(|_, target| target != name);
        log::debug!("Unregistered command {}", name);
        Some(handler)
    }

    /// Unregister every command
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.aliases.clear();
    }

    pub fn add_alias(&mut self, alias: &str, target: &str) {
        self.aliases.insert(alias.to_string(), target.to_string());
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Resolve an alias to its command name
    pub fn resolve<'n>(&'n self, name: &'n str) -> &'n str {
        self.aliases.get(name).map(|s| s.as_str()).unwrap_or(name)
    }

    /// Execute a command
    pub fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        let handler = self
            .get_handler(&invocation.name)
            .ok_or_else(|| CommandError::UnknownCommand(invocation.name.clone()))?;

        log::debug!("Running {} {:?}", handler.name(), invocation.args);
        let result = handler.execute(invocation, ctx);
        if let Err(e) = &result {
            log::debug!("{} failed: {}", handler.name(), e);
        }
        result
    }

    /// Get completions for partial input
    pub fn complete(&self, partial: &str) -> Vec<String> {
        let partial_lower = partial.to_lowercase();
        let mut completions: Vec<String> = self
            .handlers
            .keys()
            .chain(self.aliases.keys())
            .filter(|name| name.to_lowercase().starts_with(&partial_lower))
            .cloned()
            .collect();

        completions.sort();
        completions.dedup();
        completions
    }

    /// All command names, sorted
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(self.resolve(name))
    }

    /// Get handler for a command
    pub fn get_handler(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(self.resolve(name)).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
