//! Plugin lifecycle
//!
//! [`OneClickPlugin`] is what the host loads: `initialize` registers the
//! commands and installs the menu, `uninitialize` undoes both.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use oneclick_core::{FileOptionStore, HandoffError, HandoffResult, Host, HostError, OneClickConfig, OptionStore};

use crate::command::{CommandError, CommandResult, Invocation};
use crate::context::CommandContext;
use crate::registry::CommandRegistry;
use crate::ui::{self, MENU_NAME};

/// Plugin identity reported to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub vendor: &'static str,
    pub version: &'static str,
}

pub static PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "unity.unityOneClick",
    vendor: "Unity Technology Aps.",
    version: "0.04a-sprint16",
};

/// Plugin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    /// Commands not registered
    Unloaded,
    /// Commands registered and menu installed
    Loaded,
    /// Initialization failed half way; only `uninitialize` is allowed
    Failed,
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Invalid plugin transition from {from:?} to {to:?}")]
    InvalidTransition { from: PluginState, to: PluginState },

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// The OneClick plugin
pub struct OneClickPlugin {
    config: OneClickConfig,
    registry: Arc<RwLock<CommandRegistry>>,
    state: PluginState,
}

impl OneClickPlugin {
    pub fn new(config: OneClickConfig) -> Self {
        Self {
            config,
            registry: Arc::new(RwLock::new(CommandRegistry::new())),
            state: PluginState::Unloaded,
        }
    }

    /// Plugin configured from the config search paths and `ONECLICK_*` variables
    pub fn from_environment() -> Self {
        Self::new(OneClickConfig::load())
    }

    pub fn info(&self) -> &'static PluginInfo {
        &PLUGIN_INFO
    }

    pub fn state(&self) -> PluginState {
        self.state
    }

    pub fn config(&self) -> &OneClickConfig {
        &self.config
    }

    /// Shared handle to the command registry
    pub fn registry(&self) -> Arc<RwLock<CommandRegistry>> {
        Arc::clone(&self.registry)
    }

    /// Register the commands and install the menu
    pub fn initialize(&mut self, host: &mut dyn Host) -> Result<(), PluginError> {
        if self.state != PluginState::Unloaded {
            return Err(PluginError::InvalidTransition {
                from: self.state,
                to: PluginState::Loaded,
            });
        }

        oneclick_core::init_logging(&self.config.logging);
        log::info!("Loading {} {}", PLUGIN_INFO.name, PLUGIN_INFO.version);

        let menu = {
            let mut registry = self.registry.write();
            registry.register_builtins();
            ui::build_menu(&registry, &self.config.integration.menu_label)
        };

        if let Err(e) = host.install_menu(&menu) {
            log::warn!("Failed to install menu {}: {}", MENU_NAME, e);
            self.state = PluginState::Failed;
            return Err(e.into());
        }

        self.state = PluginState::Loaded;
        Ok(())
    }

    /// Remove the menu and unregister every command
    pub fn uninitialize(&mut self, host: &mut dyn Host) -> Result<(), PluginError> {
        if self.state == PluginState::Unloaded {
            return Err(PluginError::InvalidTransition {
                from: self.state,
                to: PluginState::Unloaded,
            });
        }

        if host.has_menu(MENU_NAME) {
            host.remove_menu(MENU_NAME)?;
        }
        self.registry.write().clear();

        log::info!("Unloaded {}", PLUGIN_INFO.name);
        self.state = PluginState::Unloaded;
        Ok(())
    }

    /// Run a registered command against `host`
    pub fn execute(
        &self,
        invocation: &Invocation,
        host: &mut dyn Host,
        options: &mut dyn OptionStore,
    ) -> Result<CommandResult, CommandError> {
        if self.state != PluginState::Loaded {
            return Err(CommandError::NotLoaded);
        }

        let mut ctx = CommandContext::new(host, options, &self.config.integration);
        self.registry.read().execute(invocation, &mut ctx)
    }

    /// Open the option store file named by `integration.settings_store`
    pub fn open_settings_store(&self) -> HandoffResult<Option<FileOptionStore>> {
        self.config
            .integration
            .settings_store
            .as_ref()
            .map(|path| FileOptionStore::open(path.clone()))
            .transpose()
    }

    /// Run a command for a host without option storage of its own
    ///
    /// Settings are read from and written back to the configured store file.
    pub fn execute_with_settings_file(
        &self,
        invocation: &Invocation,
        host: &mut dyn Host,
    ) -> Result<CommandResult, CommandError> {
        let mut store = self.open_settings_store()?.ok_or_else(|| {
            HandoffError::MissingSetting("No settings store configured".to_string())
        })?;
        self.execute(invocation, host, &mut store)
    }
}

impl Default for OneClickPlugin {
    fn default() -> Self {
        Self::new(OneClickConfig::default())
    }
}
