//! Execution context
//!
//! Borrowed view of the host, the option store and the configuration for a
//! single command run.

use oneclick_core::launch::DEFAULT_PLUGIN_EXTENSION;
use oneclick_core::{ExportSet, HandoffResult, Host, IntegrationConfig, OptionStore, Platform, Settings};

/// Everything a command may touch while it runs
pub struct CommandContext<'a> {
    pub host: &'a mut dyn Host,
    pub options: &'a mut dyn OptionStore,
    pub config: &'a IntegrationConfig,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        host: &'a mut dyn Host,
        options: &'a mut dyn OptionStore,
        config: &'a IntegrationConfig,
    ) -> Self {
        Self {
            host,
            options,
            config,
        }
    }

    /// Typed settings over the option store
    pub fn settings(&mut self) -> Settings<'_> {
        Settings::new(&mut *self.options)
    }

    /// Platform to build launch commands for; the config override wins
    pub fn platform(&self) -> HandoffResult<Platform> {
        match self.config.platform_override()? {
            Some(platform) => Ok(platform),
            None => self.host.platform(),
        }
    }

    /// Extension of dependency plugins
    ///
    /// Only macOS differs; a platform without a launch implementation still
    /// loads `.mll` plugins.
    pub fn plugin_extension(&self) -> &'static str {
        let platform = match self.config.platform.as_deref() {
            Some(name) => name.parse(),
            None => self.host.platform(),
        };
        platform
            .map(|p| p.plugin_extension())
            .unwrap_or(DEFAULT_PLUGIN_EXTENSION)
    }

    /// The export set named in the configuration
    pub fn export_set(&self) -> ExportSet {
        ExportSet::new(self.config.export_set.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneclick_core::{MemoryHost, MemoryOptionStore};

    #[test]
    fn test_platform_override_wins() {
        let mut host = MemoryHost::new(Platform::Linux);
        let mut store = MemoryOptionStore::new();
        let config = IntegrationConfig {
            platform: Some("macos".into()),
            ..Default::default()
        };

        let ctx = CommandContext::new(&mut host, &mut store, &config);
        assert_eq!(ctx.platform().unwrap(), Platform::MacOs);
    }

    #[test]
    fn test_platform_from_host() {
        let mut host = MemoryHost::new(Platform::Windows);
        let mut store = MemoryOptionStore::new();
        let config = IntegrationConfig::default();

        let ctx = CommandContext::new(&mut host, &mut store, &config);
        assert_eq!(ctx.platform().unwrap(), Platform::Windows);
        assert_eq!(ctx.export_set().name(), "UnityFbxExportSet");
    }

    #[test]
    fn test_plugin_extension_on_unknown_platform() {
        let mut host = MemoryHost::new(Platform::MacOs);
        let mut store = MemoryOptionStore::new();
        let config = IntegrationConfig {
            platform: Some("freebsd".into()),
            ..Default::default()
        };

        let ctx = CommandContext::new(&mut host, &mut store, &config);
        assert!(ctx.platform().is_err());
        assert_eq!(ctx.plugin_extension(), "mll");
    }

    #[test]
    fn test_plugin_extension_macos() {
        let mut host = MemoryHost::new(Platform::MacOs);
        let mut store = MemoryOptionStore::new();
        let config = IntegrationConfig::default();

        let ctx = CommandContext::new(&mut host, &mut store, &config);
        assert_eq!(ctx.plugin_extension(), "bundle");
    }
}
