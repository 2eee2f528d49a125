//! Integration configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `ONECLICK_LOG`, `ONECLICK_DEBUG`,
//!    `ONECLICK_PLATFORM`, `ONECLICK_SETTINGS`
//! 2. Config file: first existing of the search paths
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! [logging]
//! level = "info"   # error, warn, info, debug, trace
//! debug = false
//!
//! [integration]
//! dependencies = ["GamePipeline", "fbxmaya"]
//! menu_label = "Unity"
//! export_set = "UnityFbxExportSet"
//! # platform = "macos"
//! # settings_store = "~/.oneclick/settings.toml"
//! ```

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{HandoffError, HandoffResult};
use crate::export_set::EXPORT_SET_NAME;
use crate::launch::Platform;

/// Default config file locations, searched in order
pub const CONFIG_SEARCH_PATHS: &[&str] = &["oneclick.toml", ".oneclick/config.toml"];

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level filter name
    pub level: String,
    /// Force debug output regardless of `level`
    pub debug: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug: false,
        }
    }
}

impl LogConfig {
    /// Effective level filter; unknown names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        if self.debug {
            return LevelFilter::Debug;
        }
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Host integration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Host plugins the commands need, without extension
    pub dependencies: Vec<String>,
    /// Title of the menu installed in the host
    pub menu_label: String,
    /// Name of the export set
    pub export_set: String,
    /// Override of the detected platform
    pub platform: Option<String>,
    /// Option store file for hosts without their own
    pub settings_store: Option<PathBuf>,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            dependencies: vec!["GamePipeline".to_string(), "fbxmaya".to_string()],
            menu_label: "Unity".to_string(),
            export_set: EXPORT_SET_NAME.to_string(),
            platform: None,
            settings_store: None,
        }
    }
}

impl IntegrationConfig {
    /// Platform override, if configured
    pub fn platform_override(&self) -> HandoffResult<Option<Platform>> {
        self.platform.as_deref().map(str::parse).transpose()
    }

    /// Plugin file names with extension `ext`
    pub fn dependency_files(&self, ext: &str) -> Vec<String> {
        self.dependencies.iter().map(|p| format!("{}.{}", p, ext)).collect()
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OneClickConfig {
    pub logging: LogConfig,
    pub integration: IntegrationConfig,
    /// File the configuration was read from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl OneClickConfig {
    /// Load from the default search paths and the environment
    pub fn load() -> Self {
        let mut config = Self::default();

        for path in CONFIG_SEARCH_PATHS {
            match Self::load_from_file(Path::new(path)) {
                Ok(loaded) => {
                    config = loaded;
                    log::info!("Loaded config from {}", path);
                    break;
                }
                Err(HandoffError::Io(_)) => continue,
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path, e);
                }
            }
        }

        config.apply_env();
        config
    }

    /// Parse a TOML config file
    pub fn load_from_file(path: &Path) -> HandoffResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)
            .map_err(|e| HandoffError::Config(format!("{}: {}", path.display(), e)))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> HandoffResult<Self> {
        toml::from_str(content).map_err(|e| HandoffError::Config(e.to_string()))
    }

    /// Override fields from `ONECLICK_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(level) = std::env::var("ONECLICK_LOG") {
            self.logging.level = level;
        }

        if std::env::var("ONECLICK_DEBUG").map(|v| v == "1" || v == "true").unwrap_or(false) {
            self.logging.debug = true;
        }

        if let Ok(platform) = std::env::var("ONECLICK_PLATFORM") {
            if !platform.is_empty() {
                self.integration.platform = Some(platform);
            }
        }

        if let Ok(store) = std::env::var("ONECLICK_SETTINGS") {
            if !store.is_empty() {
                self.integration.settings_store = Some(PathBuf::from(store));
            }
        }
    }
}
