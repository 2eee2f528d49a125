//! Settings store
//!
//! Persistent option variables live in the host application. The [`OptionStore`]
//! trait is the seam a host implements; [`Settings`] is the typed facade the
//! commands use. Only names beginning with [`SETTINGS_PREFIX`] belong to this
//! store when enumerating.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HandoffError, HandoffResult};

/// Namespace prefix for all integration settings
pub const SETTINGS_PREFIX: &str = "Unity";

/// Active Unity project directory
pub const PROJECT_PATH: &str = "UnityProject";
/// Unity editor executable
pub const APP_PATH: &str = "UnityApp";
/// Temporary save directory, relative to the project's `Assets`
pub const TEMP_SAVE_PATH: &str = "UnityTempSavePath";
/// Instruction file, relative to the project's `Assets`
pub const INSTRUCTION_PATH: &str = "UnityInstructionPath";
/// Export-settings script, relative to the project's `Assets`
pub const EXPORT_SETTINGS: &str = "UnityFbxExportSettings";

/// Temporary save directory used when none is configured
pub const DEFAULT_TEMP_SAVE_PATH: &str = "_safe_to_delete";

/// Value of an option variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    String(String),
}

impl OptionValue {
    /// String form; integers are formatted
    pub fn as_string(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

/// Host-managed persistent key-value storage
pub trait OptionStore {
    /// Read an option variable
    fn get(&self, name: &str) -> Option<OptionValue>;

    /// Write an option variable; durable once this returns
    fn set(&mut self, name: &str, value: OptionValue) -> HandoffResult<()>;

    /// All option variable names known to the store
    fn names(&self) -> Vec<String>;

    /// Check whether a variable exists
    fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// In-process option store
#[derive(Debug, Clone, Default)]
pub struct MemoryOptionStore {
    values: BTreeMap<String, OptionValue>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, name: &str) -> Option<OptionValue> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: OptionValue) -> HandoffResult<()> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Option store persisted as a TOML table
///
/// Every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileOptionStore {
    path: PathBuf,
    values: BTreeMap<String, OptionValue>,
}

impl FileOptionStore {
    /// Open a store, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> HandoffResult<Self> {
        let path = path.into();
        let values = if path.is_file() {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content).map_err(|e| {
                HandoffError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        log::debug!("Opened option store {} ({} values)", path.display(), values.len());
        Ok(Self { path, values })
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> HandoffResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(&self.values)
            .map_err(|e| HandoffError::Config(format!("failed to serialize settings: {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl OptionStore for FileOptionStore {
    fn get(&self, name: &str) -> Option<OptionValue> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: OptionValue) -> HandoffResult<()> {
        self.values.insert(name.to_string(), value);
        self.flush()
    }

    fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Typed facade over the integration's option variables
pub struct Settings<'a> {
    store: &'a mut dyn OptionStore,
}

impl<'a> Settings<'a> {
    pub fn new(store: &'a mut dyn OptionStore) -> Self {
        Self { store }
    }

    /// Read a setting as a string; absent settings read as empty
    pub fn get_string(&self, name: &str) -> String {
        self.store.get(name).map(|v| v.as_string()).unwrap_or_default()
    }

    pub fn get(&self, name: &str) -> Option<OptionValue> {
        self.store.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> HandoffResult<()> {
        self.store.set(name, value.into())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.store.exists(name)
    }

    /// All settings in the integration's namespace
    pub fn values(&self) -> BTreeMap<String, OptionValue> {
        self.store
            .names()
            .into_iter()
            .filter(|name| name.starts_with(SETTINGS_PREFIX))
            .filter_map(|name| self.store.get(&name).map(|v| (name, v)))
            .collect()
    }

    /// Write several settings at once; names outside the namespace are skipped
    pub fn set_values(&mut self, values: BTreeMap<String, OptionValue>) -> HandoffResult<()> {
        for (name, value) in values {
            if name.starts_with(SETTINGS_PREFIX) {
                self.store.set(&name, value)?;
            } else {
                log::debug!("Skipping setting outside namespace: {}", name);
            }
        }
        Ok(())
    }

    pub fn project_path(&self) -> String {
        self.get_string(PROJECT_PATH)
    }

    pub fn set_project_path(&mut self, path: &str) -> HandoffResult<()> {
        self.set(PROJECT_PATH, path)
    }

    pub fn app_path(&self) -> String {
        self.get_string(APP_PATH)
    }

    pub fn set_app_path(&mut self, path: &str) -> HandoffResult<()> {
        self.set(APP_PATH, path)
    }

    /// Temporary save directory, [`DEFAULT_TEMP_SAVE_PATH`] when unset or empty
    pub fn temp_save_path(&self) -> String {
        let path = self.get_string(TEMP_SAVE_PATH);
        if path.is_empty() {
            DEFAULT_TEMP_SAVE_PATH.to_string()
        } else {
            path
        }
    }

    pub fn set_temp_save_path(&mut self, path: &str) -> HandoffResult<()> {
        self.set(TEMP_SAVE_PATH, path)
    }

    /// Instruction file path, `None` when the setting was never written
    pub fn instruction_path(&self) -> Option<String> {
        self.get(INSTRUCTION_PATH).map(|v| v.as_string())
    }

    pub fn set_instruction_path(&mut self, path: &str) -> HandoffResult<()> {
        self.set(INSTRUCTION_PATH, path)
    }

    pub fn export_settings_file(&self) -> String {
        self.get_string(EXPORT_SETTINGS)
    }

    pub fn set_export_settings_file(&mut self, file: &str) -> HandoffResult<()> {
        self.set(EXPORT_SETTINGS, file)
    }
}
