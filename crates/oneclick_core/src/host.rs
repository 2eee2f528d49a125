//! Host application seams
//!
//! The DCC application (Maya, Blender, ...) owns the scene graph, the file
//! importers/exporters and the UI. An integration implements these traits on
//! top of the host's scripting API; the rest of the workspace only talks to
//! the host through them.

use std::path::{Path, PathBuf};

use crate::error::{HandoffResult, HostResult};
use crate::launch::{self, Platform};
use crate::menu::Menu;

/// Identifier of a scene object as reported by the host
pub type ObjectId = String;

/// A file the host finished importing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    /// Resolved directory of the file
    pub path: String,
    /// Resolved file name
    pub name: String,
}

impl ImportedFile {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Split a full file path into directory and name
    pub fn from_file(file: &Path) -> Self {
        let path = file
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn full_path(&self) -> PathBuf {
        Path::new(&self.path).join(&self.name)
    }
}

/// Scene graph subset used for export-set bookkeeping
pub trait SceneHost {
    /// Every transform/object currently in the scene
    fn scene_objects(&self) -> Vec<ObjectId>;

    /// Current selection, in selection order
    fn selection(&self) -> Vec<ObjectId>;

    /// Replace the selection; an empty slice clears it
    fn set_selection(&mut self, items: &[ObjectId]) -> HostResult<()>;

    /// Replace the selection with a named set
    fn select_set(&mut self, name: &str) -> HostResult<()>;

    fn set_exists(&self, name: &str) -> bool;

    /// Create an empty named set
    fn create_set(&mut self, name: &str) -> HostResult<()>;

    /// Add objects to a set; adding an existing member is a no-op
    fn add_to_set(&mut self, name: &str, items: &[ObjectId]) -> HostResult<()>;

    fn set_members(&self, name: &str) -> Vec<ObjectId>;

    /// Read a string attribute, `None` when the attribute does not exist
    fn attribute(&self, node: &str, attr: &str) -> Option<String>;

    /// Write a string attribute, creating it when missing
    fn set_attribute(&mut self, node: &str, attr: &str, value: &str) -> HostResult<()>;
}

/// Full host command surface used by the hand-off commands
pub trait Host: SceneHost {
    /// Platform the host runs on
    fn platform(&self) -> HandoffResult<Platform> {
        Platform::current()
    }

    /// Current workspace / project directory of the host
    fn workspace(&self) -> Option<String>;

    fn set_workspace(&mut self, path: &str) -> HostResult<()>;

    fn is_plugin_loaded(&self, plugin: &str) -> bool;

    fn load_plugin(&mut self, plugin: &str) -> HostResult<()>;

    /// Import a file without user interaction
    fn import_file(&mut self, file: &Path) -> HostResult<ImportedFile>;

    /// Run the host's import dialog; `None` when the user cancelled
    fn import_interactive(&mut self) -> HostResult<Option<ImportedFile>>;

    /// Export the current selection as FBX, overwriting `file`
    fn export_selection(&mut self, file: &Path) -> HostResult<()>;

    /// Evaluate a script in the host's macro language
    fn eval_script(&mut self, source: &str) -> HostResult<()>;

    /// Run a named host command (e.g. one provided by another plugin)
    fn run_command(&mut self, name: &str) -> HostResult<()>;

    /// Hand a command line to the OS shell
    fn system(&mut self, command_line: &str) -> HandoffResult<()> {
        launch::spawn_detached(command_line)
    }

    fn install_menu(&mut self, menu: &Menu) -> HostResult<()>;

    fn remove_menu(&mut self, name: &str) -> HostResult<()>;

    fn has_menu(&self, name: &str) -> bool;
}
