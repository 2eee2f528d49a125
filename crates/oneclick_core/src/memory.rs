//! In-memory host
//!
//! A complete [`Host`] that keeps the scene in plain collections and records
//! every side effect instead of performing it. Used for headless runs and
//! tests of the command layer.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::{HandoffResult, HostError, HostResult};
use crate::host::{Host, ImportedFile, ObjectId, SceneHost};
use crate::launch::Platform;
use crate::menu::Menu;

/// Import the host will perform on the next import call
#[derive(Debug, Clone)]
pub enum PendingImport {
    /// Succeeds, adding `objects` to the scene
    Success { file: ImportedFile, objects: Vec<ObjectId> },
    /// User closed the dialog
    Cancelled,
    /// Importer reported an error
    Failed(String),
}

/// Host backed by in-process collections
#[derive(Debug, Clone)]
pub struct MemoryHost {
    platform: Platform,
    objects: Vec<ObjectId>,
    selection: Vec<ObjectId>,
    sets: BTreeMap<String, Vec<ObjectId>>,
    attributes: HashMap<(String, String), String>,
    workspace: Option<String>,
    loaded_plugins: HashSet<String>,
    loadable_plugins: HashSet<String>,
    pending_import: Option<PendingImport>,
    menus: BTreeMap<String, Menu>,
    /// Every workspace passed to `set_workspace`, in order
    pub workspace_changes: Vec<String>,
    /// Files passed to `import_file`
    pub imported_files: Vec<PathBuf>,
    /// Exported files with the selection at export time
    pub exports: Vec<(PathBuf, Vec<ObjectId>)>,
    /// Evaluated scripts
    pub scripts: Vec<String>,
    /// Named host commands that were run
    pub commands: Vec<String>,
    /// Command lines handed to the OS shell
    pub system_calls: Vec<String>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(Platform::Linux)
    }
}

impl MemoryHost {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            objects: Vec::new(),
            selection: Vec::new(),
            sets: BTreeMap::new(),
            attributes: HashMap::new(),
            workspace: None,
            loaded_plugins: HashSet::new(),
            loadable_plugins: HashSet::new(),
            pending_import: None,
            menus: BTreeMap::new(),
            workspace_changes: Vec::new(),
            imported_files: Vec::new(),
            exports: Vec::new(),
            scripts: Vec::new(),
            commands: Vec::new(),
            system_calls: Vec::new(),
        }
    }

    /// Add objects to the scene
    pub fn with_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ObjectId>,
    {
        self.objects.extend(objects.into_iter().map(Into::into));
        self
    }

    /// Plugins that `load_plugin` can find
    pub fn with_loadable_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loadable_plugins.extend(plugins.into_iter().map(Into::into));
        self
    }

    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Queue the outcome of the next import
    pub fn queue_import(&mut self, pending: PendingImport) {
        self.pending_import = Some(pending);
    }

    /// Add an object as if created by the user
    pub fn spawn(&mut self, object: impl Into<ObjectId>) {
        self.objects.push(object.into());
    }

    pub fn menu(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    fn take_import(&mut self) -> HostResult<Option<ImportedFile>> {
        match self.pending_import.take() {
            Some(PendingImport::Success { file, objects }) => {
                for object in objects {
                    if !self.objects.contains(&object) {
                        self.objects.push(object);
                    }
                }
                Ok(Some(file))
            }
            Some(PendingImport::Cancelled) | None => Ok(None),
            Some(PendingImport::Failed(msg)) => Err(HostError::new(msg)),
        }
    }
}

impl SceneHost for MemoryHost {
    fn scene_objects(&self) -> Vec<ObjectId> {
        self.objects.clone()
    }

    fn selection(&self) -> Vec<ObjectId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, items: &[ObjectId]) -> HostResult<()> {
        self.selection = items.to_vec();
        Ok(())
    }

    fn select_set(&mut self, name: &str) -> HostResult<()> {
        let members = self
            .sets
            .get(name)
            .ok_or_else(|| HostError::new(format!("No object matches name: {}", name)))?;
        self.selection = members.clone();
        Ok(())
    }

    fn set_exists(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    fn create_set(&mut self, name: &str) -> HostResult<()> {
        self.sets.entry(name.to_string()).or_default();
        Ok(())
    }

    fn add_to_set(&mut self, name: &str, items: &[ObjectId]) -> HostResult<()> {
        let members = self
            .sets
            .get_mut(name)
            .ok_or_else(|| HostError::new(format!("No set named {}", name)))?;
        for item in items {
            if !members.contains(item) {
                members.push(item.clone());
            }
        }
        Ok(())
    }

    fn set_members(&self, name: &str) -> Vec<ObjectId> {
        self.sets.get(name).cloned().unwrap_or_default()
    }

    fn attribute(&self, node: &str, attr: &str) -> Option<String> {
        self.attributes.get(&(node.to_string(), attr.to_string())).cloned()
    }

    fn set_attribute(&mut self, node: &str, attr: &str, value: &str) -> HostResult<()> {
        if !self.sets.contains_key(node) && !self.objects.iter().any(|o| o == node) {
            return Err(HostError::new(format!("No object matches name: {}", node)));
        }
        self.attributes.insert((node.to_string(), attr.to_string()), value.to_string());
        Ok(())
    }
}

impl Host for MemoryHost {
    fn platform(&self) -> HandoffResult<Platform> {
        Ok(self.platform)
    }

    fn workspace(&self) -> Option<String> {
        self.workspace.clone()
    }

    fn set_workspace(&mut self, path: &str) -> HostResult<()> {
        self.workspace = Some(path.to_string());
        self.workspace_changes.push(path.to_string());
        Ok(())
    }

    fn is_plugin_loaded(&self, plugin: &str) -> bool {
        self.loaded_plugins.contains(plugin)
    }

    fn load_plugin(&mut self, plugin: &str) -> HostResult<()> {
        if self.loadable_plugins.contains(plugin) {
            self.loaded_plugins.insert(plugin.to_string());
            Ok(())
        } else {
            Err(HostError::new(format!("Plugin not found: {}", plugin)))
        }
    }

    fn import_file(&mut self, file: &Path) -> HostResult<ImportedFile> {
        self.imported_files.push(file.to_path_buf());
        match self.take_import()? {
            Some(imported) => Ok(imported),
            None => Ok(ImportedFile::from_file(file)),
        }
    }

    fn import_interactive(&mut self) -> HostResult<Option<ImportedFile>> {
        self.take_import()
    }

    fn export_selection(&mut self, file: &Path) -> HostResult<()> {
        self.exports.push((file.to_path_buf(), self.selection.clone()));
        Ok(())
    }

    fn eval_script(&mut self, source: &str) -> HostResult<()> {
        self.scripts.push(source.to_string());
        Ok(())
    }

    fn run_command(&mut self, name: &str) -> HostResult<()> {
        self.commands.push(name.to_string());
        Ok(())
    }

    fn system(&mut self, command_line: &str) -> HandoffResult<()> {
        self.system_calls.push(command_line.to_string());
        Ok(())
    }

    fn install_menu(&mut self, menu: &Menu) -> HostResult<()> {
        self.menus.insert(menu.name.clone(), menu.clone());
        Ok(())
    }

    fn remove_menu(&mut self, name: &str) -> HostResult<()> {
        self.menus.remove(name);
        Ok(())
    }

    fn has_menu(&self, name: &str) -> bool {
        self.menus.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_membership_is_idempotent() {
        let mut host = MemoryHost::default().with_objects(["a", "b"]);
        host.create_set("s").unwrap();
        host.add_to_set("s", &["a".to_string()]).unwrap();
        host.add_to_set("s", &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(host.set_members("s"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_cancelled_import() {
        let mut host = MemoryHost::default();
        host.queue_import(PendingImport::Cancelled);
        assert_eq!(host.import_interactive().unwrap(), None);
    }

    #[test]
    fn test_plugin_loading() {
        let mut host = MemoryHost::default().with_loadable_plugins(["fbxmaya.mll"]);
        assert!(host.load_plugin("fbxmaya.mll").is_ok());
        assert!(host.is_plugin_loaded("fbxmaya.mll"));
        assert!(host.load_plugin("GamePipeline.mll").is_err());
    }
}
