//! Export set tracking
//!
//! The export set is a named host set holding the objects that belong to the
//! asset being handed off. An import is bracketed by [`ImportTracker::begin_import`]
//! and [`ImportTracker::end_import`]; whatever appeared in the scene in between
//! joins the set, and the set remembers which file it came from.
//!
//! If the host import fails or is cancelled, `end_import` is simply not
//! called. The provenance attributes then stay empty from `begin_import`,
//! which is a valid state to retry from.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{HandoffError, HandoffResult};
use crate::host::{ObjectId, SceneHost};
use crate::project;
use crate::settings::Settings;

/// Default export set name
pub const EXPORT_SET_NAME: &str = "UnityFbxExportSet";
/// Attribute holding the source directory of the last import
pub const FILE_PATH_ATTR: &str = "unityFbxFilePath";
/// Attribute holding the source file name of the last import
pub const FILE_NAME_ATTR: &str = "unityFbxFileName";

/// Provenance stored on the export set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub name: String,
}

impl SourceFile {
    /// Both parts are present
    pub fn is_complete(&self) -> bool {
        !self.path.is_empty() && !self.name.is_empty()
    }

    pub fn full_path(&self) -> PathBuf {
        Path::new(&self.path).join(&self.name)
    }
}

/// Handle to the export set inside a host scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSet {
    name: String,
}

impl Default for ExportSet {
    fn default() -> Self {
        Self::new(EXPORT_SET_NAME)
    }
}

impl ExportSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists<H: SceneHost + ?Sized>(&self, host: &H) -> bool {
        host.set_exists(&self.name)
    }

    /// Create the set if it is missing
    pub fn ensure<H: SceneHost + ?Sized>(&self, host: &mut H) -> HandoffResult<()> {
        if !host.set_exists(&self.name) {
            log::debug!("Creating export set {}", self.name);
            host.create_set(&self.name)?;
        }
        Ok(())
    }

    pub fn members<H: SceneHost + ?Sized>(&self, host: &H) -> Vec<ObjectId> {
        host.set_members(&self.name)
    }

    /// Provenance of the last import, `None` when the set has no attributes
    pub fn source<H: SceneHost + ?Sized>(&self, host: &H) -> Option<SourceFile> {
        let path = host.attribute(&self.name, FILE_PATH_ATTR);
        let name = host.attribute(&self.name, FILE_NAME_ATTR);
        if path.is_none() && name.is_none() {
            return None;
        }
        Some(SourceFile {
            path: path.unwrap_or_default(),
            name: name.unwrap_or_default(),
        })
    }

    pub fn store_path<H: SceneHost + ?Sized>(&self, host: &mut H, path: &str) -> HandoffResult<()> {
        host.set_attribute(&self.name, FILE_PATH_ATTR, path)?;
        Ok(())
    }

    pub fn store_name<H: SceneHost + ?Sized>(&self, host: &mut H, name: &str) -> HandoffResult<()> {
        host.set_attribute(&self.name, FILE_NAME_ATTR, name)?;
        Ok(())
    }

    /// Clear both provenance attributes
    pub fn reset_source<H: SceneHost + ?Sized>(&self, host: &mut H) -> HandoffResult<()> {
        self.store_path(host, "")?;
        self.store_name(host, "")
    }

    /// Full path of the model the set was imported from, empty when unknown
    pub fn current_model_path<H: SceneHost + ?Sized>(&self, host: &H) -> String {
        match self.source(host) {
            Some(source) if source.is_complete() => source.full_path().to_string_lossy().into_owned(),
            _ => String::new(),
        }
    }

    /// Point the set at another model file
    pub fn set_current_model_path<H: SceneHost + ?Sized>(&self, host: &mut H, file: &Path) -> HandoffResult<()> {
        if !self.exists(host) {
            log::debug!("No export set to store {} on", file.display());
            return Ok(());
        }
        let head = file.parent().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        let tail = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        self.store_path(host, &head)?;
        self.store_name(host, &tail)
    }
}

/// Result of a finished import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Objects newly added to the export set
    pub added: Vec<ObjectId>,
    /// Project the import resolved to, if any
    pub project: Option<PathBuf>,
}

/// Two-phase import bookkeeping around a host import call
#[derive(Debug, Default)]
pub struct ImportTracker {
    export_set: ExportSet,
    snapshot: Option<HashSet<ObjectId>>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export_set(export_set: ExportSet) -> Self {
        Self {
            export_set,
            snapshot: None,
        }
    }

    pub fn export_set(&self) -> &ExportSet {
        &self.export_set
    }

    /// A snapshot has been taken
    pub fn is_started(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Snapshot the scene and prepare the export set for a new import
    pub fn begin_import<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> HandoffResult<()> {
        let snapshot: HashSet<ObjectId> = host.scene_objects().into_iter().collect();
        log::debug!("begin_import: {} objects in scene", snapshot.len());
        self.snapshot = Some(snapshot);

        self.export_set.ensure(host)?;
        self.export_set.reset_source(host)
    }

    /// Record what the import added and where it came from
    ///
    /// Objects present at `begin_import` and objects already in the set are
    /// never added again, so repeated calls are harmless.
    pub fn end_import<H: SceneHost + ?Sized>(
        &mut self,
        host: &mut H,
        settings: &mut Settings<'_>,
        source_path: &str,
        source_name: &str,
    ) -> HandoffResult<ImportOutcome> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| HandoffError::NoImportInProgress(self.export_set.name().to_string()))?;

        let mut outcome = ImportOutcome::default();

        if self.export_set.exists(host) {
            let members: HashSet<ObjectId> = self.export_set.members(host).into_iter().collect();
            let mut seen = HashSet::new();
            let new_items: Vec<ObjectId> = host
                .scene_objects()
                .into_iter()
                .filter(|item| !snapshot.contains(item) && !members.contains(item))
                .filter(|item| seen.insert(item.clone()))
                .collect();

            if !new_items.is_empty() {
                log::debug!("Adding {} objects to {}", new_items.len(), self.export_set.name());
                host.add_to_set(self.export_set.name(), &new_items)?;
            }
            outcome.added = new_items;
        }

        if !source_path.is_empty() {
            outcome.project = project::update_project_from_import(settings, Path::new(source_path))?;
            self.export_set.store_path(host, source_path)?;
        }
        self.export_set.store_name(host, source_name)?;

        Ok(outcome)
    }
}
