//! Unity project resolution
//!
//! A Unity project is any directory with an `Assets` subdirectory. When a file
//! is imported from inside a project, walking up from it finds a path segment
//! literally named `Assets`; its parent is the project root.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::HandoffResult;
use crate::settings::Settings;

/// Name of the asset directory inside a Unity project
pub const ASSETS_DIR: &str = "Assets";

/// Find the project root above `path`
///
/// Splits off the trailing component; when it is `Assets` the remaining head
/// is the project. Otherwise ascends one level and repeats. Stops once the
/// head is empty or is the filesystem root, so the root itself is never a
/// project.
pub fn find_project_root(path: &Path) -> Option<PathBuf> {
    let mut head = path.parent()?;
    let mut tail = path.file_name();

    while !head.as_os_str().is_empty() && head.parent().is_some() {
        if tail == Some(OsStr::new(ASSETS_DIR)) {
            return Some(head.to_path_buf());
        }
        tail = head.file_name();
        head = head.parent()?;
    }

    None
}

/// Resolve the project of an imported file and make it the active project
///
/// Leaves the active project untouched when no `Assets` segment is found.
pub fn update_project_from_import(
    settings: &mut Settings<'_>,
    imported: &Path,
) -> HandoffResult<Option<PathBuf>> {
    let Some(root) = find_project_root(imported) else {
        log::debug!("No Unity project above {}", imported.display());
        return Ok(None);
    };

    let root_str = root.to_string_lossy();
    if settings.project_path() != root_str {
        log::info!("Switching Unity project to {}", root_str);
    }
    settings.set_project_path(&root_str)?;
    Ok(Some(root))
}

/// Check whether `dir` looks like a Unity project
pub fn is_unity_project(dir: &Path) -> bool {
    dir.join(ASSETS_DIR).is_dir()
}

/// Path of `relative` inside the project's `Assets` directory
pub fn assets_path(project: impl AsRef<Path>, relative: impl AsRef<Path>) -> PathBuf {
    project.as_ref().join(ASSETS_DIR).join(relative)
}
