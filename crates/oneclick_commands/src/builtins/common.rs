//! Steps shared by the hand-off commands

use std::fs;
use std::path::PathBuf;

use oneclick_core::{project, HandoffError, HandoffResult};

use crate::command::CommandError;
use crate::context::CommandContext;

/// Load every configured dependency plugin that is not loaded yet
///
/// Stops at the first plugin that is still missing after the load attempt.
pub fn load_dependencies(ctx: &mut CommandContext<'_>) -> HandoffResult<()> {
    for plugin in ctx.config.dependency_files(ctx.plugin_extension()) {
        if ctx.host.is_plugin_loaded(&plugin) {
            continue;
        }
        if let Err(e) = ctx.host.load_plugin(&plugin) {
            log::debug!("load_plugin {}: {}", plugin, e);
        }
        if !ctx.host.is_plugin_loaded(&plugin) {
            return Err(HandoffError::DependencyLoad(plugin));
        }
        log::debug!("Loaded {}", plugin);
    }
    Ok(())
}

/// Evaluate the export-settings script from the active project
///
/// Returns the path of the evaluated file.
pub fn load_export_settings(ctx: &mut CommandContext<'_>) -> HandoffResult<PathBuf> {
    let path = {
        let settings = ctx.settings();
        project::assets_path(settings.project_path(), settings.export_settings_file())
    };

    if !path.is_file() {
        return Err(HandoffError::MissingSettingsFile(path));
    }

    let script = fs::read_to_string(&path)?;
    ctx.host.eval_script(&script)?;
    log::debug!("Loaded export settings from {}", path.display());
    Ok(path)
}

/// Select the export set when it exists; the selection is untouched otherwise
pub fn select_export_set(ctx: &mut CommandContext<'_>) -> HandoffResult<bool> {
    let set = ctx.export_set();
    if !set.exists(&*ctx.host) {
        log::debug!("No {} in scene, keeping selection", set.name());
        return Ok(false);
    }
    ctx.host.select_set(set.name())?;
    Ok(true)
}

/// Run `f` and put the selection back the way it was, whatever `f` returns
pub fn with_restored_selection<T, F>(ctx: &mut CommandContext<'_>, f: F) -> Result<T, CommandError>
where
    F: FnOnce(&mut CommandContext<'_>) -> Result<T, CommandError>,
{
    let original = ctx.host.selection();
    let result = f(ctx);

    match ctx.host.set_selection(&original) {
        Ok(()) => result,
        Err(e) => {
            log::warn!("Failed to restore selection: {}", e);
            // keep the command's own error when both fail
            result.and(Err(e.into()))
        }
    }
}

/// Run `f` with the host workspace switched to `workspace`, restoring the
/// previous workspace afterwards
///
/// An empty `workspace` leaves the host workspace alone.
pub fn with_workspace<T, F>(ctx: &mut CommandContext<'_>, workspace: &str, f: F) -> Result<T, CommandError>
where
    F: FnOnce(&mut CommandContext<'_>) -> Result<T, CommandError>,
{
    if workspace.is_empty() {
        return f(ctx);
    }

    let previous = ctx.host.workspace();
    ctx.host.set_workspace(workspace)?;
    let result = f(ctx);

    if let Some(previous) = previous {
        if let Err(e) = ctx.host.set_workspace(&previous) {
            log::warn!("Failed to restore workspace {}: {}", previous, e);
            return result.and(Err(e.into()));
        }
    }
    result
}
