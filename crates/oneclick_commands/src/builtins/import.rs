//! `unityImport`: bring an FBX from the Unity project into the scene and
//! start tracking it in the export set

use std::path::{Path, PathBuf};

use serde_json::json;

use oneclick_core::{project, ImportTracker, ImportedFile, Settings};

use crate::builtins::common::{load_dependencies, with_workspace};
use crate::command::{CommandError, CommandHandler, CommandResult, Invocation};
use crate::context::CommandContext;
use crate::output::OutputLine;

pub const NAME: &str = "unityImport";

/// Import command
pub struct ImportCommand;

impl ImportCommand {
    /// An explicit path is honoured only if it names an existing `.fbx` file
    fn explicit_file(invocation: &Invocation) -> Option<PathBuf> {
        let arg = invocation.first_arg()?;
        let path = Path::new(arg);
        let is_fbx = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("fbx"))
            .unwrap_or(false);

        if is_fbx && path.is_file() {
            Some(path.to_path_buf())
        } else {
            log::debug!("Ignoring import argument {}, falling back to the dialog", arg);
            None
        }
    }
}

impl CommandHandler for ImportCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Import FBX file from Unity Project and auto-configure for exporting"
    }

    fn short_label(&self) -> &str {
        "Import"
    }

    fn icon(&self) -> &str {
        "import.png"
    }

    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        let mut lines = Vec::new();
        if let Err(e) = load_dependencies(ctx) {
            log::warn!("{}", e);
            lines.push(OutputLine::warning(e.to_string()));
        }

        let mut tracker = ImportTracker::with_export_set(ctx.export_set());

        let imported = match Self::explicit_file(invocation) {
            Some(file) => {
                tracker.begin_import(&mut *ctx.host)?;
                Some(ctx.host.import_file(&file)?)
            }
            None => {
                let project_path = ctx.settings().project_path();
                if !project_path.is_empty() && !project::is_unity_project(Path::new(&project_path)) {
                    log::warn!("{} is not a Unity project", project_path);
                    lines.push(OutputLine::warning(format!("{} is not a Unity project", project_path)));
                }
                with_workspace(ctx, &project_path, |ctx| {
                    tracker.begin_import(&mut *ctx.host)?;
                    Ok(ctx.host.import_interactive()?)
                })?
            }
        };

        let Some(ImportedFile { path, name }) = imported else {
            return Ok(CommandResult::with_message("Import cancelled").add_lines(lines));
        };

        let mut settings = Settings::new(&mut *ctx.options);
        let outcome = tracker.end_import(&mut *ctx.host, &mut settings, &path, &name)?;

        let file = Path::new(&path).join(&name);
        log::info!(
            "Imported {} ({} new objects in {})",
            file.display(),
            outcome.added.len(),
            tracker.export_set().name()
        );

        let project = outcome.project.map(|p| p.to_string_lossy().into_owned());
        Ok(CommandResult::with_message(format!("Imported {}", file.display()))
            .add_lines(lines)
            .with_data(json!({
                "file": file.to_string_lossy(),
                "added": outcome.added,
                "project": project,
            })))
    }
}
