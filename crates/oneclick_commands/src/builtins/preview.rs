//! `unityPreview`: export the tracked asset to a scratch file and show it on
//! Unity's turntable

use std::fs;
use std::path::PathBuf;

use serde_json::json;

use oneclick_core::launch::TURNTABLE_METHOD;
use oneclick_core::{project, HandoffError, LaunchDescriptor};

use crate::builtins::common::{load_dependencies, load_export_settings, select_export_set, with_restored_selection};
use crate::command::{CommandError, CommandHandler, CommandResult, Invocation};
use crate::context::CommandContext;

pub const NAME: &str = "unityPreview";

/// File the turntable picks up from the temp save directory
pub const TURNTABLE_MODEL_FILE: &str = "TurnTableModel.fbx";

pub const MISSING_INSTRUCTION_PATH: &str =
    "Missing Unity instruction file path, please re-install integration.";

/// Preview command
pub struct PreviewCommand;

/// Settings snapshot taken before anything touches the scene
struct PreviewPaths {
    app: String,
    project: String,
    temp_dir: PathBuf,
    instruction_file: PathBuf,
}

impl PreviewPaths {
    fn read(ctx: &mut CommandContext<'_>) -> Result<Self, HandoffError> {
        let settings = ctx.settings();
        let instruction = settings
            .instruction_path()
            .ok_or_else(|| HandoffError::MissingSetting(MISSING_INSTRUCTION_PATH.to_string()))?;

        let project = settings.project_path();
        Ok(Self {
            app: settings.app_path(),
            temp_dir: project::assets_path(&project, settings.temp_save_path()),
            instruction_file: project::assets_path(&project, instruction),
            project,
        })
    }
}

impl CommandHandler for PreviewCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Preview Model in Unity window"
    }

    fn short_label(&self) -> &str {
        "Preview"
    }

    fn icon(&self) -> &str {
        "preview.png"
    }

    fn execute(
        &self,
        _invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        let paths = PreviewPaths::read(ctx)?;

        load_dependencies(ctx)?;
        load_export_settings(ctx)?;

        with_restored_selection(ctx, |ctx| {
            select_export_set(ctx)?;

            fs::create_dir_all(&paths.temp_dir)?;
            let model = std::path::absolute(paths.temp_dir.join(TURNTABLE_MODEL_FILE))?;
            ctx.host.export_selection(&model)?;
            log::debug!("Saved preview model to {}", model.display());

            if let Some(parent) = paths.instruction_file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&paths.instruction_file)?;

            let platform = ctx.platform()?;
            let command_line =
                LaunchDescriptor::new(&paths.app, &paths.project, TURNTABLE_METHOD).command_line(platform);
            log::debug!("{}", command_line);
            ctx.host.system(&command_line)?;

            Ok(CommandResult::with_message(format!("Previewing {}", model.display())).with_data(json!({
                "model": model.to_string_lossy(),
                "instruction": paths.instruction_file.to_string_lossy(),
                "command": command_line,
            })))
        })
    }
}
