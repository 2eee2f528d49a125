//! `unityExport`: write the tracked asset back to the file it came from

use serde_json::json;

use crate::builtins::common::{load_dependencies, load_export_settings, select_export_set, with_restored_selection};
use crate::command::{CommandError, CommandHandler, CommandResult, Invocation};
use crate::context::CommandContext;
use crate::output::OutputLine;

pub const NAME: &str = "unityExport";

/// Host command that asks the user where to send the selection
pub const SEND_TO_UNITY_SELECTION: &str = "SendToUnitySelection";

/// Export command
pub struct ExportCommand;

impl CommandHandler for ExportCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Export Model to Unity"
    }

    fn short_label(&self) -> &str {
        "Export"
    }

    fn icon(&self) -> &str {
        "export.png"
    }

    fn execute(
        &self,
        _invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        load_dependencies(ctx)?;
        load_export_settings(ctx)?;

        with_restored_selection(ctx, |ctx| {
            select_export_set(ctx)?;

            let source = ctx
                .export_set()
                .source(&*ctx.host)
                .filter(|source| source.is_complete());

            match source {
                Some(source) => {
                    let target = source.full_path();
                    ctx.host.export_selection(&target)?;
                    log::info!("Exported to {}", target.display());
                    Ok(CommandResult::with_message(format!("Exported to {}", target.display()))
                        .with_data(json!({ "file": target.to_string_lossy() })))
                }
                None => {
                    log::debug!("No source file recorded, running {}", SEND_TO_UNITY_SELECTION);
                    ctx.host.run_command(SEND_TO_UNITY_SELECTION)?;
                    Ok(CommandResult::success().add_lines(vec![OutputLine::info(
                        "No source file recorded for the export set, asking for a destination",
                    )]))
                }
            }
        })
    }
}
