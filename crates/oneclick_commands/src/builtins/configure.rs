//! `unityConfigure`: let the user pick the Unity project to work against

use crate::builtins::common::load_dependencies;
use crate::command::{CommandError, CommandHandler, CommandResult, Invocation};
use crate::context::CommandContext;

pub const NAME: &str = "unityConfigure";

/// Host command showing the project picker
pub const SEND_TO_UNITY_SET_PROJECT: &str = "SendToUnitySetProject";

/// Configure command
pub struct ConfigureCommand;

impl CommandHandler for ConfigureCommand {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Configure Maya to preview and export to a Unity Project"
    }

    fn short_label(&self) -> &str {
        "Configure"
    }

    fn execute(
        &self,
        _invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError> {
        load_dependencies(ctx)?;
        ctx.host.run_command(SEND_TO_UNITY_SET_PROJECT)?;
        Ok(CommandResult::success())
    }
}
