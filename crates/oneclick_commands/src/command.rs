//! Command representation
//!
//! Defines the invocation structure, results and the handler trait.

use oneclick_core::HandoffError;

use crate::context::CommandContext;
use crate::output::{OutputLevel, OutputLine};

/// Command error
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Plugin is not loaded")]
    NotLoaded,

    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

impl From<oneclick_core::HostError> for CommandError {
    fn from(err: oneclick_core::HostError) -> Self {
        Self::Handoff(err.into())
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::Handoff(err.into())
    }
}

/// A command invocation as received from the host
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Command name
    pub name: String,
    /// Positional arguments
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add a positional argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }
}

/// Result of a command run
///
/// Failures are reported through [`CommandError`]; a result always means the
/// command finished, possibly with warnings in its output.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    message: Option<String>,
    output: Vec<OutputLine>,
    /// Structured data for scripted callers
    data: Option<serde_json::Value>,
}

impl CommandResult {
    /// Result with nothing to report
    pub fn success() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn add_lines(mut self, lines: Vec<OutputLine>) -> Self {
        self.output.extend(lines);
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn output_lines(&self) -> &[OutputLine] {
        &self.output
    }

    /// Warnings reported by the run
    pub fn warnings(&self) -> impl Iterator<Item = &OutputLine> {
        self.output
            .iter()
            .filter(|line| line.level() == OutputLevel::Warning)
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }
}

/// Command handler trait
///
/// Handlers are stateless; everything a run needs comes through the
/// [`CommandContext`].
pub trait CommandHandler: Send + Sync {
    /// Name the command is registered under in the host
    fn name(&self) -> &str;

    /// One-line description, used as the menu annotation
    fn description(&self) -> &str;

    /// Menu label
    fn short_label(&self) -> &str;

    /// Icon file shown next to the menu item, empty for none
    fn icon(&self) -> &str {
        ""
    }

    /// Execute the command
    fn execute(
        &self,
        invocation: &Invocation,
        ctx: &mut CommandContext<'_>,
    ) -> Result<CommandResult, CommandError>;
}
