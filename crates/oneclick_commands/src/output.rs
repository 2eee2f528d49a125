//! Command output
//!
//! Lines a command reports back to the host's script editor / status line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output level/severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputLevel {
    /// Normal information
    Info,
    /// Something went wrong but the command carried on
    Warning,
}

impl OutputLevel {
    /// Prefix shown in front of the line
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Warning => "Warning: ",
        }
    }
}

/// A single line of output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    level: OutputLevel,
    text: String,
}

impl OutputLine {
    pub fn new(level: OutputLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(OutputLevel::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(OutputLevel::Warning, text)
    }

    pub fn level(&self) -> OutputLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level.prefix(), self.text)
    }
}
