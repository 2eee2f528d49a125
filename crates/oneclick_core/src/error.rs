//! Error types for the hand-off core

use std::path::PathBuf;
use thiserror::Error;

/// Error reported by a host application call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    /// Create a host error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type HostResult<T> = Result<T, HostError>;

/// Hand-off errors
#[derive(Debug, Error)]
pub enum HandoffError {
    /// A required setting is absent; the message is shown to the user as-is
    #[error("{0}")]
    MissingSetting(String),

    #[error("Failed to find Unity Fbx Export Settings at: {}", .0.display())]
    MissingSettingsFile(PathBuf),

    #[error("Failed to load {0} plugin")]
    DependencyLoad(String),

    #[error("missing platform implementation for {0}")]
    UnsupportedPlatform(String),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("No import in progress for export set {0}")]
    NoImportInProgress(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HandoffResult<T> = Result<T, HandoffError>;
