//! Tool errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the standalone tools
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("{} isn't a file", .0.display())]
    NotAFile(PathBuf),

    #[error("invalid search or replace string detected")]
    EmptyArgument,

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No table of contents entries in {}", .0.display())]
    EmptyToc(PathBuf),

    #[error("Couldn't find {0} in root directory")]
    SummaryNotFound(String),

    #[error("Couldn't find Linecoverage in summary file")]
    MetricNotFound,

    #[error("Invalid coverage value: {0}")]
    InvalidCoverage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type ToolResult<T> = Result<T, ToolError>;
