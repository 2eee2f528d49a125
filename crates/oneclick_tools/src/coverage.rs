//! Code coverage gate
//!
//! Finds the coverage summary written by the test runner and compares its
//! line coverage against a minimum. The summary is scanned line by line for
//! `<Linecoverage>NN.N</Linecoverage>` rather than parsed as XML.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ToolError, ToolResult};

/// Summary file name produced by the coverage report generator
pub const SUMMARY_XML_FILENAME: &str = "Summary.xml";

const LINE_COVERAGE_TAG: &str = "Linecoverage";

/// Outcome of a coverage check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoverageVerdict {
    /// Coverage met the minimum
    Pass { coverage: f64, minimum: f64 },
    /// Coverage fell short of the minimum
    Fail { coverage: f64, minimum: f64 },
    /// Minimum was zero or negative, nothing checked
    Skipped,
}

impl CoverageVerdict {
    pub fn is_pass(&self) -> bool {
        !matches!(self, Self::Fail { .. })
    }

    /// Process exit code for the verdict
    pub fn exit_code(&self) -> i32 {
        if self.is_pass() {
            0
        } else {
            1
        }
    }
}

/// First summary file in a top-down walk of `root`
///
/// A directory's own files are checked before its subdirectories.
pub fn find_summary(root: &Path) -> ToolResult<Option<PathBuf>> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let candidate = entry.path().join(SUMMARY_XML_FILENAME);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Line coverage from the first line mentioning it
pub fn parse_line_coverage(summary: &str) -> ToolResult<f64> {
    let line = summary
        .lines()
        .find(|line| line.contains(LINE_COVERAGE_TAG))
        .ok_or(ToolError::MetricNotFound)?;

    let value = line
        .replace("<Linecoverage>", "")
        .replace("</Linecoverage>", "");
    let value = value.trim();
    value
        .parse()
        .map_err(|_| ToolError::InvalidCoverage(value.to_string()))
}

/// Check the coverage found under `root` against `minimum`
pub fn check_coverage(root: &Path, minimum: f64) -> ToolResult<CoverageVerdict> {
    if minimum <= 0.0 {
        log::debug!("Minimum coverage {} disables the check", minimum);
        return Ok(CoverageVerdict::Skipped);
    }

    let summary = find_summary(root)?
        .ok_or_else(|| ToolError::SummaryNotFound(SUMMARY_XML_FILENAME.to_string()))?;
    log::debug!("Reading {}", summary.display());

    let coverage = parse_line_coverage(&fs::read_to_string(&summary)?)?;
    if coverage < minimum {
        Ok(CoverageVerdict::Fail { coverage, minimum })
    } else {
        Ok(CoverageVerdict::Pass { coverage, minimum })
    }
}
