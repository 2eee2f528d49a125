//! Markdown table of contents to YAML
//!
//! Turns a bullet list of links into the `toc.yml` tree the documentation
//! site generator reads:
//!
//! ```text
//! * [display](href)           =>  - name: display
//!                                   href: href
//! <indent>* [display](href)   =>    items:
//!                                   - name: display
//!                                     href: href
//! ```
//!
//! The first indented entry defines the indent unit. Every later entry's
//! level is the number of times that unit occurs in its indent, so widths
//! that are not a multiple of the unit round down.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{ToolError, ToolResult};

/// Input file looked up in the working directory
pub const DEFAULT_TOC_FILE: &str = "TableOfContents.md";

/// Output file written next to the input
pub const OUTPUT_FILE: &str = "toc.yml";

const ENTRY_PATTERN: &str = r"^(\s*?)\* \[(.*?)\]\((.*?)\).*?$";
const YAML_INDENT: &str = "  ";

/// Line-based markdown TOC converter
pub struct TocConverter {
    entry: Regex,
}

impl TocConverter {
    pub fn new() -> ToolResult<Self> {
        Ok(Self {
            entry: Regex::new(ENTRY_PATTERN)?,
        })
    }

    /// Convert markdown text; lines that are not list links are skipped
    pub fn convert(&self, markdown: &str) -> String {
        let mut yaml = String::new();
        let mut tab = String::new();
        let mut prev_level = 0;

        for line in markdown.lines() {
            let Some(caps) = self.entry.captures(line) else {
                continue;
            };
            let indent = &caps[1];
            let name = &caps[2];
            let href = &caps[3];

            let level = if indent.is_empty() {
                0
            } else if tab.is_empty() {
                tab = indent.to_string();
                1
            } else {
                indent.matches(tab.as_str()).count()
            };

            let pad = YAML_INDENT.repeat(level);
            if level > prev_level {
                yaml.push_str(&format!("\n{}  items:", YAML_INDENT.repeat(prev_level)));
            }
            yaml.push_str(&format!("\n{pad}- name: {name}\n{pad}  href: {href}"));

            prev_level = level;
        }

        yaml.trim_start_matches('\n').to_string()
    }

    pub fn convert_file(&self, path: &Path) -> ToolResult<String> {
        let markdown = fs::read_to_string(path)?;
        Ok(self.convert(&markdown))
    }
}

/// Convert `input` and write `toc.yml` into its directory
///
/// Returns the path written.
pub fn write_toc(input: &Path) -> ToolResult<PathBuf> {
    if !input.exists() {
        return Err(ToolError::FileNotFound(input.to_path_buf()));
    }
    if !input.is_file() {
        return Err(ToolError::NotAFile(input.to_path_buf()));
    }

    let input = std::path::absolute(input)?;
    let yaml = TocConverter::new()?.convert_file(&input)?;
    if yaml.is_empty() {
        return Err(ToolError::EmptyToc(input));
    }

    let output = input
        .parent()
        .map(|dir| dir.join(OUTPUT_FILE))
        .unwrap_or_else(|| PathBuf::from(OUTPUT_FILE));
    fs::write(&output, yaml)?;
    log::debug!("Wrote {}", output.display());
    Ok(output)
}
