//! In-place search and replace
//!
//! Only the first case-insensitive match of the search pattern is replaced.
//! The replacement is inserted literally; `$` has no special meaning in it.

use std::fs;
use std::path::Path;

use regex::{NoExpand, RegexBuilder};

use crate::error::{ToolError, ToolResult};

/// Replace the first case-insensitive match of `search` in `text`
pub fn replace_first(text: &str, search: &str, replace: &str) -> ToolResult<String> {
    if search.is_empty() || replace.is_empty() {
        return Err(ToolError::EmptyArgument);
    }

    let pattern = RegexBuilder::new(search).case_insensitive(true).build()?;
    Ok(pattern.replace(text, NoExpand(replace)).into_owned())
}

/// Rewrite `path` with the first match replaced
///
/// Returns whether the file content changed.
pub fn replace_in_file(path: &Path, search: &str, replace: &str) -> ToolResult<bool> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.to_path_buf()));
    }

    let data = fs::read_to_string(path)?;
    let replaced = replace_first(&data, search, replace)?;
    let changed = replaced != data;

    fs::write(path, replaced)?;
    log::debug!("{}: {}", path.display(), if changed { "replaced" } else { "no match" });
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_only() {
        let text = replace_first("Hello World, hello world", "world", "Unity").unwrap();
        assert_eq!(text, "Hello Unity, hello world");
    }

    #[test]
    fn test_pattern_is_regex() {
        let text = replace_first("version = 0.1.0", r"\d+\.\d+\.\d+", "2.0.0").unwrap();
        assert_eq!(text, "version = 2.0.0");
    }

    #[test]
    fn test_replacement_is_literal() {
        let text = replace_first("price", "price", "$1").unwrap();
        assert_eq!(text, "$1");
    }

    #[test]
    fn test_empty_arguments_rejected() {
        assert!(matches!(replace_first("abc", "", "x"), Err(ToolError::EmptyArgument)));
        assert!(matches!(replace_first("abc", "a", ""), Err(ToolError::EmptyArgument)));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(replace_first("abc", "(", "x"), Err(ToolError::Pattern(_))));
    }
}
