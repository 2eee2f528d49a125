//! # OneClick Tools
//!
//! Standalone utilities used when building and shipping the integration:
//! - `make-yaml-toc`: markdown table of contents to `toc.yml`
//! - `file-search-replace`: first-match search and replace in a file
//! - `check-coverage-percent`: fail CI when line coverage drops below a minimum

pub mod coverage;
pub mod error;
pub mod search_replace;
pub mod toc;

pub use coverage::{check_coverage, CoverageVerdict};
pub use error::{ToolError, ToolResult};
pub use search_replace::{replace_first, replace_in_file};
pub use toc::{write_toc, TocConverter};

/// Install the logger for a tool binary
///
/// Defaults to `warn` so the tools stay quiet unless `RUST_LOG` is set.
pub fn init_tool_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .try_init();
}
