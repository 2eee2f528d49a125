//! # OneClick Commands
//!
//! Command layer of the OneClick integration:
//! - Hand-off commands (import, preview, export, configure)
//! - Command registry with aliases and completion
//! - Plugin lifecycle and menu construction
//!
//! ## Architecture
//!
//! ```text
//! Host menu / hotkey ──► OneClickPlugin ──► CommandRegistry ──► CommandHandler
//!                                                                  │
//!                                                                  ▼
//!                                              CommandContext (Host, OptionStore, config)
//! ```
//!
//! ## Usage
//!
//! ```text
//! unityImport                      # import through the host dialog
//! unityImport /p/Assets/chair.fbx  # import a file directly
//! unityPreview
//! unityExport
//! ```

pub mod builtins;
pub mod command;
pub mod context;
pub mod output;
pub mod plugin;
pub mod registry;
pub mod ui;

pub use command::{CommandError, CommandHandler, CommandResult, Invocation};
pub use context::CommandContext;
pub use output::{OutputLevel, OutputLine};
pub use plugin::{OneClickPlugin, PluginError, PluginInfo, PluginState, PLUGIN_INFO};
pub use registry::CommandRegistry;
pub use ui::{build_menu, MENU_NAME};
