//! Built-in hand-off commands
//!
//! Import, Preview, Export and Configure, plus the steps they share.

pub mod common;
pub mod configure;
pub mod export;
pub mod import;
pub mod preview;

use std::sync::Arc;

pub use configure::ConfigureCommand;
pub use export::ExportCommand;
pub use import::ImportCommand;
pub use preview::PreviewCommand;

use crate::command::CommandHandler;

/// Runtime command names the host binds hotkeys and shelves to
pub const RUNTIME_ALIASES: [(&str, &str); 4] = [
    ("UnityOneClickImport", import::NAME),
    ("UnityOneClickPreview", preview::NAME),
    ("UnityOneClickExport", export::NAME),
    ("UnityOneClickConfigure", configure::NAME),
];

/// Commands shown in the menu, in menu order
pub const MENU_COMMANDS: [&str; 3] = [import::NAME, preview::NAME, export::NAME];

/// Every built-in command
pub fn all() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(ImportCommand),
        Arc::new(PreviewCommand),
        Arc::new(ExportCommand),
        Arc::new(ConfigureCommand),
    ]
}
