//! Host menu for the hand-off commands

use oneclick_core::{Menu, MenuItem};

use crate::builtins::MENU_COMMANDS;
use crate::registry::CommandRegistry;

/// Identifier of the menu inside the host
pub const MENU_NAME: &str = "UnityOneClick";

/// Build the menu from the registered commands
///
/// Menu commands that are not registered are left out.
pub fn build_menu(registry: &CommandRegistry, label: &str) -> Menu {
    MENU_COMMANDS
        .iter()
        .filter_map(|name| registry.get_handler(name))
        .fold(Menu::new(MENU_NAME, label), |menu, handler| {
            menu.item(MenuItem {
                label: handler.short_label().to_string(),
                command: handler.name().to_string(),
                icon: handler.icon().to_string(),
                annotation: handler.description().to_string(),
            })
        })
}
