//! Menu description handed to the host's UI layer

use serde::{Deserialize, Serialize};

/// One entry of a host menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Text shown in the menu
    pub label: String,
    /// Registered command run on activation
    pub command: String,
    /// Icon file, empty for none
    pub icon: String,
    /// Tooltip / annotation
    pub annotation: String,
}

/// A top-level menu in the host's main window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Unique menu identifier inside the host
    pub name: String,
    /// Title shown in the menu bar
    pub label: String,
    pub tear_off: bool,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            tear_off: true,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}
