//! Actions built into the main window
//!
//! Registered ahead of any loaded module, so its groups come first.

use crate::plugin::traits::Plugin;
use crate::plugin::types::{CommandId, MenuTool};

/// Menu group holding the application-level actions
pub const FILE_MENU: &str = "File";

#[derive(Debug, Default)]
pub struct BuiltInActions;

impl Plugin for BuiltInActions {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn menu_entries(&self) -> Vec<MenuTool> {
        vec![MenuTool::new(FILE_MENU, "Exit")
            .with_id(CommandId::EXIT)
            .with_description("Terminate application")]
    }
}
