//! Example plugin
//!
//! Demonstrates each kind of contribution: menu entries, toolbar tools,
//! notebook tabs and a central widget. The central widget only makes sense
//! with the central layout; with the notebook layout it is never asked for.

mod central;
mod menu;
mod notebook;
mod tools;

pub use central::CentralPlugin;
pub use menu::MenuEntryPlugin;
pub use notebook::NotebookPlugin;
pub use tools::ToolbarPlugin;

use crate::plugin::api::{CommandEvent, PluginRegistry};

fn save_data(_event: &CommandEvent) {
    log::info!("Saving data... You click the 'Save data' menu entry");
}

fn load_data(_event: &CommandEvent) {
    log::info!("Loading data... You click the 'Load data' menu entry");
}

fn init(registry: &mut PluginRegistry) -> Result<(), String> {
    registry.register::<MenuEntryPlugin>();
    registry.register::<ToolbarPlugin>();
    registry.register::<NotebookPlugin>();
    registry.register::<CentralPlugin>();
    Ok(())
}

crate::plugin_module!(init);
