//! About menu entry

use crate::plugin::api::{CommandEvent, CommandId, MenuTool, Plugin, PluginRegistry};

pub const ABOUT_MENU: &str = "About";

#[derive(Debug, Default)]
pub struct AboutDialog;

impl AboutDialog {
    fn dialog(_event: &CommandEvent) {
        log::info!("About the GUI: A GUI example");
    }
}

impl Plugin for AboutDialog {
    fn name(&self) -> &'static str {
        "about_dialog"
    }

    fn menu_entries(&self) -> Vec<MenuTool> {
        vec![MenuTool::new(ABOUT_MENU, "About")
            .with_id(CommandId::ABOUT)
            .with_description("Some info about this app")
            .with_callback(Self::dialog)]
    }
}

fn init(registry: &mut PluginRegistry) -> Result<(), String> {
    registry.register::<AboutDialog>();
    Ok(())
}

crate::plugin_module!(init);
