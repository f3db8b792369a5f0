use super::{load_data, save_data};
use crate::plugin::api::{MenuTool, Plugin, FILE_MENU};

#[derive(Debug, Default)]
pub struct MenuEntryPlugin;

impl Plugin for MenuEntryPlugin {
    fn menu_entries(&self) -> Vec<MenuTool> {
        vec![
            MenuTool::new(FILE_MENU, "Save data")
                .with_description("Save selected data into disk")
                .with_callback(save_data),
            MenuTool::new(FILE_MENU, "Load data")
                .with_description("Load new data from disk")
                .with_callback(load_data),
        ]
    }
}
