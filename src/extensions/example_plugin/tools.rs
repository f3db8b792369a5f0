use super::{load_data, save_data};
use crate::plugin::api::{Bitmap, MenuTool, Plugin, FILE_MENU};

#[derive(Debug, Default)]
pub struct ToolbarPlugin;

impl Plugin for ToolbarPlugin {
    fn toolbar_items(&self) -> Vec<MenuTool> {
        vec![
            MenuTool::new(FILE_MENU, "Save data")
                .with_description("Save selected data into disk")
                .with_short_help("Save selected data into disk")
                .with_bitmap(Bitmap::from_art("file_save"))
                .with_callback(save_data),
            MenuTool::new(FILE_MENU, "Load data")
                .with_description("Load new data from disk")
                .with_short_help("Load new data from disk")
                .with_bitmap(Bitmap::from_art("file_open"))
                .with_callback(load_data),
        ]
    }
}
