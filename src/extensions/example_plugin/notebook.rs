use crate::plugin::api::{Panel, ParentHandle, Plugin, Tab};

#[derive(Debug, Default)]
pub struct NotebookPlugin;

impl Plugin for NotebookPlugin {
    fn tabs(&self, parent: &ParentHandle) -> Vec<Tab> {
        vec![
            Tab::new(Box::new(Panel::new(parent, "TextCtrl")), "Text area"),
            Tab::new(Box::new(Panel::new(parent, "TextCtrl")), "A second text area"),
        ]
    }
}
