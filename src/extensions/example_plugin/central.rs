use crate::plugin::api::{Panel, ParentHandle, Plugin, Widget};

#[derive(Debug, Default)]
pub struct CentralPlugin;

impl Plugin for CentralPlugin {
    fn central(&self, parent: &ParentHandle) -> Option<Box<dyn Widget>> {
        Some(Box::new(Panel::new(parent, "TextCtrl")))
    }
}
