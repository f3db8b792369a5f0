//! Plugin Trait
//!
//! The capability interface every plugin implements. All operations have an
//! empty default, so a plugin only overrides what it contributes.
//!
//! Contributions are produced on demand: the aggregator instantiates a fresh
//! plugin value for every pass and calls the relevant operation. Operations
//! that receive a parent handle may create widgets for that parent.

use crate::plugin::types::{MenuTool, ParentHandle, Tab, Widget};

pub trait Plugin: Send {
    /// Display name used in log messages
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Entries to be added to the application menu bar
    fn menu_entries(&self) -> Vec<MenuTool> {
        Vec::new()
    }

    /// Items to be added to the application toolbar
    fn toolbar_items(&self) -> Vec<MenuTool> {
        Vec::new()
    }

    /// Pages for the application notebook, parented to `parent`
    fn tabs(&self, _parent: &ParentHandle) -> Vec<Tab> {
        Vec::new()
    }

    /// Central widget for the single-widget layout, parented to `parent`
    fn central(&self, _parent: &ParentHandle) -> Option<Box<dyn Widget>> {
        None
    }
}
