//! Plugin Test Utilities
//!
//! Mock plugins shared by the plugin test suites.

use crate::plugin::traits::Plugin;
use crate::plugin::types::{ItemKind, MenuTool, Panel, ParentHandle, Tab, Widget};

/// Contributes nothing
#[derive(Debug, Default)]
pub struct EmptyPlugin;

impl Plugin for EmptyPlugin {}

/// Two tabs, orders 3 and 1
#[derive(Debug, Default)]
pub struct FirstTabs;

impl Plugin for FirstTabs {
    fn tabs(&self, parent: &ParentHandle) -> Vec<Tab> {
        vec![
            Tab::new(Box::new(Panel::new(parent, "Grid")), "three").with_order(3),
            Tab::new(Box::new(Panel::new(parent, "Grid")), "one").with_order(1),
        ]
    }
}

/// One tab, order 2, asking to be selected
#[derive(Debug, Default)]
pub struct SecondTabs;

impl Plugin for SecondTabs {
    fn tabs(&self, parent: &ParentHandle) -> Vec<Tab> {
        vec![Tab::new(Box::new(Panel::new(parent, "Plot")), "two")
            .with_order(2)
            .with_select(true)]
    }
}

/// Two tabs sharing the default order
#[derive(Debug, Default)]
pub struct TiedTabs;

impl Plugin for TiedTabs {
    fn tabs(&self, parent: &ParentHandle) -> Vec<Tab> {
        vec![
            Tab::new(Box::new(Panel::new(parent, "Text")), "tied-a"),
            Tab::new(Box::new(Panel::new(parent, "Text")), "tied-b"),
        ]
    }
}

#[derive(Debug, Default)]
pub struct CentralA;

impl Plugin for CentralA {
    fn central(&self, parent: &ParentHandle) -> Option<Box<dyn Widget>> {
        Some(Box::new(Panel::new(parent, "TextCtrl")))
    }
}

#[derive(Debug, Default)]
pub struct CentralB;

impl Plugin for CentralB {
    fn central(&self, parent: &ParentHandle) -> Option<Box<dyn Widget>> {
        Some(Box::new(Panel::new(parent, "Canvas")))
    }
}

/// Menu entries in two groups, one of them shared with the built-ins
#[derive(Debug, Default)]
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn menu_entries(&self) -> Vec<MenuTool> {
        vec![
            MenuTool::new("Edit", "Copy"),
            MenuTool::new("File", "Open"),
            MenuTool::new("Edit", "Paste").with_kind(ItemKind::Check),
        ]
    }

    fn toolbar_items(&self) -> Vec<MenuTool> {
        vec![
            MenuTool::new("Edit", "Copy").with_short_help("Copy selection"),
            MenuTool::new("View", "Zoom"),
        ]
    }
}

/// Toolbar items only
#[derive(Debug, Default)]
pub struct ToolPlugin;

impl Plugin for ToolPlugin {
    fn toolbar_items(&self) -> Vec<MenuTool> {
        vec![MenuTool::new("Edit", "Cut")]
    }
}

/// Tab texts in the order given
pub fn tab_texts(tabs: &[Tab]) -> Vec<&str> {
    tabs.iter().map(|t| t.text.as_str()).collect()
}

/// Item texts of one menu group
pub fn group_texts<'a>(items: &'a [MenuTool]) -> Vec<&'a str> {
    items.iter().map(|t| t.text.as_str()).collect()
}
