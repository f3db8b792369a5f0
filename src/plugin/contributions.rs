//! Contribution Aggregation
//!
//! Walks the registered plugins and merges what they contribute into the
//! shapes the window shell needs: grouped menus, grouped toolbars, an ordered
//! tab list and at most one central widget.
//!
//! Every pass instantiates fresh plugin values in registration order. Nothing
//! a plugin returns is dropped.

use crate::plugin::builtin::BuiltInActions;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::registry::PluginRegistry;
use crate::plugin::traits::Plugin;
use crate::plugin::types::{CommandId, MenuTool, ParentHandle, Tab, Widget};
use std::any::TypeId;
use strum_macros::{Display, EnumString};

/// Platform policy for menu aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuPolicy {
    /// The host toolkit supplies the Exit action in its own application menu
    pub native_app_menu: bool,
}

impl Default for MenuPolicy {
    fn default() -> Self {
        Self {
            native_app_menu: cfg!(target_os = "macos"),
        }
    }
}

/// Named groups of menu or toolbar entries, in first-seen group order
#[derive(Debug, Default, Clone)]
pub struct MenuGroups {
    groups: Vec<(String, Vec<MenuTool>)>,
}

impl MenuGroups {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Append `entry` to its group, creating the group on first sight.
    /// Entries asking for any id get a fresh unique one.
    pub fn push(&mut self, mut entry: MenuTool) {
        if entry.id.is_any() {
            entry.id = CommandId::new_unique();
        }

        match self.groups.iter_mut().find(|(name, _)| *name == entry.menu) {
            Some((_, items)) => items.push(entry),
            None => self.groups.push((entry.menu.clone(), vec![entry])),
        }
    }

    /// Group names in first-seen order
    pub fn names(&self) -> Vec<&str> {
        self.groups.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&[MenuTool]> {
        self.groups
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MenuTool])> {
        self.groups
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Find an entry by command id across all groups
    pub fn find(&self, id: CommandId) -> Option<&MenuTool> {
        self.groups
            .iter()
            .flat_map(|(_, items)| items.iter())
            .find(|item| item.id == id)
    }

    /// Total number of entries across all groups
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<MenuTool> for MenuGroups {
    fn from_iter<I: IntoIterator<Item = MenuTool>>(iter: I) -> Self {
        let mut groups = MenuGroups::new();
        for entry in iter {
            groups.push(entry);
        }
        groups
    }
}

fn active_plugins(registry: &PluginRegistry, policy: MenuPolicy) -> Vec<Box<dyn Plugin>> {
    let builtin = TypeId::of::<BuiltInActions>();
    registry
        .descriptors()
        .iter()
        .filter(|d| !(policy.native_app_menu && d.type_id() == builtin))
        .map(|d| d.instantiate())
        .collect()
}

/// Menu entries of every plugin, grouped by target menu
pub fn collect_menus(registry: &PluginRegistry, policy: MenuPolicy) -> MenuGroups {
    active_plugins(registry, policy)
        .iter()
        .flat_map(|plugin| plugin.menu_entries())
        .collect()
}

/// Toolbar items of every plugin, grouped by their `menu` field
pub fn collect_toolbars(registry: &PluginRegistry) -> MenuGroups {
    registry
        .instantiate()
        .iter()
        .flat_map(|plugin| plugin.toolbar_items())
        .collect()
}

/// Tabs of every plugin, sorted by `order`, with exactly the first selected
///
/// The sort is stable: equal orders keep plugin registration order, then the
/// order each plugin returned them in.
pub fn collect_tabs(registry: &PluginRegistry, notebook: &ParentHandle) -> Vec<Tab> {
    let mut tabs: Vec<Tab> = registry
        .instantiate()
        .iter()
        .flat_map(|plugin| plugin.tabs(notebook))
        .collect();

    tabs.sort_by_key(|tab| tab.order);

    for (index, tab) in tabs.iter_mut().enumerate() {
        tab.select = index == 0;
    }

    log::debug!("Collected {} tabs", tabs.len());
    tabs
}

/// The single central widget provided across all plugins
pub fn collect_central(
    registry: &PluginRegistry,
    window: &ParentHandle,
) -> PluginResult<Box<dyn Widget>> {
    let mut widgets: Vec<Box<dyn Widget>> = registry
        .instantiate()
        .iter()
        .filter_map(|plugin| plugin.central(window))
        .collect();

    if widgets.len() != 1 {
        return Err(PluginError::CentralWidgetCount {
            found: widgets.len(),
        });
    }

    Ok(widgets.remove(0))
}

/// Where the notebook draws its tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TabPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

/// Body layout of the main window. The two options are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Notebook(TabPosition),
    Central,
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Notebook(TabPosition::Top)
    }
}

/// Body of the main window
#[derive(Debug)]
pub enum WindowBody {
    Notebook {
        position: TabPosition,
        tabs: Vec<Tab>,
    },
    Central(Box<dyn Widget>),
}

/// Everything the shell needs to build the main window
#[derive(Debug)]
pub struct WindowContents {
    pub menus: MenuGroups,
    pub toolbars: MenuGroups,
    pub body: WindowBody,
}

impl WindowContents {
    /// Index of the selected notebook page, if any
    pub fn selected_tab(&self) -> Option<usize> {
        match &self.body {
            WindowBody::Notebook { tabs, .. } => tabs.iter().position(|t| t.select),
            WindowBody::Central(_) => None,
        }
    }
}

/// Aggregate all contributions for the given layout
///
/// The central-widget check only runs for [`Layout::Central`]; a notebook
/// layout never consults `central`.
pub fn populate_window(
    registry: &PluginRegistry,
    title: &str,
    layout: Layout,
    policy: MenuPolicy,
) -> PluginResult<WindowContents> {
    let body = match layout {
        Layout::Notebook(position) => WindowBody::Notebook {
            position,
            tabs: collect_tabs(registry, &ParentHandle::notebook(title)),
        },
        Layout::Central => {
            WindowBody::Central(collect_central(registry, &ParentHandle::main_window(title))?)
        }
    };

    let toolbars = collect_toolbars(registry);
    let menus = collect_menus(registry, policy);

    log::info!(
        "Window populated: {} menus ({} entries), {} toolbars ({} tools)",
        menus.len(),
        menus.item_count(),
        toolbars.len(),
        toolbars.item_count()
    );

    Ok(WindowContents {
        menus,
        toolbars,
        body,
    })
}
