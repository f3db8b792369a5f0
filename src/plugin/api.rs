//! Public API for the plugin system
//!
//! This module provides the complete public API for the plugin system.
//! External modules should import from here rather than directly from internal modules.

// Plugin contract and contribution types
pub use crate::plugin::traits::Plugin;
pub use crate::plugin::types::{
    Bitmap, CommandCallback, CommandEvent, CommandId, ItemKind, MenuTool, Panel, ParentHandle,
    ParentRole, Tab, Widget,
};

// Error handling
pub use crate::plugin::error::{PluginError, PluginResult};

// Plugin registry and built-in actions
pub use crate::plugin::builtin::{BuiltInActions, FILE_MENU};
pub use crate::plugin::registry::{PluginDescriptor, PluginRegistry};

// Plugin discovery and loading
pub use crate::plugin::discovery::{builtin_extensions, PluginDiscovery};
pub use crate::plugin::loader::{
    load_plugins, load_plugins_from, InventoryLoader, ModuleLoader, PluginModule};

// Contribution aggregation
pub use crate::plugin::contributions::{
    collect_central, collect_menus, collect_tabs, collect_toolbars, populate_window, Layout,
    MenuGroups, MenuPolicy, TabPosition, WindowBody, WindowContents,
};
