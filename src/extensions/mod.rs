//! Extensions shipped with the application
//!
//! Each module registers itself with `plugin_module!` and is picked up at
//! startup through `builtin_extensions()`.

pub mod about_dialog;
pub mod example_plugin;
