//! Plugin System Module
//!
//! Registry of plugin types, discovery and loading of plugin modules, and the
//! aggregation of their UI contributions into the main window.

// Internal modules - all access should go through api module
pub(crate) mod builtin;
pub(crate) mod contributions;
pub(crate) mod discovery;
pub(crate) mod error;
pub mod loader;
pub(crate) mod registry;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
mod tests;
