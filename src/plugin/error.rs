//! Plugin Error Handling
//!
//! Error types for plugin discovery, loading and contribution aggregation.

use std::path::PathBuf;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Error types for plugin system operations
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// No plugin module is known under this name
    #[error("No module named '{module}'")]
    ModuleNotFound { module: String },

    /// The module exists but its initialisation failed
    #[error("Failed to load plugin module '{module}': {cause}")]
    LoadFailed { module: String, cause: String },

    /// Single-widget layout requires exactly one central widget
    #[error("Exactly 1 central widget needs to be provided. {found} given.")]
    CentralWidgetCount { found: usize },

    /// Directory scan could not be performed
    #[error("Plugin discovery failed in '{}': {message}", path.display())]
    Discovery { path: PathBuf, message: String },
}

impl PluginError {
    /// Whether this error is the recoverable "module not found" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, PluginError::ModuleNotFound { .. })
    }
}
