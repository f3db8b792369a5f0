//! TOML configuration file loading
//!
//! An explicitly named config file must exist. Without one, the default
//! location is tried and silently skipped when absent.

use crate::plugin::api::{Layout, MenuPolicy, TabPosition};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const APP_DIR: &str = "Guikit";
const CONFIG_FILE: &str = "guikit.toml";
const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

/// A directory scanned for plugin modules at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginDirConfig {
    pub path: PathBuf,
    pub package: Option<String>,
    #[serde(default)]
    pub add_to_path: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThreadsConfig {
    /// How long shutdown waits for non-daemon workers
    pub shutdown_timeout_ms: u64,
}

impl Default for ThreadsConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub notebook_layout: bool,
    pub tab_style: String,
    /// Plugin modules to load, in order
    pub plugins: Vec<String>,
    /// Also load the extensions compiled into the application
    pub auto_plugins: bool,
    pub plugin_dirs: Vec<PluginDirConfig>,
    /// Defaults to the platform convention when unset
    pub native_app_menu: Option<bool>,
    pub logging: LoggingConfig,
    pub threads: ThreadsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Guikit".to_string(),
            notebook_layout: true,
            tab_style: TabPosition::Top.to_string(),
            plugins: Vec::new(),
            auto_plugins: true,
            plugin_dirs: Vec::new(),
            native_app_menu: None,
            logging: LoggingConfig::default(),
            threads: ThreadsConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Load `explicit`, or the default file if present, or the defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "title must not be empty".to_string(),
            });
        }
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::Validation {
                    message: format!(
                        "unknown log level '{}'. Valid values are {:?}",
                        level, LOG_LEVELS
                    ),
                });
            }
        }
        if let Some(format) = &self.logging.format {
            if crate::core::logging::LogFormat::from_str(format).is_err() {
                return Err(ConfigError::Validation {
                    message: format!("unknown log format '{}'", format),
                });
            }
        }
        Ok(())
    }

    /// Notebook tab position; an unknown style falls back to the top
    pub fn tab_position(&self) -> TabPosition {
        TabPosition::from_str(&self.tab_style.to_lowercase()).unwrap_or_else(|_| {
            log::warn!(
                "Invalid tab_style '{}'. Valid values are [\"top\", \"bottom\", \"left\", \"right\"]. Defaulting to 'top'",
                self.tab_style
            );
            TabPosition::Top
        })
    }

    pub fn layout(&self) -> Layout {
        if self.notebook_layout {
            Layout::Notebook(self.tab_position())
        } else {
            Layout::Central
        }
    }

    pub fn menu_policy(&self) -> MenuPolicy {
        match self.native_app_menu {
            Some(native_app_menu) => MenuPolicy { native_app_menu },
            None => MenuPolicy::default(),
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.threads.shutdown_timeout_ms)
    }
}
