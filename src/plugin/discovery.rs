//! Plugin Discovery
//!
//! Scans a directory for plugin modules and turns what it finds into module
//! names that a [`ModuleLoader`](crate::plugin::loader::ModuleLoader) resolves.
//!
//! A plugin is either a single source file (`name.rs`) or a package: a
//! sub-directory carrying the `mod.rs` marker. Files whose stem starts with
//! the reserved `__` prefix, and crate roots, are ignored.
//!
//! Names are qualified with the scanned directory (and an optional containing
//! package) unless the directory is added to the module search path, in which
//! case they are left unqualified:
//!
//! | call                                   | file `dir/tools/foo.rs`  |
//! |----------------------------------------|--------------------------|
//! | `collect(dir/tools, None, false)`      | `tools::foo`             |
//! | `collect(dir/tools, Some("app"), false)` | `app::tools::foo`      |
//! | `collect(dir/tools, None, true)`       | `foo`                    |

use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::loader::InventoryLoader;
use std::path::{Path, PathBuf};

/// Separator between the segments of a module name
pub const MODULE_SEPARATOR: &str = "::";

/// Stems starting with this prefix are never plugins
pub const RESERVED_PREFIX: &str = "__";

/// File marking a directory as a plugin package
pub const PACKAGE_MARKER: &str = "mod.rs";

const SOURCE_EXTENSION: &str = "rs";
const CRATE_ROOTS: [&str; 3] = ["mod", "lib", "main"];

/// Module path under which the bundled extensions live
pub const BUILTIN_EXTENSIONS: &str = "guikit::extensions";

/// Directory scanner keeping track of the module search path
#[derive(Debug, Default, Clone)]
pub struct PluginDiscovery {
    search_paths: Vec<PathBuf>,
}

impl PluginDiscovery {
    pub fn new() -> Self {
        Self {
            search_paths: Vec::new(),
        }
    }

    /// Directories added to the module search path, most recent first
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Collect the plugin modules and packages found in `path`
    ///
    /// Returns names of the form `package::dir::plugin`, or just `plugin`
    /// when `add_to_path` is set. Order follows directory enumeration.
    pub fn collect(
        &mut self,
        path: &Path,
        package: Option<&str>,
        add_to_path: bool,
    ) -> PluginResult<Vec<String>> {
        if !path.is_dir() {
            return Err(PluginError::Discovery {
                path: path.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let prefix = if add_to_path {
            if !self.search_paths.iter().any(|p| p == path) {
                self.search_paths.insert(0, path.to_path_buf());
            }
            String::new()
        } else {
            let dir_name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            match package {
                Some(package) => format!("{package}{MODULE_SEPARATOR}{dir_name}{MODULE_SEPARATOR}"),
                None => format!("{dir_name}{MODULE_SEPARATOR}"),
            }
        };

        let mut plugin_names = Vec::new();

        for file in glob_entries(path, &format!("*.{SOURCE_EXTENSION}"))? {
            if !file.is_file() {
                continue;
            }
            if let Some(stem) = plugin_stem(&file) {
                if !stem.starts_with(RESERVED_PREFIX) && !CRATE_ROOTS.contains(&stem.as_str()) {
                    plugin_names.push(format!("{prefix}{stem}"));
                }
            }
        }

        for dir in glob_entries(path, "*")? {
            if dir.is_dir() && dir.join(PACKAGE_MARKER).exists() {
                if let Some(stem) = plugin_stem(&dir) {
                    plugin_names.push(format!("{prefix}{stem}"));
                }
            }
        }

        log::debug!(
            "Discovered {} plugin modules in {}",
            plugin_names.len(),
            path.display()
        );
        Ok(plugin_names)
    }
}

/// Names of the extension modules bundled with this crate
pub fn builtin_extensions() -> Vec<String> {
    let prefix = format!("{BUILTIN_EXTENSIONS}{MODULE_SEPARATOR}");
    InventoryLoader::new()
        .module_names()
        .into_iter()
        .filter(|name| name.starts_with(&prefix))
        .map(str::to_string)
        .collect()
}

fn glob_entries(dir: &Path, pattern: &str) -> PluginResult<Vec<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = format!("{escaped}/{pattern}");
    let paths = glob::glob(&full).map_err(|e| PluginError::Discovery {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut entries = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => entries.push(path),
            Err(e) => log::warn!("Skipping unreadable entry during discovery: {}", e),
        }
    }
    Ok(entries)
}

fn plugin_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}
