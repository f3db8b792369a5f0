//! Plugin Module Loading
//!
//! Plugin modules announce themselves at compile time with [`plugin_module!`],
//! naming an init function that registers the module's plugin types. Loading a
//! module by name runs that function against a registry.
//!
//! Unknown module names are recoverable: they are logged and skipped. Any
//! other failure while loading is returned to the caller and halts startup.
//!
//! Names discovered in a directory on the module search path are unqualified.
//! They resolve to the module whose path ends in `<dir>::<name>`, where `<dir>`
//! is the name of a search path directory.

use crate::plugin::discovery::MODULE_SEPARATOR;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::registry::PluginRegistry;
use std::path::{Path, PathBuf};

/// Init function run when a plugin module is loaded
pub type ModuleInit = fn(&mut PluginRegistry) -> Result<(), String>;

/// A plugin module known at compile time
pub struct PluginModule {
    pub name: &'static str,
    pub init: ModuleInit,
}

inventory::collect!(PluginModule);

/// Declare a plugin module named after the enclosing Rust module path
///
/// ```ignore
/// fn init(registry: &mut PluginRegistry) -> Result<(), String> {
///     registry.register::<MyPlugin>();
///     Ok(())
/// }
/// guikit::plugin_module!(init);
/// ```
#[macro_export]
macro_rules! plugin_module {
    ($init:path) => {
        $crate::inventory::submit! {
            $crate::plugin::loader::PluginModule {
                name: module_path!(),
                init: $init,
            }
        }
    };
    ($name:expr, $init:path) => {
        $crate::inventory::submit! {
            $crate::plugin::loader::PluginModule {
                name: $name,
                init: $init,
            }
        }
    };
}

/// Resolves a module name to loadable plugin code
pub trait ModuleLoader {
    /// Load `name`, registering its plugins into `registry`
    ///
    /// Must return [`PluginError::ModuleNotFound`] when nothing answers to the
    /// name, so that callers can tell it apart from a broken module.
    fn load_module(&self, name: &str, registry: &mut PluginRegistry) -> PluginResult<()>;

    /// Load `name`, which may be relative to one of `search_paths`
    fn load_module_from(
        &self,
        name: &str,
        search_paths: &[PathBuf],
        registry: &mut PluginRegistry,
    ) -> PluginResult<()> {
        let _ = search_paths;
        self.load_module(name, registry)
    }
}

/// Loader backed by the modules submitted with [`plugin_module!`]
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryLoader;

impl InventoryLoader {
    pub fn new() -> Self {
        Self
    }

    /// Names of every module compiled into the binary
    pub fn module_names(&self) -> Vec<&'static str> {
        inventory::iter::<PluginModule>().map(|m| m.name).collect()
    }
}

impl ModuleLoader for InventoryLoader {
    fn load_module(&self, name: &str, registry: &mut PluginRegistry) -> PluginResult<()> {
        self.load_module_from(name, &[], registry)
    }

    fn load_module_from(
        &self,
        name: &str,
        search_paths: &[PathBuf],
        registry: &mut PluginRegistry,
    ) -> PluginResult<()> {
        let module = match inventory::iter::<PluginModule>().find(|m| m.name == name) {
            Some(module) => module,
            None => resolve_unqualified(name, search_paths)?,
        };

        (module.init)(registry).map_err(|cause| PluginError::LoadFailed {
            module: name.to_string(),
            cause,
        })
    }
}

fn resolve_unqualified(name: &str, search_paths: &[PathBuf]) -> PluginResult<&'static PluginModule> {
    let not_found = || PluginError::ModuleNotFound {
        module: name.to_string(),
    };
    if name.contains(MODULE_SEPARATOR) {
        return Err(not_found());
    }

    // "dir::name", matched whole or as the tail of a longer module path
    let qualified: Vec<String> = search_paths
        .iter()
        .filter_map(|path| dir_name(path))
        .map(|dir| format!("{dir}{MODULE_SEPARATOR}{name}"))
        .collect();

    let mut candidates: Vec<&'static PluginModule> = inventory::iter::<PluginModule>()
        .filter(|m| qualified.iter().any(|q| is_module_tail(m.name, q)))
        .collect();

    match candidates.len() {
        0 => Err(not_found()),
        1 => Ok(candidates.remove(0)),
        _ => Err(PluginError::LoadFailed {
            module: name.to_string(),
            cause: format!(
                "ambiguous name, matches {}",
                candidates.iter().map(|m| m.name).collect::<Vec<_>>().join(", ")
            ),
        }),
    }
}

fn is_module_tail(module: &str, tail: &str) -> bool {
    module == tail
        || module
            .strip_suffix(tail)
            .is_some_and(|head| head.ends_with(MODULE_SEPARATOR))
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().map(|s| s.to_string_lossy().into_owned())
}

/// Load each named module in turn
///
/// A missing module is logged as a warning and skipped; any other error is
/// returned immediately. Returns how many modules were loaded.
pub fn load_plugins<S: AsRef<str>>(
    registry: &mut PluginRegistry,
    loader: &dyn ModuleLoader,
    names: &[S],
) -> PluginResult<usize> {
    load_plugins_from(registry, loader, names, &[])
}

/// [`load_plugins`] with unqualified names resolved against `search_paths`
pub fn load_plugins_from<S: AsRef<str>>(
    registry: &mut PluginRegistry,
    loader: &dyn ModuleLoader,
    names: &[S],
    search_paths: &[PathBuf],
) -> PluginResult<usize> {
    let mut loaded = 0;

    for name in names {
        let name = name.as_ref();
        match loader.load_module_from(name, search_paths, registry) {
            Ok(()) => {
                log::debug!("Loaded plugin module '{}'", name);
                loaded += 1;
            }
            Err(err) if err.is_not_found() => {
                log::warn!("Plugin '{}' could not be loaded. {}", name, err);
            }
            Err(err) => return Err(err),
        }
    }

    log::info!(
        "Loaded {} of {} plugin modules ({} plugins registered)",
        loaded,
        names.len(),
        registry.len()
    );
    Ok(loaded)
}
