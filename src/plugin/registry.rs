//! Plugin Registry
//!
//! Ordered set of known plugin types. A type registered twice is stored once,
//! and iteration follows first-registration order.

use crate::plugin::traits::Plugin;
use std::any::TypeId;
use std::fmt;

/// Registration entry for one plugin type
#[derive(Clone, Copy)]
pub struct PluginDescriptor {
    name: &'static str,
    type_id: TypeId,
    factory: fn() -> Box<dyn Plugin>,
}

fn construct<P: Plugin + Default + 'static>() -> Box<dyn Plugin> {
    Box::new(P::default())
}

impl PluginDescriptor {
    /// Descriptor for plugin type `P`
    pub fn of<P: Plugin + Default + 'static>() -> Self {
        Self {
            name: std::any::type_name::<P>(),
            type_id: TypeId::of::<P>(),
            factory: construct::<P>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Create a fresh instance of the plugin
    pub fn instantiate(&self) -> Box<dyn Plugin> {
        (self.factory)()
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for PluginDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for PluginDescriptor {}

/// Registry of plugin types known to the application
#[derive(Debug, Default, Clone)]
pub struct PluginRegistry {
    plugins: Vec<PluginDescriptor>,
}

impl PluginRegistry {
    /// Create a new empty plugin registry
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Registry pre-seeded with the actions built into the main window
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<crate::plugin::builtin::BuiltInActions>();
        registry
    }

    /// Register plugin type `P`. Returns `false` if it was already known.
    pub fn register<P: Plugin + Default + 'static>(&mut self) -> bool {
        self.register_descriptor(PluginDescriptor::of::<P>())
    }

    /// Register a descriptor, keeping first-seen order
    pub fn register_descriptor(&mut self, descriptor: PluginDescriptor) -> bool {
        if self.plugins.contains(&descriptor) {
            log::trace!("Plugin '{}' already registered", descriptor.name());
            return false;
        }

        log::debug!("Registered plugin '{}'", descriptor.name());
        self.plugins.push(descriptor);
        true
    }

    /// Check if plugin type `P` is registered
    pub fn contains<P: Plugin + 'static>(&self) -> bool {
        let type_id = TypeId::of::<P>();
        self.plugins.iter().any(|d| d.type_id() == type_id)
    }

    /// Registered descriptors in registration order
    pub fn descriptors(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    /// Names of registered plugins in registration order
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|d| d.name()).collect()
    }

    /// Fresh instances of every registered plugin, in registration order
    pub fn instantiate(&self) -> Vec<Box<dyn Plugin>> {
        self.plugins.iter().map(|d| d.instantiate()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn clear(&mut self) {
        self.plugins.clear();
    }
}
