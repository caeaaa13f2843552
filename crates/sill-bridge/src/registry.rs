//! Metadata registry
//!
//! The native model has no open reflection, so property access is driven by
//! metadata: one descriptor table per native class, keyed by runtime class
//! name, registered once at host startup and immutable afterwards. Lookups
//! take no locks; the registry is shared read-only across every thread.
//!
//! The registry also carries the process's [`OwnerDispatcher`], so a bridge
//! object needs only its handle and a registry reference to operate.

use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use sill_sdk::{
    BoxedValue, NativeFault, NativeHandle, PropertyDescriptor, PropertyGetter, PropertySetter,
};

use crate::dispatch::OwnerDispatcher;

/// The process-wide registry slot, populated once at host startup.
static GLOBAL: OnceCell<Arc<MetadataRegistry>> = OnceCell::new();

/// Property descriptors of one native class.
///
/// Names are unique within a class; registration order is preserved for
/// enumeration.
#[derive(Default)]
struct ClassProperties {
    by_name: FxHashMap<String, usize>,
    descriptors: Vec<PropertyDescriptor>,
}

impl ClassProperties {
    fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name.get(name).map(|&index| &self.descriptors[index])
    }

    /// Merge accessors into the named descriptor, creating it if absent.
    /// Later registrations of the same accessor half replace earlier ones.
    fn merge(
        &mut self,
        name: String,
        getter: Option<PropertyGetter>,
        setter: Option<PropertySetter>,
    ) {
        match self.by_name.get(&name) {
            Some(&index) => {
                let existing = &self.descriptors[index];
                let merged = PropertyDescriptor::new(
                    name,
                    getter.or_else(|| existing.getter().cloned()),
                    setter.or_else(|| existing.setter().cloned()),
                );
                self.descriptors[index] = merged;
            }
            None => {
                self.by_name.insert(name.clone(), self.descriptors.len());
                self.descriptors
                    .push(PropertyDescriptor::new(name, getter, setter));
            }
        }
    }
}

/// Class-name → property-descriptor tables plus the owner dispatcher.
pub struct MetadataRegistry {
    classes: FxHashMap<String, ClassProperties>,
    dispatcher: OwnerDispatcher,
}

impl MetadataRegistry {
    /// Start building a registry
    pub fn builder() -> MetadataRegistryBuilder {
        MetadataRegistryBuilder::default()
    }

    /// Look up a property descriptor by class and property name.
    ///
    /// Absence is a normal outcome: the caller falls back to the host's
    /// default property-miss behavior.
    pub fn lookup(&self, class_name: &str, property: &str) -> Option<&PropertyDescriptor> {
        self.classes
            .get(class_name)
            .and_then(|properties| properties.get(property))
    }

    /// Append every property name registered for a class, in registration
    /// order. Unknown classes contribute nothing.
    pub fn append_property_names(&self, class_name: &str, names: &mut Vec<String>) {
        if let Some(properties) = self.classes.get(class_name) {
            names.extend(
                properties
                    .descriptors
                    .iter()
                    .map(|descriptor| descriptor.name().to_string()),
            );
        }
    }

    /// Property names registered for a class, in registration order.
    pub fn property_names(&self, class_name: &str) -> Vec<String> {
        let mut names = Vec::new();
        self.append_property_names(class_name, &mut names);
        names
    }

    /// Check whether any properties are registered for a class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Number of classes with registered properties
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// The owner-thread dispatcher for this process
    pub fn dispatcher(&self) -> &OwnerDispatcher {
        &self.dispatcher
    }

    /// Install a registry as the process-wide default.
    ///
    /// Returns `false` if one is already installed (the first install wins).
    pub fn install(registry: Arc<MetadataRegistry>) -> bool {
        GLOBAL.set(registry).is_ok()
    }

    /// The process-wide registry, if one has been installed
    pub fn global() -> Option<Arc<MetadataRegistry>> {
        GLOBAL.get().cloned()
    }
}

impl std::fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("classes", &self.classes.len())
            .finish()
    }
}

/// Builder for [`MetadataRegistry`]; the host's metadata population step.
#[derive(Default)]
pub struct MetadataRegistryBuilder {
    classes: FxHashMap<String, ClassProperties>,
}

impl MetadataRegistryBuilder {
    /// Get a builder handle for one native class
    pub fn class(&mut self, name: impl Into<String>) -> ClassBuilder<'_> {
        ClassBuilder {
            properties: self.classes.entry(name.into()).or_default(),
        }
    }

    /// Freeze the tables and attach the owner dispatcher.
    pub fn build(self, dispatcher: OwnerDispatcher) -> Arc<MetadataRegistry> {
        Arc::new(MetadataRegistry {
            classes: self.classes,
            dispatcher,
        })
    }
}

/// Registers property accessors for a single class.
pub struct ClassBuilder<'a> {
    properties: &'a mut ClassProperties,
}

impl ClassBuilder<'_> {
    /// Register a read accessor for a property
    pub fn getter(
        self,
        name: impl Into<String>,
        getter: impl Fn(&NativeHandle) -> Result<BoxedValue, NativeFault> + Send + Sync + 'static,
    ) -> Self {
        self.properties
            .merge(name.into(), Some(Arc::new(getter)), None);
        self
    }

    /// Register a write accessor for a property
    pub fn setter(
        self,
        name: impl Into<String>,
        setter: impl Fn(&NativeHandle, BoxedValue) -> Result<(), NativeFault> + Send + Sync + 'static,
    ) -> Self {
        self.properties
            .merge(name.into(), None, Some(Arc::new(setter)));
        self
    }

    /// Register a prebuilt descriptor
    pub fn descriptor(self, descriptor: PropertyDescriptor) -> Self {
        self.properties.merge(
            descriptor.name().to_string(),
            descriptor.getter().cloned(),
            descriptor.setter().cloned(),
        );
        self
    }
}
