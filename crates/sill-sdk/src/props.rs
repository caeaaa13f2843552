//! Property accessor types and descriptors
//!
//! The native model has no open reflection, so the host registers one
//! descriptor per property at startup: a name plus getter/setter closures
//! that know how to reach the native accessor. Descriptors are immutable
//! once registered. Accessors run on the owner thread only; the bridge
//! dispatches them there.

use std::sync::Arc;

use crate::boxed::BoxedValue;
use crate::native::{NativeFault, NativeHandle};

/// A property read accessor. Runs on the owner thread.
pub type PropertyGetter =
    Arc<dyn Fn(&NativeHandle) -> Result<BoxedValue, NativeFault> + Send + Sync>;

/// A property write accessor. Runs on the owner thread.
pub type PropertySetter =
    Arc<dyn Fn(&NativeHandle, BoxedValue) -> Result<(), NativeFault> + Send + Sync>;

/// A named property of a native class, with its optional accessors.
///
/// A descriptor with no getter is write-only; reading it yields dynamic
/// null. A descriptor with no setter is read-only; writes to it are no-ops.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    getter: Option<PropertyGetter>,
    setter: Option<PropertySetter>,
}

impl PropertyDescriptor {
    /// Create a descriptor from a name and optional accessors
    pub fn new(
        name: impl Into<String>,
        getter: Option<PropertyGetter>,
        setter: Option<PropertySetter>,
    ) -> Self {
        Self {
            name: name.into(),
            getter,
            setter,
        }
    }

    /// Create a read-only descriptor
    pub fn read_only(
        name: impl Into<String>,
        getter: impl Fn(&NativeHandle) -> Result<BoxedValue, NativeFault> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, Some(Arc::new(getter)), None)
    }

    /// Create a write-only descriptor
    pub fn write_only(
        name: impl Into<String>,
        setter: impl Fn(&NativeHandle, BoxedValue) -> Result<(), NativeFault> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, None, Some(Arc::new(setter)))
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read accessor, if the property is readable
    pub fn getter(&self) -> Option<&PropertyGetter> {
        self.getter.as_ref()
    }

    /// Write accessor, if the property is writable
    pub fn setter(&self) -> Option<&PropertySetter> {
        self.setter.as_ref()
    }
}

impl std::fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("readable", &self.getter.is_some())
            .field("writable", &self.setter.is_some())
            .finish()
    }
}
