//! Native model boundary — handles, object traits, and faults
//!
//! The native widget model is reflection-poor and thread-affine: objects may
//! only have their state read or written on the owner thread. This module
//! defines the minimal surface the bridge needs from it: a reference-counted
//! handle, a per-object trait carrying the runtime class identity and two
//! type probes, and the fault type native accessors raise.
//!
//! Type probes (`string_value`, `as_solid_fill`) and `class_name` are type
//! tests only and are assumed safe from any thread. Anything that reads
//! object *state* — property accessors, [`SolidFill::color`] — must run on
//! the owner thread.

use std::any::Any;
use std::sync::Arc;

use crate::color::Color;

/// A fault raised by the native model, carrying its platform error code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("native fault 0x{code:08X}: {message}")]
pub struct NativeFault {
    /// Platform error code
    pub code: u32,
    /// Human-readable description
    pub message: String,
}

impl NativeFault {
    /// Create a new fault from a platform code and description
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A native visual filled with a single solid color.
///
/// `color` reads native state and must be called on the owner thread.
pub trait SolidFill: Send + Sync {
    /// Read the current fill color.
    fn color(&self) -> Result<Color, NativeFault>;
}

/// A native object instance, as seen by the bridge.
///
/// `class_name` reports the *runtime* class of the concrete object, which may
/// be more specific than the declared type a handle was obtained through.
pub trait NativeObject: Send + Sync {
    /// Runtime class identity of this object. Safe from any thread.
    fn class_name(&self) -> String;

    /// Concrete-type access for host-authored property accessors.
    fn as_any(&self) -> &dyn Any;

    /// Probe: is this handle a boxed-string reference? Safe from any thread.
    fn string_value(&self) -> Option<String> {
        None
    }

    /// Probe: is this object a solid color visual? Safe from any thread.
    fn as_solid_fill(&self) -> Option<&dyn SolidFill> {
        None
    }
}

/// An opaque, reference-counted handle to a native object instance.
///
/// May be null ("no object"). Cloning a handle only bumps the reference
/// count; the native model governs the object's lifetime. Calling threads
/// may freely pass handles around but must not read object state through
/// them — that is the owner thread's privilege.
#[derive(Clone, Default)]
pub struct NativeHandle(Option<Arc<dyn NativeObject>>);

impl NativeHandle {
    /// Create a null handle
    pub fn null() -> Self {
        Self(None)
    }

    /// Create a handle sharing an existing native object reference
    pub fn new(object: Arc<dyn NativeObject>) -> Self {
        Self(Some(object))
    }

    /// Create a handle owning a fresh native object
    pub fn wrap(object: impl NativeObject + 'static) -> Self {
        Self(Some(Arc::new(object)))
    }

    /// Check if this handle references no object
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the referenced object, if any
    pub fn object(&self) -> Option<&Arc<dyn NativeObject>> {
        self.0.as_ref()
    }

    /// Runtime class identity of the referenced object
    pub fn class_name(&self) -> Option<String> {
        self.0.as_ref().map(|object| object.class_name())
    }

    /// Boxed-string probe on the referenced object
    pub fn string_value(&self) -> Option<String> {
        self.0.as_ref().and_then(|object| object.string_value())
    }

    /// Borrow the referenced object as a concrete type
    pub fn downcast_ref<T: NativeObject + 'static>(&self) -> Option<&T> {
        self.0
            .as_ref()
            .and_then(|object| object.as_any().downcast_ref::<T>())
    }

    /// Identity comparison: do both handles reference the same object?
    pub fn ptr_eq(&self, other: &NativeHandle) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for NativeHandle {
    /// Handles compare by object identity, matching [`NativeHandle::ptr_eq`].
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(object) => write!(f, "NativeHandle({})", object.class_name()),
            None => write!(f, "NativeHandle(null)"),
        }
    }
}
