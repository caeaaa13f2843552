//! DynValue — the scripting runtime's dynamic value model
//!
//! The bridge hands one of these back for every property read. `Undefined`
//! is the host's default property-miss outcome and is distinct from `Null`,
//! which is a real value a native getter can produce.

use std::collections::HashMap;
use std::sync::Arc;

use crate::host::HostObject;

/// Runtime kind of a [`DynValue`], for dispatch and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynKind {
    /// Property-miss outcome; not a real value
    Undefined,
    /// Dynamic null
    Null,
    /// Boolean
    Bool,
    /// Double-precision number
    Number,
    /// UTF-8 string
    String,
    /// Plain object with named fields
    Object,
    /// Object backed by a host object implementation
    Host,
}

/// A dynamic scripting value.
///
/// Plain objects own their fields; host-backed objects are shared behind an
/// `Arc` so the scripting runtime and the bridge can hold them concurrently.
#[derive(Clone)]
pub enum DynValue {
    /// Property-miss outcome (the host's default behavior for unknown names)
    Undefined,
    /// Dynamic null
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (always double precision)
    Number(f64),
    /// String value
    Str(String),
    /// Plain object with named fields; key order is irrelevant
    Object(HashMap<String, DynValue>),
    /// Object whose property access is delegated to a host object
    Host(Arc<dyn HostObject>),
}

impl DynValue {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an undefined value
    pub fn undefined() -> Self {
        DynValue::Undefined
    }

    /// Create a null value
    pub fn null() -> Self {
        DynValue::Null
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        DynValue::Bool(b)
    }

    /// Create a numeric value
    pub fn number(n: f64) -> Self {
        DynValue::Number(n)
    }

    /// Create a string value from UTF-8 text
    pub fn string(s: impl Into<String>) -> Self {
        DynValue::Str(s.into())
    }

    /// Create a plain object from named fields
    pub fn object(fields: HashMap<String, DynValue>) -> Self {
        DynValue::Object(fields)
    }

    /// Create an object backed by a host object
    pub fn host(object: Arc<dyn HostObject>) -> Self {
        DynValue::Host(object)
    }

    // ========================================================================
    // Type checks
    // ========================================================================

    /// Check if this is the undefined (property-miss) outcome
    pub fn is_undefined(&self) -> bool {
        matches!(self, DynValue::Undefined)
    }

    /// Check if this is dynamic null
    pub fn is_null(&self) -> bool {
        matches!(self, DynValue::Null)
    }

    /// Get the runtime kind of this value
    pub fn kind(&self) -> DynKind {
        match self {
            DynValue::Undefined => DynKind::Undefined,
            DynValue::Null => DynKind::Null,
            DynValue::Bool(_) => DynKind::Bool,
            DynValue::Number(_) => DynKind::Number,
            DynValue::Str(_) => DynKind::String,
            DynValue::Object(_) => DynKind::Object,
            DynValue::Host(_) => DynKind::Host,
        }
    }

    /// Get the kind name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            DynValue::Undefined => "undefined",
            DynValue::Null => "null",
            DynValue::Bool(_) => "bool",
            DynValue::Number(_) => "number",
            DynValue::Str(_) => "string",
            DynValue::Object(_) => "object",
            DynValue::Host(_) => "host object",
        }
    }

    // ========================================================================
    // Extractors
    // ========================================================================

    /// Extract the boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract the numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DynValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract the string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extract the fields of a plain object
    pub fn as_object(&self) -> Option<&HashMap<String, DynValue>> {
        match self {
            DynValue::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Extract the host object backing this value
    pub fn as_host(&self) -> Option<&Arc<dyn HostObject>> {
        match self {
            DynValue::Host(object) => Some(object),
            _ => None,
        }
    }
}

impl Default for DynValue {
    fn default() -> Self {
        DynValue::Undefined
    }
}

impl PartialEq for DynValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DynValue::Undefined, DynValue::Undefined) => true,
            (DynValue::Null, DynValue::Null) => true,
            (DynValue::Bool(a), DynValue::Bool(b)) => a == b,
            (DynValue::Number(a), DynValue::Number(b)) => a == b,
            (DynValue::Str(a), DynValue::Str(b)) => a == b,
            (DynValue::Object(a), DynValue::Object(b)) => a == b,
            // Host objects compare by identity, not structure
            (DynValue::Host(a), DynValue::Host(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for DynValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DynValue::Undefined => write!(f, "DynValue::Undefined"),
            DynValue::Null => write!(f, "DynValue::Null"),
            DynValue::Bool(b) => write!(f, "DynValue::Bool({b})"),
            DynValue::Number(n) => write!(f, "DynValue::Number({n})"),
            DynValue::Str(s) => write!(f, "DynValue::Str({s:?})"),
            DynValue::Object(fields) => write!(f, "DynValue::Object({fields:?})"),
            DynValue::Host(_) => write!(f, "DynValue::Host(..)"),
        }
    }
}
