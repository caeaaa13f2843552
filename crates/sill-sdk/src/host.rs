//! HostObject trait — the dynamic-host-object contract
//!
//! The scripting runtime routes property access on bridged objects through
//! this trait. The bridge core provides the implementation; embedders may
//! provide their own for testing or for objects that are not native-backed.

use crate::value::DynValue;

/// A dynamically-typed object whose property access is delegated to the host.
///
/// Implementations must be callable from any scripting thread, so the trait
/// is `Send + Sync`. The contract mirrors the runtime's property machinery:
///
/// - `get` returns [`DynValue::Undefined`] for unknown names (the default
///   property-miss outcome), never an error.
/// - `set` has no return channel; failed writes are absorbed by the host.
/// - `property_names` lists the enumerable names, without duplicates.
pub trait HostObject: Send + Sync {
    /// Read a property by name.
    fn get(&self, name: &str) -> DynValue;

    /// Write a property by name.
    fn set(&self, name: &str, value: DynValue);

    /// Enumerate the property names of this object.
    fn property_names(&self) -> Vec<String>;
}
