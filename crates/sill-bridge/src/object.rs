//! Dynamic property bridge object
//!
//! One [`BridgeObject`] fronts one native object: it implements the
//! scripting runtime's host-object contract by composing registry lookup,
//! owner-thread dispatch, and value marshaling. The object is stateless
//! beyond its immutable fields — every operation is computed fresh from
//! `(handle, metadata, name)`.
//!
//! `try_get` exposes the explicit outcome (value, absent, or failed with a
//! cause). The `HostObject` methods apply the contract's containment policy
//! on top: every failure is reported to the diagnostic sink and surfaced as
//! the default-miss outcome, so no native fault ever reaches the scripting
//! runtime as an exception.

use std::sync::Arc;

use sill_sdk::{DiagnosticSink, DynValue, HostObject, NativeHandle};

use crate::diag::TracingSink;
use crate::error::BridgeError;
use crate::marshal::{self, WrapFactory};
use crate::registry::MetadataRegistry;

/// Synthetic property answering the wrapped object's runtime class name.
/// Served from any thread, without owner-thread dispatch.
pub const CLASS_NAME_PROPERTY: &str = "className";

/// Synthetic sole property of a boxed-string handle, signaling that the
/// object is a scalar string wrapper.
const STRING_PSEUDO_PROPERTY: &str = "string";

/// Explicit outcome of a property fetch.
///
/// Distinguishes "the registry knows no such property" from "the fetch
/// failed", which the host-object contract otherwise conflates into the
/// default-miss outcome.
#[derive(Debug)]
pub enum Fetched {
    /// The property exists and produced a value
    Value(DynValue),
    /// No such property; fall back to default host behavior
    Absent,
    /// The fetch failed between the runtime and the native model
    Failed(BridgeError),
}

/// Per-native-object façade implementing the host-object contract.
pub struct BridgeObject {
    handle: NativeHandle,
    metadata: Arc<MetadataRegistry>,
    sink: Arc<dyn DiagnosticSink>,
}

impl BridgeObject {
    /// Bridge a native handle, reporting absorbed faults to `tracing`.
    pub fn new(handle: NativeHandle, metadata: Arc<MetadataRegistry>) -> Self {
        Self::with_sink(handle, metadata, Arc::new(TracingSink))
    }

    /// Bridge a native handle with a custom diagnostic sink.
    pub fn with_sink(
        handle: NativeHandle,
        metadata: Arc<MetadataRegistry>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            handle,
            metadata,
            sink,
        }
    }

    /// The wrapped native handle
    pub fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    /// The registry this bridge consults
    pub fn metadata(&self) -> &Arc<MetadataRegistry> {
        &self.metadata
    }

    /// Expose this bridge to the scripting runtime as a dynamic value.
    pub fn into_dynamic(self) -> DynValue {
        DynValue::host(Arc::new(self))
    }

    /// Fetch a property with an explicit outcome.
    ///
    /// `className` is answered from the calling thread; everything else is
    /// one owner-thread round trip through the registered getter, plus a
    /// second one inside the marshaler for solid-fill values.
    pub fn try_get(&self, name: &str) -> Fetched {
        if name == CLASS_NAME_PROPERTY {
            return match self.handle.class_name() {
                Some(class) => Fetched::Value(DynValue::string(class)),
                None => Fetched::Absent,
            };
        }

        let Some(class) = self.handle.class_name() else {
            return Fetched::Absent;
        };
        let Some(descriptor) = self.metadata.lookup(&class, name) else {
            return Fetched::Absent;
        };
        let Some(getter) = descriptor.getter().cloned() else {
            // Registered but write-only: reads as dynamic null
            return Fetched::Value(DynValue::Null);
        };

        let handle = self.handle.clone();
        let boxed = match self.metadata.dispatcher().call(move || getter(&handle)) {
            Ok(Ok(boxed)) => boxed,
            Ok(Err(fault)) => return Fetched::Failed(fault.into()),
            Err(gone) => return Fetched::Failed(gone.into()),
        };

        match marshal::to_dynamic(boxed, self.metadata.dispatcher(), self) {
            Ok(value) => Fetched::Value(value),
            Err(error) => Fetched::Failed(error),
        }
    }

    /// Write a property through its registered setter.
    ///
    /// Returns `Ok(true)` when a setter ran, `Ok(false)` when the property
    /// is unknown or read-only (the write is a no-op, preserving host-object
    /// semantics for read-only registries). Setter faults are reported to
    /// the sink on the owner thread and swallowed; the void dispatch shape
    /// still releases the caller.
    pub fn try_set(&self, name: &str, value: DynValue) -> Result<bool, BridgeError> {
        let Some(class) = self.handle.class_name() else {
            return Ok(false);
        };
        let Some(descriptor) = self.metadata.lookup(&class, name) else {
            return Ok(false);
        };
        let Some(setter) = descriptor.setter().cloned() else {
            return Ok(false);
        };

        let boxed = marshal::from_dynamic(value)?;
        let handle = self.handle.clone();
        let sink = self.sink.clone();
        let context = format!("set({name})");
        self.metadata.dispatcher().run(move || {
            if let Err(fault) = setter(&handle, boxed) {
                sink.fault(&context, &fault);
            }
        })?;
        Ok(true)
    }
}

impl HostObject for BridgeObject {
    fn get(&self, name: &str) -> DynValue {
        match self.try_get(name) {
            Fetched::Value(value) => value,
            Fetched::Absent => DynValue::Undefined,
            Fetched::Failed(error) => {
                self.sink.fault(&format!("get({name})"), &error);
                DynValue::Undefined
            }
        }
    }

    fn set(&self, name: &str, value: DynValue) {
        if let Err(error) = self.try_set(name, value) {
            self.sink.fault(&format!("set({name})"), &error);
        }
    }

    fn property_names(&self) -> Vec<String> {
        if self.handle.is_null() {
            return Vec::new();
        }
        if self.handle.string_value().is_some() {
            return vec![STRING_PSEUDO_PROPERTY.to_string()];
        }

        let metadata = self.metadata.clone();
        let handle = self.handle.clone();
        let names = self.metadata.dispatcher().call(move || {
            let mut names = vec![CLASS_NAME_PROPERTY.to_string()];
            // The runtime class decides what enumerates, not the declared
            // type the handle was obtained through.
            if let Some(class) = handle.class_name() {
                metadata.append_property_names(&class, &mut names);
            }
            names
        });
        match names {
            Ok(names) => names,
            Err(gone) => {
                self.sink
                    .fault("property_names", &BridgeError::from(gone));
                Vec::new()
            }
        }
    }
}

impl WrapFactory for BridgeObject {
    /// Wrap a child handle as a sibling bridge sharing this bridge's
    /// registry and sink.
    fn wrap(&self, handle: NativeHandle) -> DynValue {
        BridgeObject::with_sink(handle, self.metadata.clone(), self.sink.clone()).into_dynamic()
    }
}

impl std::fmt::Debug for BridgeObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeObject")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::OwnerThread;
    use sill_sdk::{BoxedValue, NativeObject};
    use std::any::Any;

    struct Spacer;

    impl NativeObject for Spacer {
        fn class_name(&self) -> String {
            "Spacer".to_string()
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn spacer_bridge(owner: &OwnerThread) -> BridgeObject {
        let mut builder = MetadataRegistry::builder();
        builder
            .class("Spacer")
            .getter("Thickness", |_| Ok(BoxedValue::F64(8.0)))
            .setter("Tag", |_, _| Ok(()));
        let registry = builder.build(owner.dispatcher().clone());
        BridgeObject::new(NativeHandle::wrap(Spacer), registry)
    }

    #[test]
    fn test_class_name_without_dispatch() {
        let owner = OwnerThread::spawn().expect("spawn owner");
        let bridge = spacer_bridge(&owner);
        let before = bridge.metadata().dispatcher().dispatch_count();
        assert_eq!(bridge.get(CLASS_NAME_PROPERTY), DynValue::string("Spacer"));
        assert_eq!(bridge.metadata().dispatcher().dispatch_count(), before);
        drop(bridge);
        owner.join();
    }

    #[test]
    fn test_get_dispatches_registered_getter() {
        let owner = OwnerThread::spawn().expect("spawn owner");
        let bridge = spacer_bridge(&owner);
        assert_eq!(bridge.get("Thickness"), DynValue::Number(8.0));
        drop(bridge);
        owner.join();
    }

    #[test]
    fn test_write_only_property_reads_null() {
        let owner = OwnerThread::spawn().expect("spawn owner");
        let bridge = spacer_bridge(&owner);
        assert!(matches!(bridge.try_get("Tag"), Fetched::Value(DynValue::Null)));
        drop(bridge);
        owner.join();
    }

    #[test]
    fn test_unknown_property_is_absent() {
        let owner = OwnerThread::spawn().expect("spawn owner");
        let bridge = spacer_bridge(&owner);
        assert!(matches!(bridge.try_get("Nope"), Fetched::Absent));
        assert_eq!(bridge.get("Nope"), DynValue::Undefined);
        drop(bridge);
        owner.join();
    }

    #[test]
    fn test_null_handle_bridge() {
        let owner = OwnerThread::spawn().expect("spawn owner");
        let registry = MetadataRegistry::builder().build(owner.dispatcher().clone());
        let bridge = BridgeObject::new(NativeHandle::null(), registry);
        assert!(matches!(bridge.try_get(CLASS_NAME_PROPERTY), Fetched::Absent));
        assert!(matches!(bridge.try_get("Anything"), Fetched::Absent));
        assert!(bridge.property_names().is_empty());
        drop(bridge);
        owner.join();
    }
}
