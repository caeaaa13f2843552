//! Value marshaling between native boxed values and dynamic values
//!
//! `to_dynamic` is an exhaustive match over [`BoxedValue`]; precedence is
//! fixed by the union itself, and inside the `Object` arm the solid-fill
//! probe runs before the fallback wrap. Every branch is a pure
//! transformation of already-fetched data except the solid-fill branch,
//! which performs a second owner-thread round trip to read the color.
//!
//! `from_dynamic` is the reverse conversion used by property writes.

use std::collections::HashMap;

use sill_sdk::{BoxedValue, DynValue, Margin, NativeFault, NativeHandle};

use crate::dispatch::OwnerDispatcher;
use crate::error::BridgeError;

/// Platform code for "the object no longer exposes the probed surface".
const FAULT_NO_INTERFACE: u32 = 0x8000_4002;

/// Wraps an unrecognized native object reference as a new dynamic value.
///
/// The bridge object implements this by constructing a sibling bridge over
/// the same registry; tests inject fakes to observe the fallback branch.
pub trait WrapFactory: Send + Sync {
    /// Wrap a non-null native handle as a dynamic value.
    fn wrap(&self, handle: NativeHandle) -> DynValue;
}

/// Convert a native boxed value into a dynamic scripting value.
///
/// Callers must have fetched `value` on the owner thread already; the only
/// native state read here is the solid-fill color, which this function
/// dispatches itself.
pub fn to_dynamic(
    value: BoxedValue,
    dispatcher: &OwnerDispatcher,
    factory: &dyn WrapFactory,
) -> Result<DynValue, BridgeError> {
    match value {
        BoxedValue::Null => Ok(DynValue::Null),
        BoxedValue::Str(s) => Ok(DynValue::Str(s)),
        BoxedValue::I32(i) => Ok(DynValue::Number(f64::from(i))),
        BoxedValue::I64(i) => {
            // Contract: the value fits the 32-bit dynamic number range.
            // Out-of-range is a hard failure, never a silent truncation.
            if i64::from(i32::MIN) <= i && i <= i64::from(i32::MAX) {
                Ok(DynValue::Number(i as f64))
            } else {
                Err(BridgeError::IntegerRange(i))
            }
        }
        BoxedValue::F64(f) => Ok(DynValue::Number(f)),
        BoxedValue::Bool(b) => Ok(DynValue::Bool(b)),
        BoxedValue::Margin(margin) => Ok(margin_to_object(margin)),
        BoxedValue::Object(handle) => {
            if handle.is_null() {
                return Ok(DynValue::Null);
            }
            let is_fill = handle
                .object()
                .is_some_and(|object| object.as_solid_fill().is_some());
            if is_fill {
                let name = resolve_fill_name(handle, dispatcher)?;
                Ok(DynValue::Str(name.to_string()))
            } else {
                Ok(factory.wrap(handle))
            }
        }
    }
}

/// Read a solid fill's color on the owner thread and name it.
fn resolve_fill_name(
    handle: NativeHandle,
    dispatcher: &OwnerDispatcher,
) -> Result<&'static str, BridgeError> {
    let name = dispatcher.call(move || {
        match handle.object().and_then(|object| object.as_solid_fill()) {
            Some(fill) => fill.color().map(|color| color.display_name()),
            None => Err(NativeFault::new(
                FAULT_NO_INTERFACE,
                "object stopped probing as a solid color fill",
            )),
        }
    })??;
    Ok(name)
}

fn margin_to_object(margin: Margin) -> DynValue {
    let mut fields = HashMap::with_capacity(4);
    fields.insert("left".to_string(), DynValue::Number(margin.left));
    fields.insert("top".to_string(), DynValue::Number(margin.top));
    fields.insert("right".to_string(), DynValue::Number(margin.right));
    fields.insert("bottom".to_string(), DynValue::Number(margin.bottom));
    DynValue::Object(fields)
}

/// Convert a dynamic value into a native boxed value for a property write.
///
/// Numbers always box as doubles; setters coerce to the property's native
/// type themselves. A plain object converts only when it has exactly the
/// four numeric margin fields. Host-backed objects have no boxed form.
pub fn from_dynamic(value: DynValue) -> Result<BoxedValue, BridgeError> {
    match value {
        DynValue::Undefined | DynValue::Null => Ok(BoxedValue::Null),
        DynValue::Bool(b) => Ok(BoxedValue::Bool(b)),
        DynValue::Number(n) => Ok(BoxedValue::F64(n)),
        DynValue::Str(s) => Ok(BoxedValue::Str(s)),
        DynValue::Object(fields) => margin_from_fields(&fields)
            .map(BoxedValue::Margin)
            .ok_or(BridgeError::Unconvertible("object")),
        DynValue::Host(_) => Err(BridgeError::Unconvertible("host object")),
    }
}

fn margin_from_fields(fields: &HashMap<String, DynValue>) -> Option<Margin> {
    if fields.len() != 4 {
        return None;
    }
    let side = |name: &str| fields.get(name).and_then(|value| value.as_number());
    Some(Margin {
        left: side("left")?,
        top: side("top")?,
        right: side("right")?,
        bottom: side("bottom")?,
    })
}
