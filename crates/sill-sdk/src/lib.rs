//! Sill SDK - Boundary contracts for the Sill property bridge
//!
//! This crate provides the minimal types and traits needed to integrate the
//! bridge into a host application without depending on the core:
//!
//! - **Dynamic values**: the scripting runtime's value model (`value` module)
//! - **Host objects**: the dynamic-host-object contract (`host` module)
//! - **Native model**: handles, object traits, and faults (`native` module)
//! - **Boxed values**: the tagged union native getters produce (`boxed` module)
//! - **Properties**: accessor closures and descriptors (`props` module)
//! - **Diagnostics**: the sink for absorbed faults (`diag` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use sill_sdk::{BoxedValue, NativeHandle, PropertyDescriptor};
//!
//! let padding = PropertyDescriptor::read_only("Padding", |handle: &NativeHandle| {
//!     let border = handle.downcast_ref::<Border>().ok_or_else(not_a_border)?;
//!     Ok(BoxedValue::Margin(border.padding()))
//! });
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tagged union of native boxed value shapes
pub mod boxed;

/// RGBA color with display-name resolution
pub mod color;

/// Diagnostic sink for absorbed faults
pub mod diag;

/// Dynamic-host-object contract
pub mod host;

/// Native model boundary: handles, objects, faults
pub mod native;

/// Property accessor types and descriptors
pub mod props;

/// Dynamic value model of the scripting runtime
pub mod value;

pub use boxed::{BoxedValue, Margin};
pub use color::Color;
pub use diag::{DiagnosticSink, NoopSink};
pub use host::HostObject;
pub use native::{NativeFault, NativeHandle, NativeObject, SolidFill};
pub use props::{PropertyDescriptor, PropertyGetter, PropertySetter};
pub use value::{DynKind, DynValue};
