//! Sill Bridge — dynamic property access over a thread-affine native model
//!
//! This crate lets a dynamically-typed scripting runtime read, write, and
//! enumerate properties on objects of a strongly-typed native widget model
//! whose objects may only be touched from one designated owner thread:
//! - **Registry**: class-name → property-descriptor tables (`registry` module)
//! - **Dispatch**: synchronous hand-off to the owner thread (`dispatch` module)
//! - **Marshal**: native boxed values ⇄ dynamic values (`marshal` module)
//! - **Object**: the per-native-object host-object façade (`object` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use sill_bridge::{BridgeObject, MetadataRegistry, OwnerThread};
//!
//! let owner = OwnerThread::spawn()?;
//! let mut builder = MetadataRegistry::builder();
//! builder
//!     .class("Border")
//!     .getter("Padding", |handle| Ok(border_padding(handle)?.into()));
//! let registry = builder.build(owner.dispatcher().clone());
//!
//! let root = BridgeObject::new(window_handle, registry).into_dynamic();
//! // hand `root` to the scripting runtime as a host object
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Default diagnostic sink backed by `tracing`
pub mod diag;

/// Owner-thread dispatch bridge
pub mod dispatch;

/// Bridge error taxonomy
pub mod error;

/// Value marshaling between boxed and dynamic values
pub mod marshal;

/// Dynamic property bridge object
pub mod object;

/// Metadata registry
pub mod registry;

// ============================================================================
// Re-exports
// ============================================================================

pub use diag::TracingSink;
pub use dispatch::{owner_channel, DispatchError, OwnerDispatcher, OwnerLoop, OwnerThread};
pub use error::BridgeError;
pub use marshal::{from_dynamic, to_dynamic, WrapFactory};
pub use object::{BridgeObject, Fetched, CLASS_NAME_PROPERTY};
pub use registry::{ClassBuilder, MetadataRegistry, MetadataRegistryBuilder};

// Boundary contracts, re-exported for embedders that only link the core
pub use sill_sdk as sdk;
pub use sill_sdk::{
    BoxedValue, Color, DiagnosticSink, DynKind, DynValue, HostObject, Margin, NativeFault,
    NativeHandle, NativeObject, NoopSink, PropertyDescriptor, SolidFill,
};
