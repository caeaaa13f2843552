//! Fake thread-affine widget model shared by the integration tests.
//!
//! `Border` is the workhorse: scalar, margin, solid-fill, and child-object
//! properties, plus one getter that always faults. Every state read or
//! write asserts it happens on a single thread, so any breach of the
//! owner-thread discipline fails the suite loudly.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use sill_bridge::{
    BoxedValue, Color, DiagnosticSink, Margin, MetadataRegistry, NativeFault, NativeHandle,
    NativeObject, OwnerDispatcher, SolidFill,
};

const FAULT_SIMULATED: u32 = 0x8000_4005;
const FAULT_TYPE_MISMATCH: u32 = 0x8000_4002;

// ============================================================================
// Diagnostics
// ============================================================================

/// Sink that records every absorbed fault for assertions.
#[derive(Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn fault(&self, context: &str, error: &dyn std::error::Error) {
        self.entries.lock().push(format!("{context}: {error}"));
    }
}

// ============================================================================
// Apartment discipline guard
// ============================================================================

/// Asserts that all state touches come from a single thread.
#[derive(Default)]
struct Affinity {
    owner: Mutex<Option<ThreadId>>,
}

impl Affinity {
    fn touch(&self) {
        let current = thread::current().id();
        let mut owner = self.owner.lock();
        match *owner {
            Some(expected) => {
                assert_eq!(expected, current, "native state touched off the owner thread")
            }
            None => *owner = Some(current),
        }
    }
}

// ============================================================================
// Widgets
// ============================================================================

/// Solid color visual.
pub struct Brush {
    color: Color,
}

impl Brush {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl NativeObject for Brush {
    fn class_name(&self) -> String {
        "SolidColorBrush".to_string()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_solid_fill(&self) -> Option<&dyn SolidFill> {
        Some(self)
    }
}

impl SolidFill for Brush {
    fn color(&self) -> Result<Color, NativeFault> {
        Ok(self.color)
    }
}

/// Boxed-string reference.
pub struct StringBox(pub String);

impl NativeObject for StringBox {
    fn class_name(&self) -> String {
        "String".to_string()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn string_value(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Simple container child.
pub struct StackPanel;

impl NativeObject for StackPanel {
    fn class_name(&self) -> String {
        "StackPanel".to_string()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A border that reports a more specific runtime class.
pub struct FancyBorder;

impl NativeObject for FancyBorder {
    fn class_name(&self) -> String {
        "FancyBorder".to_string()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The main fixture widget.
pub struct Border {
    affinity: Affinity,
    padding: Mutex<Margin>,
    width: Mutex<f64>,
    title: String,
    visible: bool,
    child_count: i32,
    pixel_budget: i64,
    byte_size: i64,
    background: NativeHandle,
    child: NativeHandle,
    reads: AtomicUsize,
}

impl Border {
    pub fn new() -> Self {
        Self {
            affinity: Affinity::default(),
            padding: Mutex::new(Margin::new(2.0, 4.0, 2.0, 4.0)),
            width: Mutex::new(120.0),
            title: "main border".to_string(),
            visible: true,
            child_count: 3,
            pixel_budget: 1_000_000,
            byte_size: 5_000_000_000,
            background: NativeHandle::wrap(Brush::new(Color::rgb(0, 0, 255))),
            child: NativeHandle::wrap(StackPanel),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.affinity.touch();
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn padding(&self) -> Margin {
        self.read();
        *self.padding.lock()
    }

    fn set_padding(&self, margin: Margin) {
        self.affinity.touch();
        *self.padding.lock() = margin;
    }

    fn width(&self) -> f64 {
        self.read();
        *self.width.lock()
    }

    fn set_width(&self, width: f64) {
        self.affinity.touch();
        *self.width.lock() = width;
    }
}

impl NativeObject for Border {
    fn class_name(&self) -> String {
        "Border".to_string()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Metadata population
// ============================================================================

fn expect_border(handle: &NativeHandle) -> Result<&Border, NativeFault> {
    handle
        .downcast_ref::<Border>()
        .ok_or_else(|| NativeFault::new(FAULT_TYPE_MISMATCH, "expected a Border"))
}

/// The registry a host would populate at startup for this widget set.
pub fn widget_registry(dispatcher: OwnerDispatcher) -> Arc<MetadataRegistry> {
    let mut builder = MetadataRegistry::builder();
    builder
        .class("Border")
        .getter("Padding", |handle| {
            Ok(BoxedValue::Margin(expect_border(handle)?.padding()))
        })
        .setter("Padding", |handle, value| match value {
            BoxedValue::Margin(margin) => {
                expect_border(handle)?.set_padding(margin);
                Ok(())
            }
            other => Err(NativeFault::new(
                FAULT_TYPE_MISMATCH,
                format!("Padding takes a margin, got {}", other.kind_name()),
            )),
        })
        .getter("Width", |handle| {
            Ok(BoxedValue::F64(expect_border(handle)?.width()))
        })
        .setter("Width", |handle, value| match value {
            BoxedValue::F64(width) => {
                expect_border(handle)?.set_width(width);
                Ok(())
            }
            other => Err(NativeFault::new(
                FAULT_TYPE_MISMATCH,
                format!("Width takes a number, got {}", other.kind_name()),
            )),
        })
        .getter("Title", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::Str(border.title.clone()))
        })
        .getter("Visible", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::Bool(border.visible))
        })
        .getter("ChildCount", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::I32(border.child_count))
        })
        .getter("PixelBudget", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::I64(border.pixel_budget))
        })
        .getter("ByteSize", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::I64(border.byte_size))
        })
        .getter("Background", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::Object(border.background.clone()))
        })
        .getter("Child", |handle| {
            let border = expect_border(handle)?;
            border.read();
            Ok(BoxedValue::Object(border.child.clone()))
        })
        .getter("Glitch", |_| {
            Err(NativeFault::new(FAULT_SIMULATED, "simulated native fault"))
        });
    builder
        .class("FancyBorder")
        .getter("Flair", |_| Ok(BoxedValue::from("sparkles")));
    builder
        .class("StackPanel")
        .getter("Orientation", |_| Ok(BoxedValue::from("Vertical")));
    builder.build(dispatcher)
}
