//! Bridge error taxonomy.

use sill_sdk::NativeFault;

use crate::dispatch::DispatchError;

/// Errors a property operation can hit between the scripting runtime and the
/// native model.
///
/// None of these ever cross the host-object contract: the bridge object
/// reports them to its diagnostic sink and surfaces the default-miss outcome
/// instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// The native model faulted while executing on the owner thread
    #[error("{0}")]
    Native(#[from] NativeFault),

    /// The owner thread is gone or stopped servicing requests
    #[error("{0}")]
    OwnerGone(#[from] DispatchError),

    /// A boxed 64-bit integer violated the 32-bit dynamic number contract
    #[error("64-bit value {0} does not fit the 32-bit dynamic number contract")]
    IntegerRange(i64),

    /// A dynamic value has no native boxed representation
    #[error("no conversion from dynamic {0} to a native boxed value")]
    Unconvertible(&'static str),
}
