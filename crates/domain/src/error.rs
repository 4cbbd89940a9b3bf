//! Common error types used across the workspace.
//!
//! Soft precondition failures (boiling a kettle that is off, filling a bath
//! with no temperature) are not errors: they are advisory replies returned by
//! the state machines. The types here cover what the caller did wrong.

use crate::device::DeviceKind;

/// Top-level error for smarthome operations.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    /// A domain invariant was violated while building a value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A lookup did not match anything.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The device exists but its kind does not offer the operation.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
}

/// Lookup miss.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} '{id}' not found")]
pub struct NotFoundError {
    /// What was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// The key that did not match.
    pub id: String,
}

/// An operation was addressed to a device of the wrong kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device} is a {kind} and does not support {operation}")]
pub struct UnsupportedError {
    pub device: String,
    pub kind: DeviceKind,
    pub operation: &'static str,
}
