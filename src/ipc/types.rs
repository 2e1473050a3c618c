/*!
 * IPC Types
 * Common types for simulated inter-process communication
 */

use crate::core::limits::DEFAULT_CHANNEL_CAPACITY;
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// IPC operation result
pub type IpcResult<T> = Result<T, IpcError>;

/// Message payload carried by every transport
pub type Message = String;

/// Unified simulator error type with miette diagnostics
///
/// None of these are fatal: the simulation stays operable after any of them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum IpcError {
    /// Blank or whitespace-only message text
    #[error("Message text is empty")]
    #[diagnostic(
        code(ipc::empty_message),
        help("Type a message before sending.")
    )]
    EmptyMessage,

    /// Send attempted before any link exists
    #[error("No active link to send on")]
    #[diagnostic(
        code(ipc::no_active_link),
        help("Create a link between two processes first.")
    )]
    NoActiveLink,

    /// Bounded channel is full
    #[error("Channel full: capacity {capacity}")]
    #[diagnostic(
        code(ipc::capacity_exceeded),
        help("Receive pending messages to free a slot. The send is logged as BLOCKED.")
    )]
    CapacityExceeded { capacity: Size },

    /// Link creation with fewer than two processes
    #[error("Insufficient processes for a link: {present} present, {required} required")]
    #[diagnostic(
        code(topology::insufficient_nodes),
        help("Add another process before creating a link.")
    )]
    InsufficientNodes { required: Size, present: Size },

    /// Unusable configuration value
    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(config::invalid),
        help("Check the IPC_SIM_* environment variables.")
    )]
    InvalidConfig(String),
}

impl IpcError {
    /// Errors caused by user input that leave the simulation untouched
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, IpcError::EmptyMessage | IpcError::NoActiveLink)
    }
}

/// Transport variant selected for new links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TransportKind {
    /// Fixed-capacity FIFO channel
    Bounded { capacity: Size },
    /// Unbounded FIFO relay buffer
    Relay,
    /// Single-slot overwritable cell
    Cell,
}

impl TransportKind {
    /// Bounded channel with the given capacity
    #[must_use]
    pub const fn bounded(capacity: Size) -> Self {
        TransportKind::Bounded { capacity }
    }

    /// Capacity when bounded
    #[must_use]
    pub const fn capacity(&self) -> Option<Size> {
        match self {
            TransportKind::Bounded { capacity } => Some(*capacity),
            TransportKind::Relay | TransportKind::Cell => None,
        }
    }
}

impl Default for TransportKind {
    fn default() -> Self {
        TransportKind::bounded(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Bounded { capacity } => write!(f, "bounded({})", capacity),
            TransportKind::Relay => f.write_str("relay"),
            TransportKind::Cell => f.write_str("cell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(IpcError::EmptyMessage.is_input_error());
        assert!(IpcError::NoActiveLink.is_input_error());
        assert!(!IpcError::CapacityExceeded { capacity: 2 }.is_input_error());
        assert!(!IpcError::InsufficientNodes { required: 2, present: 1 }.is_input_error());
    }

    #[test]
    fn test_error_serializes_with_tag() {
        let json = serde_json::to_string(&IpcError::CapacityExceeded { capacity: 2 }).unwrap();
        assert_eq!(json, r#"{"error":"capacity_exceeded","details":{"capacity":2}}"#);
    }

    #[test]
    fn test_transport_kind_capacity() {
        assert_eq!(TransportKind::default().capacity(), Some(2));
        assert_eq!(TransportKind::Relay.capacity(), None);
        assert_eq!(TransportKind::Cell.to_string(), "cell");
    }
}
