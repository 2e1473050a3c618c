/*!
 * IPC Traits
 * Point-to-point transport abstraction
 */

use super::types::{IpcResult, Message, TransportKind};
use crate::core::types::Size;
use std::fmt::Debug;

/// Point-to-point transport between two simulated processes
///
/// Implementations never block: a send that cannot be accepted fails
/// immediately. No internal locking; callers sharing a transport across
/// threads must serialize `send`/`receive`.
pub trait Transport: Debug + Send + Sync {
    /// Try to accept a message, reporting why it was rejected
    fn try_send(&mut self, message: Message) -> IpcResult<()>;

    /// Accept a message; `false` leaves the transport unchanged
    fn send(&mut self, message: Message) -> bool {
        self.try_send(message).is_ok()
    }

    /// Take the next message, or `None` when nothing is pending
    fn receive(&mut self) -> Option<Message>;

    /// Number of pending messages
    fn len(&self) -> Size;

    /// Check if nothing is pending
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capacity limit, `None` when unbounded
    fn capacity(&self) -> Option<Size>;

    /// Transport variant
    fn kind(&self) -> TransportKind;

    /// Drop all pending state
    fn clear(&mut self);
}
