/*!
 * Bounded Channel
 * Fixed-capacity FIFO message queue that rejects instead of blocking
 */

use super::traits::Transport;
use super::types::{IpcError, IpcResult, Message, TransportKind};
use crate::core::types::Size;
use std::collections::VecDeque;
use tracing::debug;

/// Fixed-capacity FIFO channel
///
/// A send into a full channel fails at once and leaves the queue untouched.
/// The log calls such a send "BLOCKED", but nothing ever waits.
#[derive(Debug, Clone)]
pub struct BoundedChannel {
    capacity: Size,
    messages: VecDeque<Message>,
}

impl BoundedChannel {
    pub fn new(capacity: Size) -> Self {
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    /// Pending messages, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Check if another send would be rejected
    pub fn is_full(&self) -> bool {
        self.messages.len() >= self.capacity
    }
}

impl Transport for BoundedChannel {
    fn try_send(&mut self, message: Message) -> IpcResult<()> {
        if self.is_full() {
            debug!(
                capacity = self.capacity,
                "Bounded channel full, rejecting message"
            );
            return Err(IpcError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.messages.push_back(message);
        debug!(
            length = self.messages.len(),
            capacity = self.capacity,
            "Message queued on bounded channel"
        );
        Ok(())
    }

    fn receive(&mut self) -> Option<Message> {
        self.messages.pop_front()
    }

    fn len(&self) -> Size {
        self.messages.len()
    }

    fn capacity(&self) -> Option<Size> {
        Some(self.capacity)
    }

    fn kind(&self) -> TransportKind {
        TransportKind::bounded(self.capacity)
    }

    fn clear(&mut self) {
        self.messages.clear();
    }
}
