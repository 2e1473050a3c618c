/*!
 * Relay Buffer
 * Unbounded FIFO relay between two processes
 */

use super::traits::Transport;
use super::types::{IpcResult, Message, TransportKind};
use crate::core::types::Size;
use std::collections::VecDeque;

/// Unbounded relay; every send is accepted
#[derive(Debug, Clone, Default)]
pub struct UnboundedRelay {
    buffer: VecDeque<Message>,
}

impl UnboundedRelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for UnboundedRelay {
    fn try_send(&mut self, message: Message) -> IpcResult<()> {
        self.buffer.push_back(message);
        Ok(())
    }

    fn receive(&mut self) -> Option<Message> {
        self.buffer.pop_front()
    }

    fn len(&self) -> Size {
        self.buffer.len()
    }

    fn capacity(&self) -> Option<Size> {
        None
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Relay
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
