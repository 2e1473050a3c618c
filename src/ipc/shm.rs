/*!
 * Shared Cell
 * Single-slot overwritable value shared by two processes
 */

use super::traits::Transport;
use super::types::{IpcResult, Message, TransportKind};
use crate::core::types::Size;

/// Single-slot cell
///
/// `write` replaces the stored value; `read` returns it without consuming.
#[derive(Debug, Clone, Default)]
pub struct SharedCell {
    slot: Option<Message>,
}

impl SharedCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored value
    pub fn write(&mut self, data: Message) {
        self.slot = Some(data);
    }

    /// Last written value, if any
    pub fn read(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl Transport for SharedCell {
    fn try_send(&mut self, message: Message) -> IpcResult<()> {
        self.write(message);
        Ok(())
    }

    // Non-consuming: repeated receives see the same value.
    fn receive(&mut self) -> Option<Message> {
        self.read().map(str::to_owned)
    }

    fn len(&self) -> Size {
        usize::from(self.slot.is_some())
    }

    // Writes never fail, so there is no limit to report.
    fn capacity(&self) -> Option<Size> {
        None
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Cell
    }

    fn clear(&mut self) {
        self.slot = None;
    }
}
