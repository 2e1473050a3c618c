/*!
 * IPC Module
 * Simulated transports: bounded channels, relay buffers, and shared cells
 */

pub mod pipe;
pub mod queue;
pub mod shm;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use pipe::UnboundedRelay;
pub use queue::BoundedChannel;
pub use shm::SharedCell;
pub use traits::Transport;
pub use types::{IpcError, IpcResult, Message, TransportKind};

/// Build a fresh transport of the given kind
pub fn build_transport(kind: TransportKind) -> Box<dyn Transport> {
    match kind {
        TransportKind::Bounded { capacity } => Box::new(BoundedChannel::new(capacity)),
        TransportKind::Relay => Box::new(UnboundedRelay::new()),
        TransportKind::Cell => Box::new(SharedCell::new()),
    }
}
