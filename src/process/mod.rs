/*!
 * Process Module
 * Simulated processes, links, and the topology that holds them
 */

pub mod topology;
pub mod types;

// Re-export for convenience
pub use topology::Topology;
pub use types::{Link, Process};
