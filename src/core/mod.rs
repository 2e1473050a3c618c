/*!
 * Core Module
 * Fundamental simulator types, limits, and serde helpers
 */

pub mod limits;
pub mod serde;
pub mod types;

// Re-export for convenience
pub use types::*;
