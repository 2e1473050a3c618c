/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process name type ("P1", "P2", ...)
pub type ProcessName = String;

/// Link identifier type
pub type LinkId = u32;

/// Deferred delivery identifier type
pub type DeliveryId = u64;

/// Size type for capacities and counts
pub type Size = usize;
