/*!
 * Simulator Limits and Constants
 *
 * Centralized location for default capacities, thresholds, and markers.
 * Organized by domain for discoverability.
 */

use std::time::Duration;

// =============================================================================
// TRANSPORT LIMITS
// =============================================================================

/// Default bounded channel capacity
/// Two slots, so the third send in a row is the first rejected one
pub const DEFAULT_CHANNEL_CAPACITY: usize = 2;

/// Maximum bounded channel capacity accepted from configuration
pub const MAX_CHANNEL_CAPACITY: usize = 10_000;

// =============================================================================
// DEADLOCK DETECTION
// =============================================================================

/// Substring that marks a blocked send in the event log
pub const BLOCKED_MARKER: &str = "BLOCKED";

/// Strict threshold: two blocked entries (scripted flow)
pub const STRICT_DEADLOCK_THRESHOLD: usize = 2;

/// Relaxed threshold: one blocked entry (interactive flow)
pub const RELAXED_DEADLOCK_THRESHOLD: usize = 1;

// =============================================================================
// TIMING
// =============================================================================

/// Transit time of a message across a link in the interactive flow
pub const DEFAULT_TRANSIT_DELAY: Duration = Duration::from_millis(600);

// =============================================================================
// PROCESS NAMING
// =============================================================================

/// Prefix of sequential process names
pub const PROCESS_NAME_PREFIX: &str = "P";
