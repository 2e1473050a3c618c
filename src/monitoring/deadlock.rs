/*!
 * Deadlock Detector
 * Heuristic scan of the event log for blocked sends
 *
 * This is a marker counter, not wait-for-graph analysis: a verdict is true
 * once enough log messages contain "BLOCKED".
 */

use crate::core::limits::{BLOCKED_MARKER, RELAXED_DEADLOCK_THRESHOLD, STRICT_DEADLOCK_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Named detection thresholds used by the two operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlockPolicy {
    /// Two blocked entries (scripted flow)
    Strict,
    /// One blocked entry (interactive flow)
    Relaxed,
}

impl DeadlockPolicy {
    #[must_use]
    pub const fn threshold(self) -> usize {
        match self {
            DeadlockPolicy::Strict => STRICT_DEADLOCK_THRESHOLD,
            DeadlockPolicy::Relaxed => RELAXED_DEADLOCK_THRESHOLD,
        }
    }
}

/// True iff at least `threshold` messages contain the blocked marker
pub fn detect_deadlock<'a, I>(log_messages: I, threshold: usize) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    if threshold == 0 {
        return true;
    }
    log_messages
        .into_iter()
        .filter(|m| m.contains(BLOCKED_MARKER))
        .take(threshold)
        .count()
        >= threshold
}

/// Stateless detector bound to a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockDetector {
    threshold: usize,
}

impl DeadlockDetector {
    pub const fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn detect<'a, I>(&self, log_messages: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        detect_deadlock(log_messages, self.threshold)
    }
}

impl From<DeadlockPolicy> for DeadlockDetector {
    fn from(policy: DeadlockPolicy) -> Self {
        Self::with_threshold(policy.threshold())
    }
}
