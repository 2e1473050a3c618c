/*!
 * Event Log
 * Append-only, timestamped record of simulation actions
 */

use crate::core::serde::system_time_micros;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use time::OffsetDateTime;

/// One log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(with = "system_time_micros")]
    pub timestamp: SystemTime,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            message: message.into(),
        }
    }

    /// Display form: "[HH:MM:SS] message" (UTC)
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = OffsetDateTime::from(self.timestamp);
        write!(
            f,
            "[{:02}:{:02}:{:02}] {}",
            at.hour(),
            at.minute(),
            at.second(),
            self.message
        )
    }
}

/// Append-only event log
///
/// Entries are never mutated or removed during a run; only a simulation
/// reset clears the log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current time
    pub fn record(&mut self, message: impl Into<String>) -> &LogEntry {
        self.entries.push(LogEntry::new(message));
        &self.entries[self.entries.len() - 1]
    }

    /// Raw messages in causal order
    pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.message.as_str())
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Rendered display lines
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(LogEntry::render).collect()
    }

    /// Number of messages containing `marker`
    pub fn count_matching(&self, marker: &str) -> usize {
        self.messages().filter(|m| m.contains(marker)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
