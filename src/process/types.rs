/*!
 * Process Types
 * Simulated processes and the directed links between them
 */

use crate::core::limits::PROCESS_NAME_PREFIX;
use crate::core::types::{LinkId, ProcessName, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated process (a named node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub name: ProcessName,
    /// Placement hint for presentation: 0-based creation ordinal
    pub slot: Size,
}

impl Process {
    /// Process at the given creation ordinal, named "P<ordinal + 1>"
    #[must_use]
    pub fn at_slot(slot: Size) -> Self {
        Self {
            name: format!("{}{}", PROCESS_NAME_PREFIX, slot + 1),
            slot,
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Directed link from `source` to `destination`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub source: ProcessName,
    pub destination: ProcessName,
}

impl Link {
    /// Check if a process is either endpoint
    #[must_use]
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.destination == name
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.destination)
    }
}
