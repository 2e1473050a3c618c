/*!
 * Deferred Delivery
 * Pending "received" completions and the reports returned by sends
 */

use crate::core::serde::{is_none, is_zero_u64, is_zero_usize};
use crate::core::types::{DeliveryId, LinkId, ProcessName, Size};
use crate::ipc::types::{Message, TransportKind};
use crate::process::Link;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A queued message waiting out its transit delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelivery {
    pub id: DeliveryId,
    pub link: LinkId,
    pub destination: ProcessName,
    pub due: Instant,
}

/// A completed delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub link: LinkId,
    pub destination: ProcessName,
    pub message: Message,
}

/// Result of a send attempt on the active link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SendOutcome {
    /// Accepted; the "received" entry follows once the delivery completes
    Queued { delivery: DeliveryId },
    /// Rejected by a full channel and logged as BLOCKED
    Blocked,
}

/// What a caller learns from `send_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReport {
    pub link: Link,
    pub message: Message,
    pub outcome: SendOutcome,
    /// Detector verdict over the full log after this attempt
    pub deadlock_suspected: bool,
}

impl SendReport {
    pub fn is_blocked(&self) -> bool {
        matches!(self.outcome, SendOutcome::Blocked)
    }

    pub fn delivery(&self) -> Option<DeliveryId> {
        match self.outcome {
            SendOutcome::Queued { delivery } => Some(delivery),
            SendOutcome::Blocked => None,
        }
    }

    /// A blocked send or a positive verdict both warrant an alert
    pub fn alert_raised(&self) -> bool {
        self.is_blocked() || self.deadlock_suspected
    }
}

/// Running counters for one link's transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ChannelCounters {
    pub sent: u64,
    pub rejected: u64,
    pub received: u64,
}

/// Snapshot of one link's transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChannelStats {
    pub link: LinkId,
    pub kind: TransportKind,
    #[serde(default, skip_serializing_if = "is_none")]
    pub capacity: Option<Size>,
    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub length: Size,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub sent: u64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub rejected: u64,
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub received: u64,
}
