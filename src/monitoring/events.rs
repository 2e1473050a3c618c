/*!
 * Simulation Events
 * Typed notifications for presentation layers, fanned out over flume
 */

use super::eventlog::LogEntry;
use crate::core::types::{LinkId, ProcessName, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Everything a presentation layer needs to mirror the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum SimEvent {
    ProcessAdded {
        name: ProcessName,
        slot: Size,
    },
    LinkCreated {
        id: LinkId,
        source: ProcessName,
        destination: ProcessName,
    },
    LogAppended {
        entry: LogEntry,
    },
    MessageDelivered {
        link: LinkId,
        destination: ProcessName,
        message: String,
    },
    /// Raised on a blocked send and whenever the detector fires
    DeadlockAlert {
        detected: bool,
        trigger: String,
    },
    Reset {
        run_id: Uuid,
    },
}

/// Broadcast of simulation events to any number of subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<flume::Sender<SimEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> flume::Receiver<SimEvent> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        debug!(subscribers = self.subscribers.len(), "Event subscriber added");
        rx
    }

    /// Deliver to every live subscriber, dropping disconnected ones
    pub fn publish(&mut self, event: SimEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_subscribers_are_dropped() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());

        bus.publish(SimEvent::ProcessAdded {
            name: "P1".into(),
            slot: 0,
        });

        assert_eq!(bus.subscriber_count(), 1);
        assert!(matches!(kept.try_recv(), Ok(SimEvent::ProcessAdded { .. })));
    }

    #[test]
    fn test_event_json_shape() {
        let event = SimEvent::LinkCreated {
            id: 1,
            source: "P1".into(),
            destination: "P2".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"event":"link_created","id":1,"source":"P1","destination":"P2"}"#
        );
    }
}
