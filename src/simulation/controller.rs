/*!
 * Simulation Controller
 * Owns topology, event log, and per-link transports for one run
 */

use super::config::SimulationConfig;
use super::delivery::{
    ChannelCounters, ChannelStats, Delivery, PendingDelivery, SendOutcome, SendReport,
};
use crate::core::types::{DeliveryId, LinkId};
use crate::ipc::{build_transport, IpcError, IpcResult, Transport};
use crate::monitoring::{
    generate_run_id, run_span, DeadlockDetector, EventBus, EventLog, SimEvent,
};
use crate::process::{Link, Process, Topology};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, info, warn, Span};
use uuid::Uuid;

/// One simulation run
///
/// # State machine
/// Idle (no processes) → `add_process` → has processes → `create_link`
/// (two or more processes) → linked → `send_message`. `reset` returns to
/// idle from anywhere.
///
/// # Delivery
/// A successful send schedules a pending delivery due after the configured
/// transit delay. Completing it drains the link's transport and logs the
/// "received" entry. Pending deliveries complete in send order.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    run_id: Uuid,
    span: Span,
    topology: Topology,
    log: EventLog,
    detector: DeadlockDetector,
    channels: HashMap<LinkId, Box<dyn Transport>>,
    counters: HashMap<LinkId, ChannelCounters>,
    pending: VecDeque<PendingDelivery>,
    // Never reset, so completions scheduled before a reset cannot match.
    next_delivery_id: DeliveryId,
    events: EventBus,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let run_id = generate_run_id();
        info!(
            run_id = %run_id,
            transport = %config.transport,
            deadlock_threshold = config.deadlock_threshold,
            transit_ms = config.transit_delay.as_millis() as u64,
            "Simulation initialized"
        );
        Self {
            detector: DeadlockDetector::with_threshold(config.deadlock_threshold),
            config,
            run_id,
            span: run_span(run_id),
            topology: Topology::new(),
            log: EventLog::new(),
            channels: HashMap::new(),
            counters: HashMap::new(),
            pending: VecDeque::new(),
            next_delivery_id: 1,
            events: EventBus::new(),
        }
    }

    /// Receive every subsequent simulation event
    pub fn subscribe(&mut self) -> flume::Receiver<SimEvent> {
        self.events.subscribe()
    }

    pub fn add_process(&mut self) -> Process {
        let _entered = self.span.clone().entered();
        let process = self.topology.add_process();
        self.events.publish(SimEvent::ProcessAdded {
            name: process.name.clone(),
            slot: process.slot,
        });
        self.record(format!("Process {} added", process.name));
        process
    }

    /// Link the two most recently added processes; the link becomes active
    pub fn create_link(&mut self) -> IpcResult<Link> {
        let _entered = self.span.clone().entered();
        let link = self.topology.create_link()?;

        self.channels
            .insert(link.id, build_transport(self.config.transport));
        self.counters.insert(link.id, ChannelCounters::default());

        self.events.publish(SimEvent::LinkCreated {
            id: link.id,
            source: link.source.clone(),
            destination: link.destination.clone(),
        });
        self.record(format!("Link created: {}", link));
        Ok(link)
    }

    /// Send `text` over the active link
    ///
    /// Blank text and a missing link are input errors that change nothing.
    /// A full channel is not an error: the attempt is logged as BLOCKED and
    /// reported through `SendReport`. The detector runs after every attempt.
    pub fn send_message(&mut self, text: &str) -> IpcResult<SendReport> {
        let _entered = self.span.clone().entered();

        if text.trim().is_empty() {
            return Err(IpcError::EmptyMessage);
        }

        let link = self
            .topology
            .active_link()
            .cloned()
            .ok_or(IpcError::NoActiveLink)?;
        let channel = self
            .channels
            .get_mut(&link.id)
            .ok_or(IpcError::NoActiveLink)?;

        let (outcome, entry) = match channel.try_send(text.to_owned()) {
            Ok(()) => {
                let delivery = self.schedule_delivery(&link);
                self.bump(link.id, |c| c.sent += 1);
                let entry = format!(
                    "{} → {}: Sent '{}'",
                    link.source, link.destination, text
                );
                (SendOutcome::Queued { delivery }, entry)
            }
            Err(err) => {
                warn!(link = %link, error = %err, "Send rejected");
                self.bump(link.id, |c| c.rejected += 1);
                let entry = format!("{} BLOCKED while sending '{}'", link.source, text);
                (SendOutcome::Blocked, entry)
            }
        };
        self.record(entry.clone());

        let deadlock_suspected = self.deadlock_suspected();
        if deadlock_suspected {
            warn!(
                threshold = self.detector.threshold(),
                "Deadlock suspected in IPC simulation"
            );
        }

        let report = SendReport {
            link,
            message: text.to_owned(),
            outcome,
            deadlock_suspected,
        };
        if report.alert_raised() {
            self.events.publish(SimEvent::DeadlockAlert {
                detected: deadlock_suspected,
                trigger: entry,
            });
        }
        Ok(report)
    }

    /// Detector verdict over the current log
    pub fn deadlock_suspected(&self) -> bool {
        self.detector.detect(self.log.messages())
    }

    /// Complete delivery `id` and every older pending delivery
    ///
    /// Unknown ids (already completed, or dropped by a reset) are a no-op.
    pub fn complete_delivery(&mut self, id: DeliveryId) -> Vec<Delivery> {
        if !self.pending.iter().any(|p| p.id == id) {
            debug!(delivery = id, "Delivery no longer pending");
            return Vec::new();
        }
        self.drain_pending(|p| p.id <= id)
    }

    /// Complete every delivery due at or before `now`
    pub fn deliver_due(&mut self, now: Instant) -> Vec<Delivery> {
        self.drain_pending(|p| p.due <= now)
    }

    /// Complete every pending delivery regardless of its due time
    pub fn flush_deliveries(&mut self) -> Vec<Delivery> {
        self.drain_pending(|_| true)
    }

    /// Return to idle: processes, links, log, transports, and pending
    /// deliveries are dropped and a new run id is issued
    pub fn reset(&mut self) {
        let dropped = self.pending.len();
        self.topology.clear();
        self.log.clear();
        self.channels.clear();
        self.counters.clear();
        self.pending.clear();

        self.run_id = generate_run_id();
        self.span = run_span(self.run_id);
        info!(run_id = %self.run_id, dropped_deliveries = dropped, "Simulation reset");
        self.events.publish(SimEvent::Reset { run_id: self.run_id });
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn processes(&self) -> &[Process] {
        self.topology.processes()
    }

    pub fn links(&self) -> &[Link] {
        self.topology.links()
    }

    pub fn active_link(&self) -> Option<&Link> {
        self.topology.active_link()
    }

    pub fn channel(&self, link: LinkId) -> Option<&dyn Transport> {
        self.channels.get(&link).map(|c| c.as_ref())
    }

    pub fn pending_deliveries(&self) -> impl Iterator<Item = &PendingDelivery> {
        self.pending.iter()
    }

    /// Due instant of the oldest pending delivery
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }

    /// Per-link transport statistics, in link creation order
    pub fn channel_stats(&self) -> Vec<ChannelStats> {
        self.topology
            .links()
            .iter()
            .filter_map(|link| {
                let channel = self.channels.get(&link.id)?;
                let counters = self.counters.get(&link.id).copied().unwrap_or_default();
                Some(ChannelStats {
                    link: link.id,
                    kind: channel.kind(),
                    capacity: channel.capacity(),
                    length: channel.len(),
                    sent: counters.sent,
                    rejected: counters.rejected,
                    received: counters.received,
                })
            })
            .collect()
    }

    fn record(&mut self, message: String) {
        let entry = self.log.record(message).clone();
        self.events.publish(SimEvent::LogAppended { entry });
    }

    fn bump(&mut self, link: LinkId, update: impl FnOnce(&mut ChannelCounters)) {
        update(self.counters.entry(link).or_default());
    }

    fn schedule_delivery(&mut self, link: &Link) -> DeliveryId {
        let id = self.next_delivery_id;
        self.next_delivery_id += 1;
        self.pending.push_back(PendingDelivery {
            id,
            link: link.id,
            destination: link.destination.clone(),
            due: Instant::now() + self.config.transit_delay,
        });
        debug!(delivery = id, link = link.id, "Delivery scheduled");
        id
    }

    // Pending deliveries are in send order with non-decreasing due times,
    // so draining from the front keeps per-link FIFO.
    fn drain_pending(&mut self, mut ready: impl FnMut(&PendingDelivery) -> bool) -> Vec<Delivery> {
        let _entered = self.span.clone().entered();
        let mut completed = Vec::new();

        while self.pending.front().map_or(false, &mut ready) {
            let Some(pending) = self.pending.pop_front() else {
                break;
            };
            if let Some(delivery) = self.finish_delivery(pending) {
                completed.push(delivery);
            }
        }
        completed
    }

    fn finish_delivery(&mut self, pending: PendingDelivery) -> Option<Delivery> {
        let message = self.channels.get_mut(&pending.link)?.receive()?;
        self.bump(pending.link, |c| c.received += 1);

        self.record(format!("{} received '{}'", pending.destination, message));
        self.events.publish(SimEvent::MessageDelivered {
            link: pending.link,
            destination: pending.destination.clone(),
            message: message.clone(),
        });
        debug!(delivery = pending.id, link = pending.link, "Delivery completed");

        Some(Delivery {
            id: pending.id,
            link: pending.link,
            destination: pending.destination,
            message,
        })
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
