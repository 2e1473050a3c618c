/*!
 * Simulation Controller Tests
 * Send routing, logging, alerts, deferred delivery, and reset
 */

use ipc_debugger::simulation::ChannelStats;
use ipc_debugger::{
    IpcError, SendOutcome, SimEvent, Simulation, SimulationConfig, TransportKind,
};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

fn linked(config: SimulationConfig) -> Simulation {
    let mut sim = Simulation::new(config);
    sim.add_process();
    sim.add_process();
    sim.create_link().unwrap();
    sim
}

fn messages(sim: &Simulation) -> Vec<String> {
    sim.log().messages().map(str::to_owned).collect()
}

#[test]
fn test_setup_is_logged() {
    let sim = linked(SimulationConfig::interactive());
    assert_eq!(
        messages(&sim),
        vec!["Process P1 added", "Process P2 added", "Link created: P1 → P2"]
    );
}

#[test]
fn test_blank_message_rejected_without_logging() {
    let mut sim = linked(SimulationConfig::interactive());
    let before = sim.log().len();

    assert_eq!(sim.send_message("").unwrap_err(), IpcError::EmptyMessage);
    assert_eq!(sim.send_message("   \t").unwrap_err(), IpcError::EmptyMessage);
    assert_eq!(sim.log().len(), before);
    assert_eq!(sim.pending_deliveries().count(), 0);
}

#[test]
fn test_send_without_link_rejected() {
    let mut sim = Simulation::new(SimulationConfig::interactive());
    sim.add_process();
    sim.add_process();

    let err = sim.send_message("hello").unwrap_err();
    assert_eq!(err, IpcError::NoActiveLink);
    assert!(err.is_input_error());
    assert_eq!(sim.log().len(), 2);
}

#[test]
fn test_create_link_failure_changes_nothing() {
    let mut sim = Simulation::new(SimulationConfig::interactive());
    sim.add_process();

    assert!(matches!(
        sim.create_link(),
        Err(IpcError::InsufficientNodes { present: 1, .. })
    ));
    assert!(sim.links().is_empty());
    assert_eq!(sim.log().len(), 1);
}

#[test]
fn test_successful_send_logs_then_delivers() {
    let mut sim = linked(SimulationConfig::interactive());

    let report = sim.send_message("hello").unwrap();
    assert!(!report.is_blocked());
    assert!(!report.deadlock_suspected);
    assert_eq!(report.link.destination, "P2");

    let delivered = sim.complete_delivery(report.delivery().unwrap());
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].message, "hello");

    let log = messages(&sim);
    assert_eq!(
        &log[3..],
        &["P1 → P2: Sent 'hello'".to_string(), "P2 received 'hello'".to_string()]
    );
}

#[test]
fn test_full_channel_logs_blocked_and_flags_deadlock() {
    let mut sim = linked(SimulationConfig::interactive());

    assert!(!sim.send_message("one").unwrap().is_blocked());
    assert!(!sim.send_message("two").unwrap().is_blocked());
    let blocked = sim.send_message("three").unwrap();

    assert_eq!(blocked.outcome, SendOutcome::Blocked);
    assert!(blocked.deadlock_suspected);
    assert!(blocked.alert_raised());
    assert_eq!(
        sim.log().messages().last(),
        Some("P1 BLOCKED while sending 'three'")
    );
    // The rejected message never reaches the channel.
    assert_eq!(sim.channel(blocked.link.id).unwrap().len(), 2);
}

#[test]
fn test_deadlock_flagged_on_later_successful_send() {
    let mut sim = linked(SimulationConfig::interactive());
    sim.send_message("one").unwrap();
    sim.send_message("two").unwrap();
    sim.send_message("three").unwrap();
    sim.flush_deliveries();

    let report = sim.send_message("four").unwrap();
    assert!(!report.is_blocked());
    assert!(report.deadlock_suspected);
}

#[test]
fn test_strict_threshold_needs_two_blocks() {
    let config = SimulationConfig::interactive().with_deadlock_threshold(2);
    let mut sim = linked(config);
    sim.send_message("a").unwrap();
    sim.send_message("b").unwrap();

    let first = sim.send_message("c").unwrap();
    assert!(first.is_blocked());
    assert!(!first.deadlock_suspected);

    let second = sim.send_message("d").unwrap();
    assert!(second.deadlock_suspected);
}

#[test]
fn test_sends_use_most_recent_link() {
    let mut sim = linked(SimulationConfig::interactive());
    sim.add_process();
    let newest = sim.create_link().unwrap();

    let report = sim.send_message("hop").unwrap();
    assert_eq!(report.link, newest);
    assert_eq!(
        sim.log().messages().last(),
        Some("P2 → P3: Sent 'hop'")
    );
}

#[test]
fn test_deliver_due_respects_transit_delay() {
    let config = SimulationConfig::interactive().with_transit_delay(Duration::from_secs(60));
    let mut sim = linked(config);
    sim.send_message("slow").unwrap();

    assert!(sim.deliver_due(Instant::now()).is_empty());
    let due = sim.next_due().unwrap();
    let delivered = sim.deliver_due(due);
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].destination, "P2");
}

#[test]
fn test_completing_later_delivery_drains_older_ones_in_order() {
    let mut sim = linked(SimulationConfig::interactive());
    let first = sim.send_message("a").unwrap().delivery().unwrap();
    let second = sim.send_message("b").unwrap().delivery().unwrap();

    let delivered = sim.complete_delivery(second);
    let ids: Vec<_> = delivered.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(delivered[0].message, "a");

    assert!(sim.complete_delivery(first).is_empty());
}

#[test]
fn test_reset_returns_to_idle() {
    let mut sim = linked(SimulationConfig::interactive());
    let old_run = sim.run_id();
    let delivery = sim.send_message("pending").unwrap().delivery().unwrap();

    sim.reset();
    assert!(sim.processes().is_empty());
    assert!(sim.links().is_empty());
    assert!(sim.log().is_empty());
    assert_eq!(sim.pending_deliveries().count(), 0);
    assert_ne!(sim.run_id(), old_run);

    // A completion scheduled before the reset must not log into the new run.
    assert!(sim.complete_delivery(delivery).is_empty());
    assert!(sim.log().is_empty());

    assert_eq!(sim.add_process().name, "P1");
    assert_eq!(sim.send_message("x").unwrap_err(), IpcError::NoActiveLink);
}

#[test]
fn test_reset_is_repeatable() {
    let mut sim = Simulation::default();
    for _ in 0..3 {
        sim.add_process();
        sim.add_process();
        sim.reset();
        assert_eq!(sim.add_process().name, "P1");
        sim.reset();
    }
}

#[test]
fn test_events_mirror_log_and_topology() {
    let mut sim = Simulation::new(SimulationConfig::interactive());
    let events = sim.subscribe();

    sim.add_process();
    sim.add_process();
    sim.create_link().unwrap();
    sim.send_message("a").unwrap();
    sim.send_message("b").unwrap();
    sim.send_message("c").unwrap();

    let received: Vec<SimEvent> = events.try_iter().collect();
    assert!(matches!(
        &received[0],
        SimEvent::ProcessAdded { name, slot: 0 } if name == "P1"
    ));
    assert!(received.iter().any(|e| matches!(
        e,
        SimEvent::LinkCreated { source, destination, .. } if source == "P1" && destination == "P2"
    )));

    let logged: Vec<String> = received
        .iter()
        .filter_map(|e| match e {
            SimEvent::LogAppended { entry } => Some(entry.message.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(logged, messages(&sim));

    let alerts: Vec<&SimEvent> = received
        .iter()
        .filter(|e| matches!(e, SimEvent::DeadlockAlert { .. }))
        .collect();
    assert_eq!(
        alerts,
        vec![&SimEvent::DeadlockAlert {
            detected: true,
            trigger: "P1 BLOCKED while sending 'c'".into(),
        }]
    );
}

#[test]
fn test_channel_stats_track_traffic() {
    let mut sim = linked(SimulationConfig::interactive());
    sim.send_message("a").unwrap();
    sim.send_message("b").unwrap();
    sim.send_message("c").unwrap();
    sim.flush_deliveries();

    let stats = sim.channel_stats();
    assert_eq!(
        stats,
        vec![ChannelStats {
            link: 1,
            kind: TransportKind::bounded(2),
            capacity: Some(2),
            length: 0,
            sent: 2,
            rejected: 1,
            received: 2,
        }]
    );
}

#[test]
fn test_relay_transport_never_blocks() {
    let config = SimulationConfig::interactive().with_transport(TransportKind::Relay);
    let mut sim = linked(config);
    for i in 0..10 {
        let report = sim.send_message(&format!("m{}", i)).unwrap();
        assert!(!report.alert_raised());
    }
    assert_eq!(sim.flush_deliveries().len(), 10);
    assert!(!sim.deadlock_suspected());
}
