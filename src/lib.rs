/*!
 * IPC Debugger Simulator Library
 * Simulated processes, links, and transports with heuristic deadlock detection
 */

pub mod core;
pub mod ipc;
pub mod monitoring;
pub mod process;
pub mod simulation;

// Re-exports
pub use ipc::{BoundedChannel, IpcError, IpcResult, SharedCell, Transport, TransportKind, UnboundedRelay};
pub use monitoring::{
    detect_deadlock, init_tracing, DeadlockDetector, DeadlockPolicy, EventLog, LogEntry, SimEvent,
};
pub use process::{Link, Process, Topology};
pub use simulation::{
    run_scripted, ScriptedReport, SendOutcome, SendReport, Simulation, SimulationConfig,
    SimulationHandle,
};
