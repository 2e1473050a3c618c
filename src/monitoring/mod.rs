/*!
 * Monitoring
 * Event log, deadlock detection, event stream, and tracing setup
 */

pub mod deadlock;
pub mod eventlog;
pub mod events;
mod tracer;

pub use deadlock::{detect_deadlock, DeadlockDetector, DeadlockPolicy};
pub use eventlog::{EventLog, LogEntry};
pub use events::{EventBus, SimEvent};
pub use tracer::{generate_run_id, init_tracing, run_span};
