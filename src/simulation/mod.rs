/*!
 * Simulation Module
 * Controller, async handle, configuration, and the scripted run
 */

pub mod config;
pub mod controller;
pub mod delivery;
pub mod handle;
pub mod scripted;

// Re-export for convenience
pub use config::SimulationConfig;
pub use controller::Simulation;
pub use delivery::{ChannelStats, Delivery, PendingDelivery, SendOutcome, SendReport};
pub use handle::SimulationHandle;
pub use scripted::{run_scripted, ScriptedReport, SCRIPTED_MESSAGES};
