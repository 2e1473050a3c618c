/*!
 * Simulation Handle
 * Cloneable async front-end that drives deferred deliveries on tokio
 */

use super::config::SimulationConfig;
use super::controller::Simulation;
use super::delivery::SendReport;
use crate::core::types::DeliveryId;
use crate::ipc::IpcResult;
use crate::monitoring::SimEvent;
use crate::process::{Link, Process};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// Shared handle to a simulation
///
/// All access goes through one lock, so a deferred delivery never runs
/// concurrently with a send on the same transport. Each accepted send
/// spawns a task that sleeps for the transit delay and then completes its
/// delivery. Outside a tokio runtime nothing is spawned and deliveries wait
/// for `flush_deliveries`.
#[derive(Clone)]
pub struct SimulationHandle {
    inner: Arc<Mutex<Simulation>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl SimulationHandle {
    pub fn new(config: SimulationConfig) -> Self {
        Self::from_simulation(Simulation::new(config))
    }

    pub fn from_simulation(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> flume::Receiver<SimEvent> {
        self.inner.lock().subscribe()
    }

    pub fn add_process(&self) -> Process {
        self.inner.lock().add_process()
    }

    pub fn create_link(&self) -> IpcResult<Link> {
        self.inner.lock().create_link()
    }

    /// Send on the active link and schedule the delivery completion
    pub fn send_message(&self, text: &str) -> IpcResult<SendReport> {
        let (report, delay) = {
            let mut sim = self.inner.lock();
            let report = sim.send_message(text)?;
            (report, sim.config().transit_delay)
        };

        if let Some(delivery) = report.delivery() {
            self.spawn_completion(delivery, delay);
        }
        Ok(report)
    }

    /// Drop all state; completions already scheduled become no-ops
    pub fn reset(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        self.inner.lock().reset();
    }

    /// Wait for every scheduled completion to finish
    pub async fn settle(&self) {
        loop {
            let batch: Vec<_> = self.tasks.lock().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                // Aborted tasks belong to a previous run.
                let _ = task.await;
            }
        }
    }

    /// Complete every pending delivery now
    pub fn flush_deliveries(&self) -> usize {
        self.inner.lock().flush_deliveries().len()
    }

    /// Run `f` against the simulation under the lock
    pub fn with<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        let sim = self.inner.lock();
        f(&sim)
    }

    /// Raw log messages in order
    pub fn log_messages(&self) -> Vec<String> {
        self.with(|sim| sim.log().messages().map(str::to_owned).collect())
    }

    /// Display lines of the log
    pub fn rendered_log(&self) -> Vec<String> {
        self.with(|sim| sim.log().render())
    }

    pub fn deadlock_suspected(&self) -> bool {
        self.with(Simulation::deadlock_suspected)
    }

    fn spawn_completion(&self, delivery: DeliveryId, delay: Duration) {
        let Ok(runtime) = Handle::try_current() else {
            debug!(delivery, "No tokio runtime; delivery left pending");
            return;
        };

        let inner = Arc::clone(&self.inner);
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.lock().complete_delivery(delivery);
        });

        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }
}
