/*!
 * Topology
 * Incrementally built set of processes and links
 */

use super::types::{Link, Process};
use crate::core::types::LinkId;
use crate::ipc::types::{IpcError, IpcResult};
use tracing::info;

/// Minimum processes needed before a link can be formed
const LINK_ENDPOINTS: usize = 2;

/// Processes and links of one simulation run
///
/// Links always join the two most recently added processes; the newest
/// link is the active one.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    processes: Vec<Process>,
    links: Vec<Link>,
    next_link_id: LinkId,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process named after the current count ("P1", "P2", ...)
    pub fn add_process(&mut self) -> Process {
        let process = Process::at_slot(self.processes.len());
        self.processes.push(process.clone());
        info!(process = %process.name, total = self.processes.len(), "Process added");
        process
    }

    /// Link the second-most-recent process to the most recent one
    pub fn create_link(&mut self) -> IpcResult<Link> {
        let present = self.processes.len();
        if present < LINK_ENDPOINTS {
            return Err(IpcError::InsufficientNodes {
                required: LINK_ENDPOINTS,
                present,
            });
        }

        self.next_link_id += 1;
        let link = Link {
            id: self.next_link_id,
            source: self.processes[present - 2].name.clone(),
            destination: self.processes[present - 1].name.clone(),
        };
        self.links.push(link.clone());
        info!(link_id = link.id, link = %link, "Link created");
        Ok(link)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Most recently created link
    pub fn active_link(&self) -> Option<&Link> {
        self.links.last()
    }

    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Drop every process and link; naming restarts at "P1"
    pub fn clear(&mut self) {
        self.processes.clear();
        self.links.clear();
        self.next_link_id = 0;
    }
}
