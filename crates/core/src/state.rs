use crate::snapshot::{CpuReading, NetworkReading, ProcessEntry, Snapshot, SystemInfo, UsageReading};
use chrono::{DateTime, Local};

/// Connection status shown in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LinkStatus {
    /// No fetch has completed yet.
    #[default]
    Pending,
    Connected,
    /// The most recent fetch failed; carries its description.
    Disconnected(String),
}

impl LinkStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkStatus::Connected)
    }
}

/// Latest value of every non-chart readout.
///
/// Each section keeps its last reported value until a snapshot carrying
/// that section arrives; failed ticks never touch it.
#[derive(Debug, Clone, Default)]
pub struct Readouts {
    pub cpu: Option<CpuReading>,
    pub memory: Option<UsageReading>,
    pub disk: Option<UsageReading>,
    pub network: Option<NetworkReading>,
    pub system: Option<SystemInfo>,
    pub processes: Vec<ProcessEntry>,
    /// Local time of the last applied snapshot.
    pub last_update: Option<DateTime<Local>>,
}

impl Readouts {
    /// Fold the present sections of `snapshot` into the readouts.
    pub fn absorb(&mut self, snapshot: &Snapshot, at: DateTime<Local>) {
        if let Some(cpu) = snapshot.cpu {
            self.cpu = Some(cpu);
        }
        if let Some(memory) = snapshot.memory {
            self.memory = Some(memory);
        }
        if let Some(disk) = snapshot.disk {
            self.disk = Some(disk);
        }
        if let Some(network) = snapshot.network {
            self.network = Some(network);
        }
        if let Some(system) = &snapshot.system {
            self.system = Some(system.clone());
        }
        // An empty list keeps the previous table.
        if let Some(processes) = snapshot.processes.as_ref().filter(|p| !p.is_empty()) {
            self.processes = processes.clone();
        }
        self.last_update = Some(at);
    }
}
