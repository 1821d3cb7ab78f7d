use crate::{units, Collect};
use chrono::Utc;
use dash_core::{
    snapshot::{CpuReading, NetworkReading, ProcessEntry, SystemInfo, UsageReading},
    DashError, Result, Snapshot,
};
use std::{path::Path, sync::Mutex, time::Instant};
use sysinfo::{Disks, Networks, System};
use tracing::debug;

/// Reads real metrics of the local host through `sysinfo`.
///
/// CPU usage and network rates are deltas between consecutive refreshes,
/// so the first reading after construction reports zero for both.
pub struct LocalCollector {
    state:         Mutex<State>,
    process_count: usize,
}

struct State {
    sys:          System,
    networks:     Networks,
    last_refresh: Instant,
}

impl LocalCollector {
    pub fn new(process_count: usize) -> Self {
        Self {
            state: Mutex::new(State {
                sys:          System::new_all(),
                networks:     Networks::new_with_refreshed_list(),
                last_refresh: Instant::now(),
            }),
            process_count,
        }
    }
}

impl State {
    fn cpu(&self) -> CpuReading {
        let cores: Vec<f32> = self.sys.cpus().iter().map(|c| c.cpu_usage()).collect();
        let usage = if cores.is_empty() {
            0.0
        } else {
            cores.iter().sum::<f32>() / cores.len() as f32
        };
        CpuReading { usage: f64::from(usage) }
    }

    fn memory(&self) -> UsageReading {
        let total = self.sys.total_memory();
        let used = self.sys.used_memory();
        UsageReading {
            total:   units::bytes_to_gb(total),
            used:    units::bytes_to_gb(used),
            percent: units::percent(used as f64, total as f64),
        }
    }

    fn network(&self, elapsed_secs: f64) -> NetworkReading {
        // `received()` / `transmitted()` are deltas since the last refresh.
        let rx: u64 = self.networks.iter().map(|(_, d)| d.received()).sum();
        let tx: u64 = self.networks.iter().map(|(_, d)| d.transmitted()).sum();
        NetworkReading {
            download: units::rate_kb_per_sec(rx, elapsed_secs),
            upload:   units::rate_kb_per_sec(tx, elapsed_secs),
        }
    }

    fn processes(&self, count: usize) -> Vec<ProcessEntry> {
        let mut procs: Vec<_> = self.sys.processes().iter().collect();
        procs.sort_by(|a, b| b.1.cpu_usage().total_cmp(&a.1.cpu_usage()));

        procs
            .into_iter()
            .take(count)
            .map(|(pid, p)| ProcessEntry {
                pid:    i64::from(pid.as_u32()),
                name:   p.name().to_string_lossy().into_owned(),
                cpu:    format!("{:.1}", p.cpu_usage()),
                memory: units::format_megabytes(p.memory()),
            })
            .collect()
    }
}

impl Collect for LocalCollector {
    fn collect(&self) -> Result<Snapshot> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| DashError::System("local collector state poisoned".into()))?;

        state.sys.refresh_all();
        state.networks.refresh(false); // keep the existing interface list

        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refresh).as_secs_f64();
        state.last_refresh = now;

        let snapshot = Snapshot {
            cpu:       Some(state.cpu()),
            memory:    Some(state.memory()),
            disk:      Some(disk_usage()),
            network:   Some(state.network(elapsed)),
            system:    Some(system_info()),
            processes: Some(state.processes(self.process_count)),
            timestamp: Some(Utc::now().timestamp_millis()),
        };
        debug!("local snapshot collected after {elapsed:.2}s");
        Ok(snapshot)
    }

    fn label(&self) -> &'static str {
        "local"
    }
}

/// Root filesystem usage, or the sum over all disks when `/` is not mounted.
fn disk_usage() -> UsageReading {
    let disks = Disks::new_with_refreshed_list();
    let (used, total) = disks
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .map(|d| (d.total_space().saturating_sub(d.available_space()), d.total_space()))
        .unwrap_or_else(|| {
            disks.iter().fold((0, 0), |(used, total), d| {
                (used + d.total_space().saturating_sub(d.available_space()), total + d.total_space())
            })
        });

    UsageReading {
        total:   units::bytes_to_gb(total),
        used:    units::bytes_to_gb(used),
        percent: units::percent(used as f64, total as f64),
    }
}

fn system_info() -> SystemInfo {
    SystemInfo {
        hostname: System::host_name(),
        os:       System::long_os_version().or_else(System::name),
        uptime:   Some(System::boot_time() as f64 * 1000.0),
    }
}
