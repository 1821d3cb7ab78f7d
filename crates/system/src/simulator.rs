use crate::Collect;
use chrono::{DateTime, Utc};
use dash_core::{
    snapshot::{CpuReading, NetworkReading, ProcessEntry, SystemInfo, UsageReading},
    Result, Snapshot,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

const PROCESS_NAMES: [&str; 5] = ["node", "nginx", "mysql", "redis", "python"];
const DAY_MS: f64 = 86_400_000.0;

/// Demo data generator.
///
/// CPU follows a slow sine wave around 30 % with noise on top; every other
/// figure is a fixed base plus uniform noise.
pub struct Simulator {
    rng: Mutex<StdRng>,
}

impl Simulator {
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_os_rng()) }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    /// Produce one snapshot as if sampled at `now`.
    pub fn generate_at(&self, now: DateTime<Utc>) -> Snapshot {
        // The generator holds no invariant a panic could break.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng = &mut *rng;

        let now_ms = now.timestamp_millis() as f64;
        let cpu_base = 30.0 + (now_ms / 10_000.0).sin() * 20.0;
        let mem_base = 60.0;
        let disk_base = 45.0;

        Snapshot {
            cpu: Some(CpuReading {
                usage: (cpu_base + noise(rng, 15.0)).clamp(0.0, 100.0),
            }),
            memory: Some(UsageReading {
                total:   16.0,
                used:    mem_base / 100.0 * 16.0 + noise(rng, 2.0),
                percent: mem_base + noise(rng, 5.0),
            }),
            disk: Some(UsageReading {
                total:   500.0,
                used:    disk_base / 100.0 * 500.0 + noise(rng, 10.0),
                percent: disk_base + noise(rng, 3.0),
            }),
            network: Some(NetworkReading {
                download: 100.0 + noise(rng, 500.0),
                upload:   50.0 + noise(rng, 200.0),
            }),
            system: Some(SystemInfo {
                hostname: Some("demo-server-01".to_string()),
                os:       Some("Linux Ubuntu 22.04 LTS".to_string()),
                uptime:   Some(now_ms - noise(rng, DAY_MS)),
            }),
            processes: Some(processes(rng)),
            timestamp: None,
        }
    }
}

fn processes(rng: &mut StdRng) -> Vec<ProcessEntry> {
    PROCESS_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let i = i as f64;
            ProcessEntry {
                pid:    1000 + rng.random_range(0..9000),
                name:   (*name).to_string(),
                cpu:    format!("{:.1}", 20.0 - i * 3.0 + noise(rng, 5.0)),
                memory: format!("{:.0} MB", 200.0 - i * 30.0 + noise(rng, 50.0)),
            }
        })
        .collect()
}

/// Uniform sample in `[0, scale)`.
fn noise(rng: &mut StdRng, scale: f64) -> f64 {
    rng.random::<f64>() * scale
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Collect for Simulator {
    fn collect(&self) -> Result<Snapshot> {
        Ok(self.generate_at(Utc::now()))
    }

    fn label(&self) -> &'static str {
        "simulated"
    }
}
