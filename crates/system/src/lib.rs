pub mod collector;
pub mod remote;
pub mod sampler;
pub mod simulator;
pub mod units;

pub use collector::LocalCollector;
pub use remote::RemoteSource;
pub use sampler::{Delivery, Phase, SamplingLoop};
pub use simulator::Simulator;

use dash_config::{SamplingConfig, SourceKind};
use dash_core::{DashError, FetchFailed, Result, Snapshot};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tracing::{debug, info};

/// Anything that can produce one [`Snapshot`] on demand.
///
/// Implementations may block and may be called from several threads at
/// once; [`SnapshotSource::fetch`] runs them on the blocking pool.
pub trait Collect: Send + Sync {
    fn collect(&self) -> Result<Snapshot>;

    /// Short name for logs.
    fn label(&self) -> &'static str;
}

/// Shared handle to the dashboard's data source.
///
/// Holds the simulator next to one real collector and switches between them
/// at runtime.  Cheap to clone; clones share the same collectors.  Fetches
/// never wait on each other here: a collector with internal state
/// serializes only its own bookkeeping.
#[derive(Clone)]
pub struct SnapshotSource {
    simulator:     Arc<dyn Collect>,
    real:          Arc<dyn Collect>,
    use_simulator: Arc<AtomicBool>,
}

impl SnapshotSource {
    pub fn new(real: Arc<dyn Collect>, use_simulator: bool) -> Self {
        Self::with_simulator(Simulator::new(), real, use_simulator)
    }

    pub fn with_simulator(simulator: Simulator, real: Arc<dyn Collect>, use_simulator: bool) -> Self {
        Self {
            simulator: Arc::new(simulator),
            real,
            use_simulator: Arc::new(AtomicBool::new(use_simulator)),
        }
    }

    /// Build from the `[sampling]` section.  `source = "simulated"` pairs
    /// the simulator with the local collector for when simulation is
    /// switched off.
    pub fn from_config(cfg: &SamplingConfig) -> Self {
        let real: Arc<dyn Collect> = match cfg.source {
            SourceKind::Remote => Arc::new(RemoteSource::new(
                cfg.endpoint.clone(),
                Duration::from_millis(cfg.timeout_ms),
            )),
            SourceKind::Local | SourceKind::Simulated => Arc::new(LocalCollector::new(cfg.process_count)),
        };
        Self::new(real, cfg.source == SourceKind::Simulated)
    }

    /// Switch between simulated and real data.
    pub fn toggle_simulation(&self, enabled: bool) {
        self.use_simulator.store(enabled, Ordering::Relaxed);
        info!("simulation mode: {}", if enabled { "on" } else { "off" });
    }

    pub fn is_simulated(&self) -> bool {
        self.use_simulator.load(Ordering::Relaxed)
    }

    fn active(&self) -> Arc<dyn Collect> {
        if self.is_simulated() {
            Arc::clone(&self.simulator)
        } else {
            Arc::clone(&self.real)
        }
    }

    /// Acquire one snapshot from the active collector.
    pub async fn fetch(self) -> std::result::Result<Snapshot, FetchFailed> {
        let collector = self.active();
        debug!("fetching from {} source", collector.label());

        tokio::task::spawn_blocking(move || collector.collect().map_err(into_fetch_failed))
            .await
            .map_err(|e| FetchFailed::new(format!("collector task failed: {e}")))?
    }
}

fn into_fetch_failed(err: DashError) -> FetchFailed {
    match err {
        DashError::Fetch(f) => f,
        other => FetchFailed::new(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Collect for Broken {
        fn collect(&self) -> Result<Snapshot> {
            Err(FetchFailed::new("connection refused").into())
        }

        fn label(&self) -> &'static str {
            "broken"
        }
    }

    struct Failing;

    impl Collect for Failing {
        fn collect(&self) -> Result<Snapshot> {
            Err(DashError::System("no /proc".into()))
        }

        fn label(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn real_source_failure_is_reported_verbatim() {
        let source = SnapshotSource::with_simulator(Simulator::seeded(1), Arc::new(Broken), false);
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.message, "connection refused");
    }

    #[tokio::test]
    async fn other_errors_become_fetch_failures() {
        let source = SnapshotSource::with_simulator(Simulator::seeded(1), Arc::new(Failing), false);
        let err = source.fetch().await.unwrap_err();
        assert!(err.message.contains("no /proc"));
    }

    #[tokio::test]
    async fn toggling_simulation_switches_collector() {
        let source = SnapshotSource::with_simulator(Simulator::seeded(1), Arc::new(Broken), false);
        assert!(source.clone().fetch().await.is_err());

        source.toggle_simulation(true);
        assert!(source.is_simulated());
        let snap = source.clone().fetch().await.unwrap();
        assert!(snap.cpu.is_some());

        source.toggle_simulation(false);
        assert!(source.fetch().await.is_err());
    }

    struct Slow;

    impl Collect for Slow {
        fn collect(&self) -> Result<Snapshot> {
            std::thread::sleep(Duration::from_millis(200));
            Ok(Snapshot::default())
        }

        fn label(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn overlapping_fetches_run_side_by_side() {
        let source = SnapshotSource::with_simulator(Simulator::seeded(1), Arc::new(Slow), false);
        let started = std::time::Instant::now();

        let fetches: Vec<_> = (0..8).map(|_| tokio::spawn(source.clone().fetch())).collect();
        for fetch in fetches {
            assert!(fetch.await.unwrap().is_ok());
        }

        // Serialized, eight fetches would need 1.6 s.
        assert!(started.elapsed() < Duration::from_millis(1200));
    }
}
