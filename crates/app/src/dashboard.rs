use crate::layout::DashLayout;
use chrono::{DateTime, Local};
use dash_config::{load as load_config, DashConfig};
use dash_core::{Message, Metric, Readouts, Snapshot};
use dash_renderer::{ChartRegistry, ChartSurface};
use dash_system::{Delivery, SamplingLoop, SnapshotSource};
use dash_theme::Theme;
use std::{path::PathBuf, time::Duration};
use tracing::{debug, info, warn};

/// Follow-up work the host must schedule after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Acquire one snapshot and feed it back as `Message::Fetched`.
    Fetch,
}

/// Which chart series a metric feeds.
#[derive(Debug, Clone)]
struct Route {
    chart:  String,
    series: String,
    metric: Metric,
}

/// Toolkit-independent dashboard state.
///
/// Owns the charts, the readouts, the sampling state machine and the data
/// source; the iced shell only forwards messages and schedules fetches.
pub struct Dashboard {
    config:      DashConfig,
    config_path: Option<PathBuf>,
    theme:       Theme,
    charts:      ChartRegistry,
    routes:      Vec<Route>,
    readouts:    Readouts,
    sampler:     SamplingLoop,
    source:      SnapshotSource,
    layout:      DashLayout,
}

impl Dashboard {
    pub fn new(mut config: DashConfig, source: SnapshotSource) -> Self {
        for problem in config.sanitize() {
            warn!("{problem}; using the default");
        }

        let theme = Theme::from_config(&config.theme);
        let layout = DashLayout::compute(config.window.width, &config.charts, &theme);

        let mut charts = ChartRegistry::new();
        let mut routes = Vec::new();
        for chart_cfg in &config.charts {
            let surface = ChartSurface::from_config(chart_cfg, theme.grid, &layout);
            if let Err(e) = charts.register(surface) {
                warn!("{e}; skipping");
                continue;
            }
            routes.extend(chart_cfg.series.iter().map(|s| Route {
                chart:  chart_cfg.name.clone(),
                series: s.name.clone(),
                metric: s.metric,
            }));
        }

        let sampler = SamplingLoop::new(config.sampling.interval_secs).unwrap_or_else(|e| {
            warn!("{e}");
            SamplingLoop::default()
        });

        info!("dashboard ready with {} chart(s)", charts.len());

        Self {
            config,
            config_path: None,
            theme,
            charts,
            routes,
            readouts: Readouts::default(),
            sampler,
            source,
            layout,
        }
    }

    /// Re-read this file on `Message::ConfigReloaded`.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Begin sampling.  Returns [`Effect::Fetch`] for the immediate first sample.
    pub fn start(&mut self) -> Effect {
        if self.sampler.start() { Effect::Fetch } else { Effect::None }
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Tick => {
                if self.sampler.is_running() {
                    return Effect::Fetch;
                }
            }
            Message::Fetched(result) => {
                if let Delivery::Applied(snapshot) = self.sampler.deliver(result) {
                    self.apply(&snapshot, Local::now());
                }
            }
            Message::WindowResized { width, height } => {
                debug!("window resized to {width}x{height}");
                self.layout = DashLayout::compute(width, &self.config.charts, &self.theme);
                self.charts.resize_all(&self.layout);
            }
            Message::ConfigReloaded => return self.reload(),
            Message::Start => return self.start(),
            Message::Stop => {
                self.sampler.stop();
            }
            Message::SetInterval(secs) => match self.sampler.set_interval(secs) {
                Ok(()) => return Effect::Fetch,
                Err(e) => warn!("{e}"),
            },
            Message::SimulationToggled(enabled) => self.source.toggle_simulation(enabled),
        }
        Effect::None
    }

    /// Route one snapshot into the series and readouts, then redraw the
    /// charts that received data.
    fn apply(&mut self, snapshot: &Snapshot, at: DateTime<Local>) {
        let mut touched: Vec<&str> = Vec::new();

        for route in &self.routes {
            let Some(value) = route.metric.read(snapshot) else {
                continue;
            };
            if let Some(chart) = self.charts.get_mut(&route.chart) {
                if chart.push(&route.series, value) && !touched.contains(&route.chart.as_str()) {
                    touched.push(&route.chart);
                }
            }
        }

        for name in touched {
            if let Some(chart) = self.charts.get_mut(name) {
                chart.render();
            }
        }

        self.readouts.absorb(snapshot, at);
    }

    /// Pick up theme and sampling changes from disk.  Charts keep their
    /// configuration until restart.
    fn reload(&mut self) -> Effect {
        let Some(path) = &self.config_path else {
            return Effect::None;
        };

        let mut cfg = match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("config reload failed: {e}");
                return Effect::None;
            }
        };
        for problem in cfg.sanitize() {
            warn!("{problem}; using the default");
        }
        info!("config reloaded");

        self.theme = Theme::from_config(&cfg.theme);
        // Compare with the live period; the stored config may already hold it.
        let interval_changed =
            Duration::try_from_secs_f64(cfg.sampling.interval_secs).ok() != Some(self.sampler.interval());
        let simulated = cfg.sampling.source == dash_config::SourceKind::Simulated;
        let source_changed = cfg.sampling.source != self.config.sampling.source;
        self.config.theme = cfg.theme;
        self.config.sampling = cfg.sampling;

        if source_changed {
            self.source.toggle_simulation(simulated);
        }

        if !interval_changed {
            return Effect::None;
        }

        let secs = self.config.sampling.interval_secs;
        if self.sampler.is_running() {
            match self.sampler.set_interval(secs) {
                Ok(()) => return Effect::Fetch,
                Err(e) => warn!("{e}"),
            }
        } else if let Err(e) = self.sampler.set_period(secs) {
            warn!("{e}");
        }
        Effect::None
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn readouts(&self) -> &Readouts {
        &self.readouts
    }

    pub fn sampler(&self) -> &SamplingLoop {
        &self.sampler
    }

    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::{
        snapshot::{CpuReading, NetworkReading},
        FetchFailed, LinkStatus, Result,
    };
    use dash_system::{Collect, Simulator};
    use std::sync::Arc;

    struct Unused;

    impl Collect for Unused {
        fn collect(&self) -> Result<Snapshot> {
            Err(FetchFailed::new("not used in these tests").into())
        }

        fn label(&self) -> &'static str {
            "unused"
        }
    }

    fn dashboard() -> Dashboard {
        let source = SnapshotSource::with_simulator(Simulator::seeded(0), Arc::new(Unused), false);
        let mut dash = Dashboard::new(DashConfig::default(), source);
        assert_eq!(dash.start(), Effect::Fetch);
        dash
    }

    fn sample(cpu: f64, down: f64, up: f64) -> Snapshot {
        Snapshot {
            cpu: Some(CpuReading { usage: cpu }),
            network: Some(NetworkReading { download: down, upload: up }),
            ..Snapshot::default()
        }
    }

    fn values(dash: &Dashboard, chart: &str, series: &str) -> Vec<f64> {
        dash.charts().get(chart).unwrap().series(series).unwrap().snapshot()
    }

    #[test]
    fn snapshot_is_routed_to_every_series() {
        let mut dash = dashboard();
        dash.handle(Message::Fetched(Ok(sample(42.26, 300.0, 120.0))));

        assert_eq!(values(&dash, "cpu", "usage"), vec![42.3]);
        assert_eq!(values(&dash, "network", "download"), vec![300.0]);
        assert_eq!(values(&dash, "network", "upload"), vec![120.0]);
        assert_eq!(dash.sampler().samples(), 1);
        assert!(dash.readouts().last_update.is_some());
    }

    #[test]
    fn failure_touches_no_series_and_success_recovers() {
        let mut dash = dashboard();
        dash.handle(Message::Fetched(Ok(sample(10.0, 1.0, 2.0))));
        let frame = dash.charts().get("cpu").unwrap().display_list().to_vec();

        dash.handle(Message::Fetched(Err(FetchFailed::new("HTTP 500"))));
        assert_eq!(values(&dash, "cpu", "usage"), vec![10.0]);
        assert_eq!(dash.charts().get("cpu").unwrap().display_list(), frame.as_slice());
        assert_eq!(dash.sampler().status(), &LinkStatus::Disconnected("HTTP 500".into()));

        dash.handle(Message::Fetched(Ok(sample(20.0, 1.0, 2.0))));
        assert_eq!(values(&dash, "cpu", "usage"), vec![10.0, 20.0]);
        assert!(dash.sampler().status().is_connected());
        assert_eq!(dash.sampler().samples(), 2);
    }

    #[test]
    fn partial_snapshot_only_feeds_present_sections() {
        let mut dash = dashboard();
        let only_cpu = Snapshot {
            cpu: Some(CpuReading { usage: 5.0 }),
            ..Snapshot::default()
        };
        dash.handle(Message::Fetched(Ok(only_cpu)));
        assert_eq!(values(&dash, "cpu", "usage"), vec![5.0]);
        assert!(values(&dash, "network", "download").is_empty());
    }

    #[test]
    fn ticks_fetch_only_while_running() {
        let mut dash = dashboard();
        assert_eq!(dash.handle(Message::Tick), Effect::Fetch);
        dash.handle(Message::Stop);
        assert_eq!(dash.handle(Message::Tick), Effect::None);
        assert_eq!(dash.handle(Message::Start), Effect::Fetch);
    }

    #[test]
    fn results_landing_after_stop_are_dropped() {
        let mut dash = dashboard();
        dash.handle(Message::Stop);
        dash.handle(Message::Fetched(Ok(sample(99.0, 1.0, 1.0))));
        assert!(values(&dash, "cpu", "usage").is_empty());
        assert_eq!(dash.sampler().samples(), 0);
    }

    #[test]
    fn set_interval_restarts_with_immediate_fetch() {
        let mut dash = dashboard();
        assert_eq!(dash.handle(Message::SetInterval(5.0)), Effect::Fetch);
        assert_eq!(dash.sampler().interval().as_secs(), 5);
        assert_eq!(dash.handle(Message::SetInterval(-1.0)), Effect::None);
        assert_eq!(dash.sampler().interval().as_secs(), 5);
    }

    #[test]
    fn resize_keeps_buffered_samples() {
        let mut dash = dashboard();
        for v in [1.0, 2.0, 3.0] {
            dash.handle(Message::Fetched(Ok(sample(v, v, v))));
        }
        dash.handle(Message::WindowResized { width: 800.0, height: 600.0 });

        let cpu = dash.charts().get("cpu").unwrap();
        assert_eq!(cpu.viewport().unwrap().width, (800.0 - 48.0) / 2.0 - 32.0);
        assert_eq!(values(&dash, "cpu", "usage"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn simulation_toggle_reaches_the_source() {
        let mut dash = dashboard();
        dash.handle(Message::SimulationToggled(true));
        assert!(dash.source().is_simulated());
    }

    #[test]
    fn reload_applies_new_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sysdash.toml");
        std::fs::write(&path, "[sampling]\ninterval_secs = 2.0\n").unwrap();

        let mut dash = dashboard().with_config_path(&path);
        assert_eq!(dash.handle(Message::ConfigReloaded), Effect::Fetch);
        assert_eq!(dash.sampler().interval().as_secs(), 2);
    }

    #[test]
    fn reload_while_stopped_takes_effect_on_next_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sysdash.toml");
        std::fs::write(&path, "[sampling]\ninterval_secs = 5.0\n").unwrap();

        let mut dash = dashboard().with_config_path(&path);
        dash.handle(Message::Stop);
        assert_eq!(dash.handle(Message::ConfigReloaded), Effect::None);
        assert!(!dash.sampler().is_running());

        assert_eq!(dash.handle(Message::Start), Effect::Fetch);
        assert_eq!(dash.sampler().tick_period(), Some(Duration::from_secs(5)));

        // A second reload of the same file changes nothing.
        assert_eq!(dash.handle(Message::ConfigReloaded), Effect::None);
        assert_eq!(dash.sampler().interval().as_secs(), 5);
    }
}
