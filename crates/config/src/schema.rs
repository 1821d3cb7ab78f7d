use dash_core::{DashError, Metric, Result};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `sysdash.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Sampling cadence and snapshot source.
    pub sampling: SamplingConfig,
    /// Initial window geometry.
    pub window: WindowConfig,
    /// Charts in display order.
    pub charts: Vec<ChartConfig>,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            window: WindowConfig::default(),
            charts: vec![ChartConfig::cpu(), ChartConfig::network()],
            theme: ThemeConfig::default(),
        }
    }
}

impl DashConfig {
    /// Check the values a component would reject at construction time.
    ///
    /// Returns every problem found; an empty list means the config is usable
    /// as-is.
    pub fn validate(&self) -> Vec<DashError> {
        let mut problems = Vec::new();

        if !(self.sampling.interval_secs.is_finite() && self.sampling.interval_secs > 0.0) {
            problems.push(DashError::Configuration(format!(
                "sampling.interval_secs must be positive, got {}",
                self.sampling.interval_secs
            )));
        }

        for chart in &self.charts {
            if let Err(e) = chart.check() {
                problems.push(e);
            }
        }

        problems
    }

    /// Reset every value [`DashConfig::validate`] would reject to its
    /// default and return the problems found.
    pub fn sanitize(&mut self) -> Vec<DashError> {
        let problems = self.validate();
        if problems.is_empty() {
            return problems;
        }

        if !(self.sampling.interval_secs.is_finite() && self.sampling.interval_secs > 0.0) {
            self.sampling.interval_secs = SamplingConfig::default().interval_secs;
        }

        let defaults = ChartConfig::default();
        for chart in &mut self.charts {
            if chart.capacity < 2 {
                chart.capacity = defaults.capacity;
            }
            if !(chart.min < chart.max) {
                chart.min = defaults.min;
                chart.max = defaults.max;
            }
        }

        problems
    }
}

/// Which producer answers each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Deterministic-shape random generator (demo mode).
    #[default]
    Simulated,
    /// Host metrics read through `sysinfo`.
    Local,
    /// JSON snapshot fetched from `endpoint`.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Seconds between ticks.
    pub interval_secs: f64,
    pub source: SourceKind,
    /// Snapshot endpoint used by [`SourceKind::Remote`].
    pub endpoint: String,
    /// Request timeout for the remote endpoint.
    pub timeout_ms: u64,
    /// Rows in the top-processes table (local collector only).
    pub process_count: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 1.0,
            source:        SourceKind::Simulated,
            endpoint:      "http://localhost:3000/api/stats".to_string(),
            timeout_ms:    2_000,
            process_count: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1100.0, height: 760.0 }
    }
}

/// One time-series chart: shared range/capacity plus its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Registry key and layout region name.
    pub name: String,
    /// Heading shown above the chart.
    pub title: String,
    /// Samples kept per series (one per tick).
    pub capacity: usize,
    pub min: f64,
    pub max: f64,
    /// Inner padding of the plot box (pixels).
    pub padding: f32,
    /// Chart height (pixels).
    pub height: f32,
    pub show_grid: bool,
    /// Intervals between horizontal grid lines; `n` intervals draw `n + 1` lines.
    pub grid_divisions: u32,
    pub series: Vec<SeriesConfig>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            name:           String::new(),
            title:          String::new(),
            capacity:       60,
            min:            0.0,
            max:            100.0,
            padding:        10.0,
            height:         180.0,
            show_grid:      true,
            grid_divisions: 4,
            series:         Vec::new(),
        }
    }
}

impl ChartConfig {
    /// CPU usage, 0–100 %.
    pub fn cpu() -> Self {
        Self {
            name:   "cpu".to_string(),
            title:  "CPU Usage".to_string(),
            series: vec![SeriesConfig::new("usage", Metric::CpuUsage, "#667eea", Some("#667eea33"))],
            ..Self::default()
        }
    }

    /// Download and upload rates on a shared 0–1000 KB/s axis.
    pub fn network() -> Self {
        Self {
            name:   "network".to_string(),
            title:  "Network Traffic".to_string(),
            max:    1000.0,
            series: vec![
                SeriesConfig::new("download", Metric::NetworkDownload, "#10b981", Some("#10b98133")),
                SeriesConfig::new("upload", Metric::NetworkUpload, "#3b82f6", Some("#3b82f633")),
            ],
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.capacity < 2 {
            return Err(DashError::Configuration(format!(
                "chart '{}': capacity must be at least 2, got {}",
                self.name, self.capacity
            )));
        }
        if !(self.min < self.max) {
            return Err(DashError::Configuration(format!(
                "chart '{}': min ({}) must be below max ({})",
                self.name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// One plotted line inside a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub name: String,
    /// Snapshot field feeding this series.
    pub metric: Metric,
    /// Line color (hex, e.g. `"#667eea"`).
    pub stroke: String,
    /// Area fill color (hex with alpha); no fill when absent.
    #[serde(default)]
    pub fill: Option<String>,
    /// Line width in pixels.
    #[serde(default = "default_series_width")]
    pub width: f32,
}

fn default_series_width() -> f32 {
    2.0
}

impl SeriesConfig {
    pub fn new(name: &str, metric: Metric, stroke: &str, fill: Option<&str>) -> Self {
        Self {
            name:   name.to_string(),
            metric,
            stroke: stroke.to_string(),
            fill:   fill.map(str::to_string),
            width:  default_series_width(),
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#f5f6fa"`).
    pub background: String,
    /// Primary text color.
    pub foreground: String,
    /// Accent color (headings, normal progress bars).
    pub accent: String,
    /// Card / chart background.
    pub card: String,
    /// Horizontal chart grid lines.
    pub grid: String,
    /// Progress bars above 60 %.
    pub warning: String,
    /// Progress bars above 80 %.
    pub danger: String,
    /// Connected status dot.
    pub ok: String,
    /// Font size in points.
    pub font_size: f32,
    /// Inner padding of each card (pixels).
    pub padding: u16,
    /// Gap between cards (pixels).
    pub gap: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#f5f6fa".to_string(),
            foreground: "#2d3748".to_string(),
            accent:     "#667eea".to_string(),
            card:       "#ffffff".to_string(),
            grid:       "#f0f0f0".to_string(),
            warning:    "#f59e0b".to_string(),
            danger:     "#ef4444".to_string(),
            ok:         "#10b981".to_string(),
            font_size:  14.0,
            padding:    16,
            gap:        16,
        }
    }
}
