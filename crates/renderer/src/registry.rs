use crate::surface::{ChartSurface, LayoutHost};
use dash_core::{DashError, Result};

/// All charts of the dashboard, in registration order.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: Vec<ChartSurface>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chart.  Chart names must be unique.
    pub fn register(&mut self, chart: ChartSurface) -> Result<()> {
        if self.get(chart.name()).is_some() {
            return Err(DashError::Configuration(format!(
                "chart '{}' registered twice",
                chart.name()
            )));
        }
        self.charts.push(chart);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ChartSurface> {
        self.charts.iter().find(|c| c.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ChartSurface> {
        self.charts.iter_mut().find(|c| c.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartSurface> {
        self.charts.iter()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Re-read every chart's layout box and re-render.
    pub fn resize_all(&mut self, host: &dyn LayoutHost) {
        for chart in &mut self.charts {
            chart.resize(host);
        }
    }
}
