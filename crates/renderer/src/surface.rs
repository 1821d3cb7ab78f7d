use crate::{
    mapper::{map_points, PlotPoint, ValueRange, Viewport},
    series::RollingSeries,
};
use dash_config::ChartConfig;
use dash_core::DashError;
use dash_theme::{Color, SeriesStyle};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Radius of the marker drawn at the newest point of each series.
pub const MARKER_RADIUS: f64 = 3.0;

/// Pixel size of a layout region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub width:  f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Something that knows where charts are placed.
///
/// A chart resolves its region once at construction and again on every
/// resize; a region the host does not know about makes the chart inert.
pub trait LayoutHost {
    fn layout_box(&self, region: &str) -> Option<LayoutBox>;
}

impl LayoutHost for HashMap<String, LayoutBox> {
    fn layout_box(&self, region: &str) -> Option<LayoutBox> {
        self.get(region).copied()
    }
}

/// One drawing instruction.  A render pass produces an ordered list of
/// these; executing them in order paints the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole surface.
    Clear { width: f64, height: f64 },
    /// One horizontal grid line.
    GridLine { from: PlotPoint, to: PlotPoint, color: Color, width: f32 },
    /// Closed polygon filled with `color`.
    FillArea { points: Vec<PlotPoint>, color: Color },
    /// Open polyline with round joins and round caps.
    Polyline { points: Vec<PlotPoint>, color: Color, width: f32 },
    /// Filled circle.
    Marker { center: PlotPoint, radius: f64, color: Color },
}

/// Horizontal grid settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub enabled:   bool,
    /// Intervals between lines; `n` intervals draw `n + 1` lines.
    pub divisions: u32,
    pub color:     Color,
    pub width:     f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            enabled:   true,
            divisions: 4,
            color:     Color::GRID,
            width:     1.0,
        }
    }
}

/// Everything about a chart except its series, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSettings {
    pub range:    ValueRange,
    pub capacity: usize,
    pub padding:  f64,
    pub grid:     GridStyle,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            range:    ValueRange::new(0.0, 100.0),
            capacity: crate::series::DEFAULT_CAPACITY,
            padding:  Viewport::DEFAULT_PADDING,
            grid:     GridStyle::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct Plot {
    name:  String,
    data:  RollingSeries,
    style: SeriesStyle,
}

/// A chart bound to one layout region.
///
/// Holds any number of named series sharing one value range and capacity.
/// [`ChartSurface::render`] rebuilds the display list from scratch: clear,
/// grid, then fill, line and end marker for every non-empty series in
/// registration order, so later series paint over earlier ones.
#[derive(Debug, Clone)]
pub struct ChartSurface {
    name:     String,
    viewport: Option<Viewport>,
    settings: ChartSettings,
    plots:    Vec<Plot>,
    display:  Vec<DrawCommand>,
    /// Mapping failures are logged on the first occurrence only.
    mapping_reported: bool,
}

impl ChartSurface {
    /// Bind a new chart to the region `name` of `host`.
    ///
    /// When the region is unknown the error is logged once and the chart is
    /// inert: every later call does nothing.
    pub fn new(name: impl Into<String>, host: &dyn LayoutHost, settings: ChartSettings) -> Self {
        let name = name.into();
        let viewport = host
            .layout_box(&name)
            .map(|b| Viewport::new(b.width, b.height, settings.padding));

        if viewport.is_none() {
            let err = DashError::Construction(format!("no layout region named '{name}'"));
            error!("chart '{name}' disabled: {err}");
        }

        Self {
            name,
            viewport,
            settings,
            plots: Vec::new(),
            display: Vec::new(),
            mapping_reported: false,
        }
    }

    /// Build a chart and its series from config.
    pub fn from_config(cfg: &ChartConfig, grid_color: Color, host: &dyn LayoutHost) -> Self {
        let settings = ChartSettings {
            range:    ValueRange::new(cfg.min, cfg.max),
            capacity: cfg.capacity,
            padding:  f64::from(cfg.padding),
            grid: GridStyle {
                enabled:   cfg.show_grid,
                divisions: cfg.grid_divisions,
                color:     grid_color,
                ..GridStyle::default()
            },
        };

        let mut surface = Self::new(cfg.name.clone(), host, settings);
        for series in &cfg.series {
            surface.add_series(series.name.clone(), SeriesStyle::from_config(series));
        }
        surface.render();
        surface
    }

    /// Register a series.  Registration order is drawing order.
    #[must_use]
    pub fn with_series(mut self, name: impl Into<String>, style: SeriesStyle) -> Self {
        self.add_series(name, style);
        self
    }

    pub fn add_series(&mut self, name: impl Into<String>, style: SeriesStyle) {
        if self.is_inert() {
            return;
        }
        let name = name.into();
        if self.plots.iter().any(|p| p.name == name) {
            warn!("chart '{}': series '{name}' registered twice; keeping the first", self.name);
            return;
        }
        self.plots.push(Plot {
            name,
            data: RollingSeries::new(self.settings.capacity),
            style,
        });
    }

    /// Append one sample to `series`.  Returns `false` if the series is
    /// unknown or the chart is inert.
    pub fn push(&mut self, series: &str, value: f64) -> bool {
        match self.plot_mut(series) {
            Some(plot) => {
                plot.data.push(value);
                true
            }
            None => false,
        }
    }

    /// Replace the contents of `series` with the tail of `values`.
    pub fn set_all(&mut self, series: &str, values: &[f64]) -> bool {
        match self.plot_mut(series) {
            Some(plot) => {
                plot.data.set_all(values.iter().copied());
                true
            }
            None => false,
        }
    }

    /// Empty every series and re-render.
    pub fn clear(&mut self) {
        for plot in &mut self.plots {
            plot.data.clear();
        }
        self.render();
    }

    /// Rebuild the display list from the current series contents.
    pub fn render(&mut self) {
        let Some(viewport) = self.viewport else {
            return;
        };

        let mut frame = vec![DrawCommand::Clear {
            width:  viewport.width,
            height: viewport.height,
        }];

        self.draw_grid(&mut frame, viewport);

        for plot in &self.plots {
            if plot.data.is_empty() {
                continue;
            }

            let samples = plot.data.snapshot();
            let points =
                match map_points(&samples, self.settings.range, viewport, self.settings.capacity) {
                    Ok(points) => points,
                    Err(e) => {
                        if !self.mapping_reported {
                            warn!("chart '{}' cannot plot its series: {e}", self.name);
                            self.mapping_reported = true;
                        }
                        break;
                    }
                };

            draw_series(&mut frame, &points, &plot.style, viewport);
        }

        self.display = frame;
    }

    /// Re-read the layout box from `host` and re-render.
    ///
    /// Only the pixel mapping changes; buffered samples are untouched.
    pub fn resize(&mut self, host: &dyn LayoutHost) {
        if self.is_inert() {
            return;
        }
        match host.layout_box(&self.name) {
            Some(b) => {
                self.viewport = Some(Viewport::new(b.width, b.height, self.settings.padding));
                debug!("chart '{}' resized to {}x{}", self.name, b.width, b.height);
            }
            None => debug!("chart '{}': region gone, keeping previous size", self.name),
        }
        self.render();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if the host region could not be resolved at construction.
    pub fn is_inert(&self) -> bool {
        self.viewport.is_none()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// The last rendered frame.
    pub fn display_list(&self) -> &[DrawCommand] {
        &self.display
    }

    pub fn series(&self, name: &str) -> Option<&RollingSeries> {
        self.plots.iter().find(|p| p.name == name).map(|p| &p.data)
    }

    pub fn style(&self, name: &str) -> Option<&SeriesStyle> {
        self.plots.iter().find(|p| p.name == name).map(|p| &p.style)
    }

    /// Series names in registration order.
    pub fn series_names(&self) -> impl Iterator<Item = &str> {
        self.plots.iter().map(|p| p.name.as_str())
    }

    fn plot_mut(&mut self, name: &str) -> Option<&mut Plot> {
        if self.is_inert() {
            return None;
        }
        self.plots.iter_mut().find(|p| p.name == name)
    }

    fn draw_grid(&self, frame: &mut Vec<DrawCommand>, viewport: Viewport) {
        let grid = self.settings.grid;
        if !grid.enabled {
            return;
        }

        let divisions = grid.divisions.max(1);
        let left = viewport.padding;
        let right = viewport.width - viewport.padding;

        for i in 0..=divisions {
            let y = viewport.padding + viewport.inner_height() * (f64::from(i) / f64::from(divisions));
            frame.push(DrawCommand::GridLine {
                from:  PlotPoint::new(left, y),
                to:    PlotPoint::new(right, y),
                color: grid.color,
                width: grid.width,
            });
        }
    }
}

fn draw_series(frame: &mut Vec<DrawCommand>, points: &[PlotPoint], style: &SeriesStyle, viewport: Viewport) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };

    if let Some(fill) = style.fill {
        let baseline = viewport.baseline();
        let mut area = Vec::with_capacity(points.len() + 2);
        area.push(PlotPoint::new(first.x, baseline));
        area.extend_from_slice(points);
        area.push(PlotPoint::new(last.x, baseline));
        frame.push(DrawCommand::FillArea { points: area, color: fill });
    }

    frame.push(DrawCommand::Polyline {
        points: points.to_vec(),
        color:  style.stroke,
        width:  style.width,
    });

    frame.push(DrawCommand::Marker {
        center: *last,
        radius: MARKER_RADIUS,
        color:  style.stroke,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(name: &str, w: f64, h: f64) -> HashMap<String, LayoutBox> {
        HashMap::from([(name.to_string(), LayoutBox::new(w, h))])
    }

    fn settings(capacity: usize) -> ChartSettings {
        ChartSettings { capacity, ..ChartSettings::default() }
    }

    fn blue() -> SeriesStyle {
        SeriesStyle::new(Color::INDIGO, Some(Color::INDIGO.with_alpha(0.2)), 2.0)
    }

    fn green_no_fill() -> SeriesStyle {
        SeriesStyle::new(Color::GREEN, None, 2.0)
    }

    fn count(frame: &[DrawCommand], pred: fn(&DrawCommand) -> bool) -> usize {
        frame.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn empty_chart_draws_clear_and_grid_only() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(5))
            .with_series("usage", blue());
        chart.render();

        let frame = chart.display_list();
        assert_eq!(frame[0], DrawCommand::Clear { width: 100.0, height: 100.0 });
        assert_eq!(frame.len(), 1 + 5);
        assert_eq!(count(frame, |c| matches!(c, DrawCommand::GridLine { .. })), 5);
    }

    #[test]
    fn grid_lines_span_the_padded_box() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(5));
        chart.render();
        let ys: Vec<f64> = chart
            .display_list()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::GridLine { from, to, .. } => {
                    assert_eq!(from.x, 10.0);
                    assert_eq!(to.x, 90.0);
                    Some(from.y)
                }
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
    }

    #[test]
    fn disabled_grid_draws_nothing_but_clear() {
        let mut s = settings(5);
        s.grid.enabled = false;
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), s);
        chart.render();
        assert_eq!(chart.display_list().len(), 1);
    }

    #[test]
    fn series_draws_fill_line_and_marker_in_order() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(5))
            .with_series("usage", blue());
        chart.push("usage", 0.0);
        chart.push("usage", 50.0);
        chart.render();

        let tail = &chart.display_list()[6..];
        assert_eq!(tail.len(), 3);

        match &tail[0] {
            DrawCommand::FillArea { points, .. } => assert_eq!(
                points,
                &vec![
                    PlotPoint::new(10.0, 90.0),
                    PlotPoint::new(10.0, 90.0),
                    PlotPoint::new(30.0, 50.0),
                    PlotPoint::new(30.0, 90.0),
                ]
            ),
            other => panic!("expected fill, got {other:?}"),
        }
        assert!(matches!(&tail[1], DrawCommand::Polyline { points, .. } if points.len() == 2));
        assert_eq!(
            tail[2],
            DrawCommand::Marker {
                center: PlotPoint::new(30.0, 50.0),
                radius: MARKER_RADIUS,
                color: Color::INDIGO,
            }
        );
    }

    #[test]
    fn series_without_fill_skips_area() {
        let mut chart = ChartSurface::new("net", &host("net", 100.0, 100.0), settings(5))
            .with_series("up", green_no_fill());
        chart.push("up", 10.0);
        chart.render();
        assert_eq!(count(chart.display_list(), |c| matches!(c, DrawCommand::FillArea { .. })), 0);
        assert_eq!(count(chart.display_list(), |c| matches!(c, DrawCommand::Marker { .. })), 1);
    }

    #[test]
    fn later_series_draw_over_earlier_and_empty_ones_are_skipped() {
        let mut chart = ChartSurface::new("net", &host("net", 100.0, 100.0), settings(5))
            .with_series("down", blue())
            .with_series("idle", blue())
            .with_series("up", green_no_fill());
        chart.push("down", 10.0);
        chart.push("up", 20.0);
        chart.render();

        let strokes: Vec<Color> = chart
            .display_list()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polyline { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(strokes, vec![Color::INDIGO, Color::GREEN]);
    }

    #[test]
    fn render_is_idempotent() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 320.0, 180.0), settings(60))
            .with_series("usage", blue());
        for v in [12.0, 40.5, 33.3] {
            chart.push("usage", v);
        }
        chart.render();
        let first = chart.display_list().to_vec();
        chart.render();
        assert_eq!(chart.display_list(), first.as_slice());
    }

    #[test]
    fn render_never_touches_series() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(5))
            .with_series("usage", blue());
        chart.push("usage", 1.0);
        let before = chart.series("usage").unwrap().clone();
        chart.render();
        assert_eq!(chart.series("usage").unwrap(), &before);
    }

    #[test]
    fn missing_region_makes_chart_inert() {
        let mut chart = ChartSurface::new("disk", &host("cpu", 100.0, 100.0), settings(5))
            .with_series("usage", blue());
        assert!(chart.is_inert());
        assert!(!chart.push("usage", 1.0));
        chart.render();
        chart.resize(&host("disk", 100.0, 100.0));
        assert!(chart.display_list().is_empty());
        assert!(chart.is_inert());
    }

    #[test]
    fn resize_remaps_without_losing_samples() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(5))
            .with_series("usage", blue());
        for v in [10.0, 20.0, 30.0] {
            chart.push("usage", v);
        }
        chart.render();

        chart.resize(&host("cpu", 200.0, 100.0));
        assert_eq!(chart.viewport().unwrap().width, 200.0);
        assert_eq!(chart.series("usage").unwrap().snapshot(), vec![10.0, 20.0, 30.0]);

        let last_x = chart.display_list().iter().find_map(|c| match c {
            DrawCommand::Marker { center, .. } => Some(center.x),
            _ => None,
        });
        // step = (200 - 20) / 4 = 45; third slot sits at 10 + 2 * 45.
        assert_eq!(last_x, Some(100.0));
    }

    #[test]
    fn resize_before_first_render_is_safe() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(5));
        chart.resize(&host("cpu", 50.0, 50.0));
        assert_eq!(chart.display_list()[0], DrawCommand::Clear { width: 50.0, height: 50.0 });
    }

    #[test]
    fn bad_capacity_yields_partial_frame() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(1))
            .with_series("usage", blue());
        chart.push("usage", 5.0);
        chart.render();
        assert!(chart
            .display_list()
            .iter()
            .all(|c| matches!(c, DrawCommand::Clear { .. } | DrawCommand::GridLine { .. })));
    }

    #[test]
    fn set_all_and_clear_target_series() {
        let mut chart = ChartSurface::new("cpu", &host("cpu", 100.0, 100.0), settings(3))
            .with_series("usage", blue());
        assert!(chart.set_all("usage", &[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(chart.series("usage").unwrap().snapshot(), vec![2.0, 3.0, 4.0]);
        assert!(!chart.set_all("missing", &[1.0]));
        chart.clear();
        assert!(chart.series("usage").unwrap().is_empty());
        assert_eq!(chart.display_list().len(), 1 + 5);
    }

    #[test]
    fn from_config_registers_series_in_order() {
        let cfg = ChartConfig::network();
        let chart = ChartSurface::from_config(&cfg, Color::GRID, &host("network", 400.0, 180.0));
        let names: Vec<&str> = chart.series_names().collect();
        assert_eq!(names, ["download", "upload"]);
        assert_eq!(chart.settings().range, ValueRange::new(0.0, 1000.0));
        assert!(!chart.display_list().is_empty());
    }
}
