//! Chart engine for the dashboard.
//!
//! Samples flow one way: a [`RollingSeries`] buffers them, [`map_points`]
//! turns them into surface coordinates and a [`ChartSurface`] assembles the
//! frame as a list of [`DrawCommand`]s.  The [`canvas`] module paints that
//! list with iced; everything else is toolkit-agnostic.

pub mod canvas;
pub mod mapper;
pub mod registry;
pub mod series;
pub mod surface;

pub use canvas::ChartCanvas;
pub use mapper::{map_points, PlotPoint, ValueRange, Viewport};
pub use registry::ChartRegistry;
pub use series::{RollingSeries, DEFAULT_CAPACITY};
pub use surface::{
    ChartSettings, ChartSurface, DrawCommand, GridStyle, LayoutBox, LayoutHost, MARKER_RADIUS,
};
