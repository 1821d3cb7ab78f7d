use crate::colors::Color;
use dash_config::SeriesConfig;

/// How one series is painted: stroke, optional area fill, line width.
///
/// Built once when the chart is created and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub stroke: Color,
    /// `None` = no area fill under the line.
    pub fill: Option<Color>,
    pub width: f32,
}

impl SeriesStyle {
    pub const DEFAULT_WIDTH: f32 = 2.0;

    pub fn new(stroke: Color, fill: Option<Color>, width: f32) -> Self {
        Self { stroke, fill, width }
    }

    /// Build a style from config.  An unparsable stroke falls back to the
    /// default indigo; an unparsable fill disables the fill.
    pub fn from_config(cfg: &SeriesConfig) -> Self {
        Self {
            stroke: Color::from_hex(&cfg.stroke).unwrap_or(Color::INDIGO),
            fill:   cfg.fill.as_deref().and_then(Color::from_hex),
            width:  cfg.width,
        }
    }
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            stroke: Color::INDIGO,
            fill:   Some(Color::INDIGO.with_alpha(0.2)),
            width:  Self::DEFAULT_WIDTH,
        }
    }
}

/// Color band of a percentage readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Normal,
    /// Above 60 %.
    Warning,
    /// Above 80 %.
    Danger,
}

impl Band {
    pub fn for_percent(percent: f64) -> Self {
        if percent > 80.0 {
            Band::Danger
        } else if percent > 60.0 {
            Band::Warning
        } else {
            Band::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::Metric;

    #[test]
    fn bands_use_strict_thresholds() {
        assert_eq!(Band::for_percent(60.0), Band::Normal);
        assert_eq!(Band::for_percent(60.1), Band::Warning);
        assert_eq!(Band::for_percent(80.0), Band::Warning);
        assert_eq!(Band::for_percent(95.0), Band::Danger);
    }

    #[test]
    fn style_from_config_without_fill() {
        let cfg = SeriesConfig::new("usage", Metric::CpuUsage, "#3b82f6", None);
        let style = SeriesStyle::from_config(&cfg);
        assert_eq!(style.fill, None);
        assert_eq!(style.width, 2.0);
    }

    #[test]
    fn bad_fill_disables_fill() {
        let cfg = SeriesConfig::new("usage", Metric::CpuUsage, "#3b82f6", Some("nope"));
        assert_eq!(SeriesStyle::from_config(&cfg).fill, None);
    }
}
