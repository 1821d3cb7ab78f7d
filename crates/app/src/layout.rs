use dash_config::ChartConfig;
use dash_renderer::{LayoutBox, LayoutHost};
use dash_theme::Theme;

/// Chart regions for the current window size.
///
/// Charts sit in a two-column grid of cards; every chart is as wide as half
/// the window minus the outer padding, the gap between columns and the
/// card's own padding, and as tall as its config says.
#[derive(Debug, Clone, Default)]
pub struct DashLayout {
    regions: Vec<(String, LayoutBox)>,
}

impl DashLayout {
    pub fn compute(width: f32, charts: &[ChartConfig], theme: &Theme) -> Self {
        let pad = f64::from(theme.padding);
        let gap = f64::from(theme.gap);
        let column = (f64::from(width) - 2.0 * pad - gap) / 2.0;
        let chart_width = (column - 2.0 * pad).max(0.0);

        Self {
            regions: charts
                .iter()
                .map(|c| (c.name.clone(), LayoutBox::new(chart_width, f64::from(c.height))))
                .collect(),
        }
    }
}

impl LayoutHost for DashLayout {
    fn layout_box(&self, region: &str) -> Option<LayoutBox> {
        self.regions
            .iter()
            .find(|(name, _)| name == region)
            .map(|(_, b)| *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_columns_of_cards() {
        let layout = DashLayout::compute(1100.0, &[ChartConfig::cpu()], &Theme::default());
        // (1100 - 2*16 - 16) / 2 - 2*16
        assert_eq!(layout.layout_box("cpu"), Some(LayoutBox::new(494.0, 180.0)));
        assert_eq!(layout.layout_box("disk"), None);
    }

    #[test]
    fn tiny_window_never_goes_negative() {
        let layout = DashLayout::compute(10.0, &[ChartConfig::cpu()], &Theme::default());
        assert_eq!(layout.layout_box("cpu").map(|b| b.width), Some(0.0));
    }
}
