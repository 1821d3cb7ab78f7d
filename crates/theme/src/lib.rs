pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{Band, SeriesStyle};

use dash_config::ThemeConfig;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible; invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent:     Color,
    pub card:       Color,
    pub grid:       Color,
    pub warning:    Color,
    pub danger:     Color,
    pub ok:         Color,
    pub font_size:  f32,
    pub padding:    u16,
    pub gap:        u16,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::PAPER),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::INK),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::INDIGO),
            card:       Color::from_hex(&cfg.card).unwrap_or(Color::WHITE),
            grid:       Color::from_hex(&cfg.grid).unwrap_or(Color::GRID),
            warning:    Color::from_hex(&cfg.warning).unwrap_or(Color::AMBER),
            danger:     Color::from_hex(&cfg.danger).unwrap_or(Color::RED),
            ok:         Color::from_hex(&cfg.ok).unwrap_or(Color::GREEN),
            font_size:  cfg.font_size,
            padding:    cfg.padding,
            gap:        cfg.gap,
        }
    }

    /// Progress-bar color for a percentage readout.
    pub fn band_color(&self, band: Band) -> Color {
        match band {
            Band::Normal  => self.accent,
            Band::Warning => self.warning,
            Band::Danger  => self.danger,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_colors_fall_back() {
        let cfg = ThemeConfig { grid: "oops".into(), ..ThemeConfig::default() };
        assert_eq!(Theme::from_config(&cfg).grid, Color::GRID);
    }

    #[test]
    fn band_colors() {
        let theme = Theme::default();
        assert_eq!(theme.band_color(Band::Danger), theme.danger);
        assert_eq!(theme.band_color(Band::Normal), theme.accent);
    }
}
