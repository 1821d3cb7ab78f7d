/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const PAPER:       Self = Self { r: 0.961, g: 0.965, b: 0.980, a: 1.0 }; // #f5f6fa
    pub const INK:         Self = Self { r: 0.176, g: 0.216, b: 0.282, a: 1.0 }; // #2d3748
    pub const INDIGO:      Self = Self { r: 0.400, g: 0.494, b: 0.918, a: 1.0 }; // #667eea
    pub const WHITE:       Self = Self { r: 1.0,   g: 1.0,   b: 1.0,   a: 1.0 }; // #ffffff
    pub const GRID:        Self = Self { r: 0.941, g: 0.941, b: 0.941, a: 1.0 }; // #f0f0f0
    pub const AMBER:       Self = Self { r: 0.961, g: 0.620, b: 0.043, a: 1.0 }; // #f59e0b
    pub const RED:         Self = Self { r: 0.937, g: 0.267, b: 0.267, a: 1.0 }; // #ef4444
    pub const GREEN:       Self = Self { r: 0.063, g: 0.725, b: 0.506, a: 1.0 }; // #10b981
    pub const TRANSPARENT: Self = Self { r: 0.0,   g: 0.0,   b: 0.0,   a: 0.0 };

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}
