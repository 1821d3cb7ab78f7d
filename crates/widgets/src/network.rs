use crate::format::{format_speed, MISSING};
use dash_core::{Message, Readouts};
use dash_theme::Theme;
use iced::{
    widget::{column, row, text},
    Element,
};

/// Current download and upload rates.
#[derive(Debug, Default)]
pub struct NetworkWidget;

impl NetworkWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, readouts: &'a Readouts, theme: &'a Theme) -> Element<'a, Message> {
        let (down, up) = match readouts.network {
            Some(n) => (format_speed(n.download), format_speed(n.upload)),
            None => (MISSING.to_string(), MISSING.to_string()),
        };

        column![
            row![text("↓ Download").width(110), text(down).color(theme.ok.to_iced())],
            row![text("↑ Upload").width(110), text(up).color(theme.accent.to_iced())],
        ]
        .spacing(6)
        .into()
    }
}
