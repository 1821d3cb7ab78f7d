use crate::format::{format_uptime, MISSING};
use chrono::Utc;
use dash_core::{Message, Readouts};
use dash_theme::Theme;
use iced::{
    widget::{column, row, text},
    Element,
};

/// Hostname, OS and uptime.
#[derive(Debug, Default)]
pub struct SystemWidget;

impl SystemWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, readouts: &'a Readouts, theme: &'a Theme) -> Element<'a, Message> {
        let info = readouts.system.as_ref();
        let hostname = or_missing(info.and_then(|s| s.hostname.clone()));
        let os = or_missing(info.and_then(|s| s.os.clone()));
        let uptime = info
            .and_then(|s| s.uptime_at(Utc::now()))
            .map_or_else(|| MISSING.to_string(), format_uptime);

        let size = theme.font_size;
        column![
            row![text("Hostname").width(90).size(size), text(hostname).size(size)],
            row![text("OS").width(90).size(size), text(os).size(size)],
            row![text("Uptime").width(90).size(size), text(uptime).size(size)],
        ]
        .spacing(6)
        .into()
    }
}

fn or_missing(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| MISSING.to_string())
}
