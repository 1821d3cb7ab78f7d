use chrono::{DateTime, Local};
use dash_core::{LinkStatus, Message};
use dash_theme::Theme;
use iced::{
    widget::{container, row, text},
    Alignment, Element, Length,
};
use std::time::Duration;

/// Header line: connection dot and text, refresh rate, sample counter and
/// time of the last update.
#[derive(Debug, Default)]
pub struct StatusLine;

impl StatusLine {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        status: &'a LinkStatus,
        interval: Duration,
        samples: u64,
        last_update: Option<DateTime<Local>>,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let dot_color = match status {
            LinkStatus::Pending => theme.foreground.with_alpha(0.4),
            LinkStatus::Connected => theme.ok,
            LinkStatus::Disconnected(_) => theme.danger,
        }
        .to_iced();

        let dot = container(text(""))
            .width(Length::Fixed(10.0))
            .height(Length::Fixed(10.0))
            .style(move |_: &iced::Theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(dot_color)),
                border: iced::Border { radius: 5.0.into(), ..Default::default() },
                ..Default::default()
            });

        let size = theme.font_size;
        row![
            dot,
            text(status_text(status)).size(size),
            text(format!("Refresh: {}s", trim_secs(interval))).size(size),
            text(format!("Samples: {samples}")).size(size),
            text(format!("Last update: {}", last_update_text(last_update))).size(size),
        ]
        .spacing(f32::from(theme.gap))
        .align_y(Alignment::Center)
        .into()
    }
}

fn status_text(status: &LinkStatus) -> String {
    match status {
        LinkStatus::Pending => "Connecting...".to_string(),
        LinkStatus::Connected => "Connected".to_string(),
        LinkStatus::Disconnected(msg) if msg.is_empty() => "Connection failed".to_string(),
        LinkStatus::Disconnected(msg) => msg.clone(),
    }
}

fn last_update_text(at: Option<DateTime<Local>>) -> String {
    at.map_or_else(|| "-".to_string(), |t| t.format("%H:%M:%S").to_string())
}

/// `1s`, `2.5s`: whole seconds without a trailing `.0`.
fn trim_secs(interval: Duration) -> String {
    let secs = interval.as_secs_f64();
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        format!("{secs}")
    }
}
