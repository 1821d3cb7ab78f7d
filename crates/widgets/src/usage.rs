use crate::format::MISSING;
use dash_core::{
    snapshot::{CpuReading, UsageReading},
    Message, Readouts,
};
use dash_theme::{Band, Theme};
use iced::{
    widget::{column, progress_bar, row, text},
    Alignment, Element, Length,
};

/// Which percentage readout a [`UsageWidget`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageKind {
    Cpu,
    Memory,
    Disk,
}

impl UsageKind {
    pub fn title(self) -> &'static str {
        match self {
            UsageKind::Cpu    => "CPU",
            UsageKind::Memory => "Memory",
            UsageKind::Disk   => "Disk",
        }
    }
}

/// Big percentage, a progress bar colored by load band and, for memory
/// and disk, the used/total figures underneath.
#[derive(Debug)]
pub struct UsageWidget {
    kind: UsageKind,
}

impl UsageWidget {
    pub fn new(kind: UsageKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> UsageKind {
        self.kind
    }

    pub fn view<'a>(&'a self, readouts: &'a Readouts, theme: &'a Theme) -> Element<'a, Message> {
        let percent = self.percent(readouts);
        let headline = percent.map_or_else(|| MISSING.to_string(), |p| format!("{p:.1}%"));

        let band = Band::for_percent(percent.unwrap_or(0.0));
        let fill = theme.band_color(band).to_iced();
        let track = theme.grid.to_iced();

        let bar = progress_bar(0.0..=100.0, percent.unwrap_or(0.0) as f32).style(
            move |_: &iced::Theme| iced::widget::progress_bar::Style {
                background: iced::Background::Color(track),
                bar: iced::Background::Color(fill),
                border: iced::Border { radius: 4.0.into(), ..Default::default() },
            },
        );

        let mut body = column![text(headline).size(theme.font_size * 2.0), bar]
            .spacing(6)
            .width(Length::Fill);

        if let Some((used, total)) = self.detail(readouts) {
            body = body.push(
                row![
                    text(used).size(theme.font_size * 0.85).width(Length::Fill),
                    text(total).size(theme.font_size * 0.85),
                ]
                .align_y(Alignment::Center),
            );
        }

        body.into()
    }

    /// Percentage rounded to the one decimal that is displayed; bands are
    /// chosen from the displayed value.
    fn percent(&self, readouts: &Readouts) -> Option<f64> {
        let raw = match self.kind {
            UsageKind::Cpu => readouts.cpu.map(|CpuReading { usage }| usage),
            UsageKind::Memory => readouts.memory.map(|m| m.percent),
            UsageKind::Disk => readouts.disk.map(|d| d.percent),
        };
        raw.map(|p| (p * 10.0).round() / 10.0)
    }

    fn detail(&self, readouts: &Readouts) -> Option<(String, String)> {
        match self.kind {
            UsageKind::Cpu => None,
            UsageKind::Memory => readouts.memory.map(|UsageReading { used, total, .. }| {
                (format!("{used:.1} GB used"), format!("{total:.0} GB total"))
            }),
            UsageKind::Disk => readouts.disk.map(|UsageReading { used, total, .. }| {
                (format!("{used:.0} GB used"), format!("{total:.0} GB total"))
            }),
        }
    }
}
