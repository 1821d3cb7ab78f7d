use dash_core::Message;
use dash_theme::Theme;
use iced::{
    widget::{button, checkbox, pick_list, row, text},
    Alignment, Element,
};
use std::{fmt, time::Duration};

/// A selectable sampling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRate(pub u64);

impl RefreshRate {
    pub const CHOICES: [RefreshRate; 4] = [RefreshRate(1), RefreshRate(2), RefreshRate(5), RefreshRate(10)];

    /// The listed choice matching `interval`, if any.
    pub fn matching(interval: Duration) -> Option<Self> {
        Self::CHOICES
            .into_iter()
            .find(|r| Duration::from_secs(r.0) == interval)
    }
}

impl fmt::Display for RefreshRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.0)
    }
}

/// Start/stop buttons, refresh-rate picker and the simulation switch.
#[derive(Debug, Default)]
pub struct Controls;

impl Controls {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        running: bool,
        interval: Duration,
        simulated: bool,
        theme: &'a Theme,
    ) -> Element<'a, Message> {
        let start = button(text("Start")).on_press_maybe((!running).then_some(Message::Start));
        let start = if running { start } else { start.style(iced::widget::button::primary) };
        let stop = button(text("Stop")).on_press_maybe(running.then_some(Message::Stop));

        let picker = pick_list(
            RefreshRate::CHOICES,
            RefreshRate::matching(interval),
            |r: RefreshRate| Message::SetInterval(r.0 as f64),
        );

        let sim = checkbox(simulated)
            .label("Simulated data")
            .on_toggle(Message::SimulationToggled);

        row![start, stop, text("Refresh").size(theme.font_size), picker, sim]
            .spacing(f32::from(theme.gap) / 2.0)
            .align_y(Alignment::Center)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_listed_intervals_only() {
        assert_eq!(RefreshRate::matching(Duration::from_secs(5)), Some(RefreshRate(5)));
        assert_eq!(RefreshRate::matching(Duration::from_millis(1500)), None);
    }

    #[test]
    fn display() {
        assert_eq!(RefreshRate(10).to_string(), "10 s");
    }
}
