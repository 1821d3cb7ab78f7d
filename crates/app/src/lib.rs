//! iced shell for `sysdash`.
//!
//! Wires the toolkit to [`Dashboard`]:
//! - periodic tick while sampling is running
//! - snapshot fetches as async tasks
//! - window resize events
//! - config file watcher (live reload on change)

pub mod dashboard;
pub mod layout;

pub use dashboard::{Dashboard, Effect};

use dash_config::{default_path, load as load_config, ConfigWatcher, DashConfig};
use dash_core::Message;
use dash_renderer::{ChartCanvas, ChartSurface};
use dash_system::SnapshotSource;
use dash_widgets::{
    card, Controls, NetworkWidget, ProcessTable, StatusLine, SystemWidget, UsageKind, UsageWidget,
};
use futures::channel::mpsc::Sender;
use iced::{
    widget::{column, container, row, scrollable, text},
    Alignment, Element, Length, Size, Subscription, Task,
};
use std::{path::PathBuf, time::Duration};
use tracing::warn;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    let path = default_path();
    let config = load_config(&path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        DashConfig::default()
    });
    let size = Size::new(config.window.width, config.window.height);

    iced::application(
        move || App::new(config.clone(), path.clone()),
        App::update,
        App::view,
    )
    .title("sysdash")
    .subscription(App::subscription)
    .style(App::style)
    .theme(App::theme)
    .window_size(size)
    .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

struct App {
    dash:      Dashboard,
    cpu:       UsageWidget,
    memory:    UsageWidget,
    disk:      UsageWidget,
    network:   NetworkWidget,
    system:    SystemWidget,
    processes: ProcessTable,
    status:    StatusLine,
    controls:  Controls,
}

impl App {
    fn new(config: DashConfig, config_path: PathBuf) -> (Self, Task<Message>) {
        let source = SnapshotSource::from_config(&config.sampling);
        let mut dash = Dashboard::new(config, source).with_config_path(config_path);
        let first = dash.start();

        let app = Self {
            dash,
            cpu:       UsageWidget::new(UsageKind::Cpu),
            memory:    UsageWidget::new(UsageKind::Memory),
            disk:      UsageWidget::new(UsageKind::Disk),
            network:   NetworkWidget::new(),
            system:    SystemWidget::new(),
            processes: ProcessTable::new(),
            status:    StatusLine::new(),
            controls:  Controls::new(),
        };
        let task = app.perform(first);
        (app, task)
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        let effect = self.dash.handle(message);
        self.perform(effect)
    }

    fn perform(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::Fetch => Task::perform(self.dash.source().clone().fetch(), Message::Fetched),
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let theme = self.dash.theme();
        let readouts = self.dash.readouts();
        let sampler = self.dash.sampler();
        let gap = f32::from(theme.gap);

        let header = row![
            text("System Monitor").size(theme.font_size * 1.6).width(Length::Fill),
            self.status.view(
                sampler.status(),
                sampler.interval(),
                sampler.samples(),
                readouts.last_update,
                theme,
            ),
        ]
        .align_y(Alignment::Center);

        let controls = self.controls.view(
            sampler.is_running(),
            sampler.interval(),
            self.dash.source().is_simulated(),
            theme,
        );

        let gauges = row![
            card(UsageKind::Cpu.title(), self.cpu.view(readouts, theme), theme),
            card(UsageKind::Memory.title(), self.memory.view(readouts, theme), theme),
            card(UsageKind::Disk.title(), self.disk.view(readouts, theme), theme),
        ]
        .spacing(gap);

        let details = row![
            card("Network", self.network.view(readouts, theme), theme),
            card("System", self.system.view(readouts, theme), theme),
        ]
        .spacing(gap);

        let content = column![
            header,
            controls,
            gauges,
            self.chart_grid(),
            details,
            card("Top Processes", self.processes.view(readouts, theme), theme),
        ]
        .spacing(gap)
        .padding(theme.padding);

        scrollable(content).height(Length::Fill).into()
    }

    /// Chart cards, two per row in registration order.
    fn chart_grid(&self) -> Element<'_, Message> {
        let theme = self.dash.theme();
        let gap = f32::from(theme.gap);

        let mut cards = self.dash.charts().iter().map(|chart| self.chart_card(chart));
        let mut grid = column![].spacing(gap);
        while let Some(left) = cards.next() {
            let right = cards
                .next()
                .unwrap_or_else(|| container(text("")).width(Length::Fill).into());
            grid = grid.push(row![left, right].spacing(gap));
        }
        grid.into()
    }

    fn chart_card<'a>(&'a self, chart: &'a ChartSurface) -> Element<'a, Message> {
        let theme = self.dash.theme();
        let title = self
            .dash
            .config()
            .charts
            .iter()
            .find(|c| c.name == chart.name())
            .map_or(chart.name(), |c| c.title.as_str());

        card(title, ChartCanvas::new(chart, theme.card).into_element::<Message>(), theme)
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let resize = iced::window::resize_events().map(|(_id, size)| Message::WindowResized {
            width:  size.width,
            height: size.height,
        });

        let mut subs = vec![resize, Subscription::run(config_stream)];
        if let Some(period) = self.dash.sampler().tick_period() {
            subs.push(iced::time::every(period).map(|_| Message::Tick));
        }
        Subscription::batch(subs)
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        let theme = self.dash.theme();
        iced::theme::Style {
            background_color: theme.background.to_iced(),
            text_color:       theme.foreground.to_iced(),
        }
    }

    fn theme(&self) -> iced::Theme {
        iced::Theme::Light
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Watches the config file for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}
