use dash_core::{snapshot::ProcessEntry, Message, Readouts};
use dash_theme::Theme;
use iced::{
    widget::{column, row, text, Column},
    Element, Length,
};

/// Top processes as a four-column table.
#[derive(Debug, Default)]
pub struct ProcessTable;

impl ProcessTable {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, readouts: &'a Readouts, theme: &'a Theme) -> Element<'a, Message> {
        let size = theme.font_size;
        let dim = theme.foreground.with_alpha(0.6).to_iced();

        let header = row![
            text("PID").width(Length::FillPortion(1)).size(size).color(dim),
            text("Name").width(Length::FillPortion(3)).size(size).color(dim),
            text("CPU").width(Length::FillPortion(1)).size(size).color(dim),
            text("Memory").width(Length::FillPortion(2)).size(size).color(dim),
        ];

        let rows = readouts
            .processes
            .iter()
            .map(|p| process_row(p, size));

        column![header, Column::with_children(rows).spacing(4)]
            .spacing(6)
            .into()
    }
}

fn process_row<'a>(p: &ProcessEntry, size: f32) -> Element<'a, Message> {
    let cells = cells(p);
    row![
        text(cells[0].clone()).width(Length::FillPortion(1)).size(size),
        text(cells[1].clone()).width(Length::FillPortion(3)).size(size),
        text(cells[2].clone()).width(Length::FillPortion(1)).size(size),
        text(cells[3].clone()).width(Length::FillPortion(2)).size(size),
    ]
    .into()
}

/// Display strings for one row.  CPU arrives pre-formatted and only gains
/// a percent sign.
fn cells(p: &ProcessEntry) -> [String; 4] {
    [p.pid.to_string(), p.name.clone(), format!("{}%", p.cpu), p.memory.clone()]
}
