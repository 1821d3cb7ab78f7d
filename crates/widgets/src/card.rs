use dash_theme::Theme;
use iced::{
    widget::{column, container, text},
    Element, Length,
};

/// White rounded panel with a heading, used for every dashboard section.
pub fn card<'a, Message: 'a>(
    title: &'a str,
    body: impl Into<Element<'a, Message>>,
    theme: &Theme,
) -> Element<'a, Message> {
    let bg = theme.card.to_iced();
    let heading = theme.foreground.with_alpha(0.7).to_iced();

    container(
        column![text(title).size(theme.font_size).color(heading), body.into()]
            .spacing(f32::from(theme.gap) / 2.0),
    )
    .padding(theme.padding)
    .width(Length::Fill)
    .style(move |_: &iced::Theme| iced::widget::container::Style {
        background: Some(iced::Background::Color(bg)),
        border: iced::Border { radius: 10.0.into(), ..Default::default() },
        ..Default::default()
    })
    .into()
}
