//! iced backend: paints a chart's display list onto a canvas.

use crate::{
    mapper::PlotPoint,
    surface::{ChartSurface, DrawCommand},
};
use dash_theme::Color;
use iced::{
    mouse,
    widget::canvas::{self, path, Canvas, Frame, Geometry, LineCap, LineJoin, Path, Stroke},
    Element, Length, Point, Rectangle, Renderer, Size, Theme,
};

/// Borrowed view of one chart, valid for a single `view` pass.
pub struct ChartCanvas<'a> {
    surface:    &'a ChartSurface,
    background: Color,
}

impl<'a> ChartCanvas<'a> {
    pub fn new(surface: &'a ChartSurface, background: Color) -> Self {
        Self { surface, background }
    }

    /// Wrap into a fixed-size canvas element matching the chart's viewport.
    pub fn into_element<Message: 'a>(self) -> Element<'a, Message> {
        let (width, height) = self
            .surface
            .viewport()
            .map(|v| (v.width as f32, v.height as f32))
            .unwrap_or((0.0, 0.0));

        Canvas::new(self)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .into()
    }
}

impl<Message> canvas::Program<Message> for ChartCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        for command in self.surface.display_list() {
            paint(&mut frame, command, self.background);
        }
        vec![frame.into_geometry()]
    }
}

fn paint(frame: &mut Frame, command: &DrawCommand, background: Color) {
    match command {
        DrawCommand::Clear { width, height } => {
            frame.fill_rectangle(
                Point::ORIGIN,
                Size::new(*width as f32, *height as f32),
                background.to_iced(),
            );
        }
        DrawCommand::GridLine { from, to, color, width } => {
            let line = Path::line(point(*from), point(*to));
            frame.stroke(&line, Stroke::default().with_color(color.to_iced()).with_width(*width));
        }
        DrawCommand::FillArea { points, color } => {
            if let Some(area) = polygon(points, true) {
                frame.fill(&area, color.to_iced());
            }
        }
        DrawCommand::Polyline { points, color, width } => {
            if let Some(line) = polygon(points, false) {
                frame.stroke(
                    &line,
                    Stroke::default()
                        .with_color(color.to_iced())
                        .with_width(*width)
                        .with_line_join(LineJoin::Round)
                        .with_line_cap(LineCap::Round),
                );
            }
        }
        DrawCommand::Marker { center, radius, color } => {
            frame.fill(&Path::circle(point(*center), *radius as f32), color.to_iced());
        }
    }
}

fn polygon(points: &[PlotPoint], closed: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = path::Builder::new();
    builder.move_to(point(*first));
    for p in rest {
        builder.line_to(point(*p));
    }
    if closed {
        builder.close();
    }
    Some(builder.build())
}

fn point(p: PlotPoint) -> Point {
    Point::new(p.x as f32, p.y as f32)
}
