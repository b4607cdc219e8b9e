use iced::widget::canvas;
use iced::{alignment, mouse, Color, Element, Length, Pixels, Point, Rectangle};

/// A keyboard-shortcut hint rendered as light text over a dark outline
/// stroked at four diagonal offsets, so it stays legible over whatever the
/// overlay happens to be covering.
pub struct OutlinedLabel {
    text: String,
}

pub fn outlined_label<'a, Message: 'a>(text: &str) -> Element<'a, Message> {
    canvas(OutlinedLabel {
        text: text.to_string(),
    })
    .width(Length::Fixed(160.0))
    .height(Length::Fixed(20.0))
    .into()
}

const OUTLINE_OFFSETS: [(f32, f32); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];

impl OutlinedLabel {
    fn label_text(&self, position: Point, color: Color) -> canvas::Text {
        canvas::Text {
            content: self.text.clone(),
            position,
            color,
            size: Pixels(13.0),
            align_x: iced::widget::text::Alignment::Center,
            align_y: alignment::Vertical::Center,
            ..canvas::Text::default()
        }
    }
}

impl<Message> canvas::Program<Message> for OutlinedLabel {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry<iced::Renderer>> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);

        for (dx, dy) in OUTLINE_OFFSETS {
            frame.fill_text(
                self.label_text(Point::new(center.x + dx, center.y + dy), Color::BLACK),
            );
        }
        frame.fill_text(self.label_text(center, Color::WHITE));

        vec![frame.into_geometry()]
    }
}
