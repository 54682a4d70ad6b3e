/// Full-screen preview overlay
///
/// Clicking the dimmed backdrop (including the space around a letterboxed
/// image) or the close button closes the overlay. Only the drawn image
/// itself swallows clicks.
use iced::widget::{button, column, container, horizontal_space, image, mouse_area, opaque, row, text};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::state::preview::PreviewContent;
use crate::Message;

const BACKDROP: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.9,
};

pub fn view(content: &PreviewContent) -> Element<'_, Message> {
    // Shrink keeps the widget bounds to the scaled picture, so the
    // surrounding area stays part of the backdrop
    let picture = image(content.handle.clone())
        .content_fit(ContentFit::Contain)
        .width(Length::Shrink)
        .height(Length::Shrink);

    let stage = container(opaque(picture))
        .center_x(Length::Fill)
        .center_y(Length::Fill);

    let body = column![
        row![
            horizontal_space(),
            button(text("✕").size(20))
                .on_press(Message::ClosePreview)
                .padding(8),
        ],
        stage,
        text(&content.caption).size(18).color(Color::WHITE),
        text(&content.description).size(14),
    ]
    .spacing(12)
    .padding(40)
    .align_x(Alignment::Center);

    let backdrop = container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(BACKDROP.into()),
            ..container::Style::default()
        });

    opaque(mouse_area(backdrop).on_press(Message::ClosePreview))
}
