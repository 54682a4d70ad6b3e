/// Top bar: title, loaded counter, loading indicator, layout picker, shuffle
use iced::widget::{button, horizontal_space, pick_list, row, text};
use iced::{Alignment, Element, Length};

use crate::state::data::LayoutMode;
use crate::state::gallery::Gallery;
use crate::Message;

/// Height reserved for the toolbar above the gallery
pub const TOOLBAR_HEIGHT: f32 = 64.0;

pub fn view(gallery: &Gallery) -> Element<'_, Message> {
    let state = gallery.state();

    let indicator = if gallery.indicator_visible() {
        text("⏳ Loading...").size(14)
    } else {
        text("").size(14)
    };

    row![
        text("Image Gallery").size(24),
        horizontal_space(),
        indicator,
        text(format!("Loaded: {} / {}", gallery.counter_text(), state.total())).size(14),
        pick_list(LayoutMode::ALL, Some(state.layout), Message::LayoutSelected),
        button("Shuffle").on_press(Message::Shuffle).padding(10),
    ]
    .spacing(16)
    .padding(12)
    .height(Length::Fixed(TOOLBAR_HEIGHT))
    .align_y(Alignment::Center)
    .into()
}
