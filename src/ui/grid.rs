/// Gallery body: every attached tile, in grid or masonry layout
use iced::widget::{column, container, image, mouse_area, row, scrollable, stack, text, Space};
use iced::{Color, ContentFit, Element, Length};
use iced_aw::Wrap;
use std::time::Instant;

use crate::state::data::{LayoutMode, Tile, TileFit, TileStatus};
use crate::state::gallery::Gallery;
use crate::state::viewport::{self, GALLERY_PADDING, TILE_SPACING};
use crate::Message;

const PENDING_BACKGROUND: Color = Color {
    r: 0.12,
    g: 0.12,
    b: 0.12,
    a: 1.0,
};

pub fn view<'a>(gallery: &'a Gallery, now: Instant) -> Element<'a, Message> {
    let state = gallery.state();
    let tile_size = gallery.config().tile_size;
    let surface_opacity = state.surface_opacity;

    let content: Element<'a, Message> = match state.layout {
        LayoutMode::Grid => {
            let cells = state
                .tiles
                .iter()
                .map(|tile| tile_view(tile, tile_size, tile_size, surface_opacity, now))
                .collect();

            Wrap::with_elements(cells)
                .spacing(TILE_SPACING)
                .line_spacing(TILE_SPACING)
                .into()
        }
        LayoutMode::Masonry => {
            let columns = viewport::column_count(gallery.viewport().width, tile_size);

            let packed = viewport::masonry_columns(&state.tiles, columns, tile_size)
                .into_iter()
                .map(|indices| -> Element<'a, Message> {
                    let cells = indices.into_iter().map(|i| {
                        let tile = &state.tiles[i];
                        let height = tile_size * tile.aspect_ratio();
                        tile_view(tile, tile_size, height, surface_opacity, now)
                    });
                    column(cells)
                        .spacing(TILE_SPACING)
                        .width(Length::Fixed(tile_size))
                        .into()
                });

            row(packed).spacing(TILE_SPACING).into()
        }
    };

    scrollable(container(content).padding(GALLERY_PADDING).width(Length::Fill))
        .on_scroll(|viewport| Message::Scrolled {
            offset: viewport.absolute_offset().y,
            height: viewport.bounds().height,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn tile_view(
    tile: &Tile,
    width: f32,
    height: f32,
    surface_opacity: f32,
    now: Instant,
) -> Element<'_, Message> {
    let body: Element<'_, Message> = match &tile.handle {
        Some(handle) => {
            let picture = image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .content_fit(content_fit(tile.presentation.fit))
                .opacity(tile.opacity(now) * surface_opacity);

            if tile.status == TileStatus::Failed {
                stack![
                    picture,
                    container(
                        text("Image missing")
                            .size(12)
                            .color(faded(Color::WHITE, surface_opacity)),
                    )
                    .center_x(Length::Fixed(width))
                    .center_y(Length::Fixed(height)),
                ]
                .into()
            } else {
                picture.into()
            }
        }
        None => container(Space::new(Length::Fixed(width), Length::Fixed(height)))
            .style(move |_theme| container::Style {
                background: Some(faded(PENDING_BACKGROUND, surface_opacity).into()),
                ..container::Style::default()
            })
            .into(),
    };

    mouse_area(body)
        .on_press(Message::OpenPreview(tile.descriptor.id))
        .into()
}

fn content_fit(fit: TileFit) -> ContentFit {
    match fit {
        TileFit::Contain => ContentFit::Contain,
        TileFit::Cover => ContentFit::Cover,
    }
}

/// Applies the shuffle fade to chrome drawn around the images
fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity,
        ..color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_and_missing_chrome_follow_surface_fade() {
        let hidden = faded(PENDING_BACKGROUND, 0.0);
        assert_eq!(hidden.a, 0.0);
        assert_eq!(hidden.r, PENDING_BACKGROUND.r);

        assert_eq!(faded(PENDING_BACKGROUND, 1.0), PENDING_BACKGROUND);
        assert_eq!(faded(Color::WHITE, 0.5).a, 0.5);
    }
}
