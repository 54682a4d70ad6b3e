/// Placeholder shown in place of images that failed to load
///
/// A dark square with a light frame and a cross, so a missing image
/// still occupies a tile instead of collapsing the layout.

use iced::widget::image::Handle;
use image::{Rgba, RgbaImage};
use std::sync::OnceLock;

pub const PLACEHOLDER_SIZE: u32 = 100;

const BACKGROUND: Rgba<u8> = Rgba([0x22, 0x22, 0x22, 0xFF]);
const STROKE: Rgba<u8> = Rgba([0x66, 0x66, 0x66, 0xFF]);
const FRAME_INSET: u32 = 8;

/// Shared handle to the placeholder image
pub fn placeholder() -> Handle {
    static HANDLE: OnceLock<Handle> = OnceLock::new();
    HANDLE
        .get_or_init(|| {
            let pixels = placeholder_pixels();
            Handle::from_rgba(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, pixels.into_raw())
        })
        .clone()
}

/// Raw placeholder pixels, identical on every call
pub fn placeholder_pixels() -> RgbaImage {
    let size = PLACEHOLDER_SIZE;
    let last = size - 1 - FRAME_INSET;

    RgbaImage::from_fn(size, size, |x, y| {
        let inside = (FRAME_INSET..=last).contains(&x) && (FRAME_INSET..=last).contains(&y);
        let on_frame = inside && (x == FRAME_INSET || x == last || y == FRAME_INSET || y == last);
        let on_cross = inside && (x == y || x + y == size - 1);

        if on_frame || on_cross {
            STROKE
        } else {
            BACKGROUND
        }
    })
}
