/// Full-screen preview of a single tile
use iced::widget::image::Handle;

use super::data::{Tile, TileStatus};
use crate::media::placeholder::placeholder;

#[derive(Debug, Clone)]
pub struct PreviewContent {
    /// Full-size image, or the placeholder for tiles that failed
    pub handle: Handle,
    pub caption: String,
    pub description: String,
}

/// Overlay state. While open, the gallery behind it must not scroll.
#[derive(Debug, Default)]
pub struct PreviewState {
    content: Option<PreviewContent>,
}

impl PreviewState {
    pub fn open(&mut self, tile: &Tile) {
        let handle = match tile.status {
            TileStatus::Failed => placeholder(),
            TileStatus::Pending | TileStatus::Loaded => {
                Handle::from_path(&tile.descriptor.source)
            }
        };

        self.content = Some(PreviewContent {
            handle,
            caption: caption_for(tile),
            description: tile.descriptor.description.clone(),
        });
    }

    /// Close the overlay. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        self.content.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    /// Background scrolling is suspended while the overlay is up
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn content(&self) -> Option<&PreviewContent> {
        self.content.as_ref()
    }
}

/// Title, falling back to the alt text
fn caption_for(tile: &Tile) -> String {
    let descriptor = &tile.descriptor;
    if descriptor.title.is_empty() {
        descriptor.alt.clone()
    } else {
        descriptor.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{ImageDescriptor, LayoutMode};
    use std::path::PathBuf;

    fn tile(title: &str, alt: &str) -> Tile {
        Tile::new(
            ImageDescriptor {
                id: 5,
                source: PathBuf::from("images/zeus (5).jpg"),
                alt: alt.to_string(),
                title: title.to_string(),
                description: "Explicit designs of Zuez 5".to_string(),
            },
            LayoutMode::Grid,
        )
    }

    #[test]
    fn test_open_uses_title() {
        let mut preview = PreviewState::default();
        preview.open(&tile("Zuez Image #5", ""));

        let content = preview.content().unwrap();
        assert_eq!(content.caption, "Zuez Image #5");
        assert_eq!(content.description, "Explicit designs of Zuez 5");
        assert!(preview.scroll_locked());
    }

    #[test]
    fn test_caption_falls_back_to_alt() {
        let mut preview = PreviewState::default();
        preview.open(&tile("", "Zuez image 5"));
        assert_eq!(preview.content().unwrap().caption, "Zuez image 5");
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut preview = PreviewState::default();
        assert!(!preview.close());

        preview.open(&tile("Zuez Image #5", ""));
        assert!(preview.close());
        assert!(!preview.is_open());
        assert!(!preview.scroll_locked());
        assert!(!preview.close());
    }

    #[test]
    fn test_failed_tile_previews_placeholder() {
        let mut failed = tile("Zuez Image #12", "");
        failed.status = TileStatus::Failed;

        let mut preview = PreviewState::default();
        preview.open(&failed);
        assert_eq!(preview.content().unwrap().handle, placeholder());
    }
}
