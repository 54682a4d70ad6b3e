/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the gallery controller and the UI layer.

use iced::widget::image::Handle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long a freshly loaded tile takes to fade in
pub const TILE_FADE: Duration = Duration::from_millis(500);

/// Represents a single image in the catalog
///
/// Created once when the catalog is generated and never mutated.
/// Shuffling reorders descriptors, it does not rebuild them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// 1-based position in the catalog before any shuffle
    pub id: usize,
    /// Path to the image file, e.g. "images/zeus (12).jpg"
    pub source: PathBuf,
    pub alt: String,
    pub title: String,
    pub description: String,
}

/// Gallery presentation mode
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
    Masonry,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 2] = [LayoutMode::Grid, LayoutMode::Masonry];
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Grid => write!(f, "Grid"),
            LayoutMode::Masonry => write!(f, "Masonry"),
        }
    }
}

/// How an image fills its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFit {
    /// Letterboxed inside the tile
    Contain,
    /// Cropped to fill the tile
    Cover,
}

/// Shape of the tile itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAspect {
    Square,
    /// Follows the image's natural aspect ratio
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub fit: TileFit,
    pub aspect: TileAspect,
}

impl Presentation {
    pub fn for_layout(mode: LayoutMode) -> Self {
        match mode {
            LayoutMode::Grid => Self {
                fit: TileFit::Contain,
                aspect: TileAspect::Square,
            },
            LayoutMode::Masonry => Self {
                fit: TileFit::Cover,
                aspect: TileAspect::Natural,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStatus {
    /// Attached to the gallery, decode still running
    Pending,
    Loaded,
    /// Decode failed, showing the placeholder
    Failed,
}

/// A rendered gallery element bound to one descriptor
#[derive(Debug, Clone)]
pub struct Tile {
    pub descriptor: ImageDescriptor,
    pub presentation: Presentation,
    pub status: TileStatus,
    /// Thumbnail (or placeholder) once the decode finished
    pub handle: Option<Handle>,
    /// Natural image size, used for masonry heights
    pub natural_size: Option<(u32, u32)>,
    /// When the tile became visible, drives the fade-in
    pub shown_at: Option<Instant>,
}

impl Tile {
    pub fn new(descriptor: ImageDescriptor, mode: LayoutMode) -> Self {
        Self {
            descriptor,
            presentation: Presentation::for_layout(mode),
            status: TileStatus::Pending,
            handle: None,
            natural_size: None,
            shown_at: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status != TileStatus::Pending
    }

    /// Height/width ratio used when the tile follows the natural aspect
    pub fn aspect_ratio(&self) -> f32 {
        match (self.presentation.aspect, self.natural_size) {
            (TileAspect::Natural, Some((w, h))) if w > 0 && h > 0 => h as f32 / w as f32,
            _ => 1.0,
        }
    }

    /// Current fade-in opacity
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.shown_at {
            Some(shown) => fade_progress(now.saturating_duration_since(shown)),
            None => 0.0,
        }
    }

    pub fn is_fading(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|shown| now.saturating_duration_since(shown) < TILE_FADE)
    }
}

fn fade_progress(elapsed: Duration) -> f32 {
    (elapsed.as_secs_f32() / TILE_FADE.as_secs_f32()).clamp(0.0, 1.0)
}
