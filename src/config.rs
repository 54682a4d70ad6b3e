/// Gallery configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/image-gallery/config.json
/// - macOS: ~/Library/Application Support/image-gallery/config.json
/// - Windows: %APPDATA%\image-gallery\config.json
///
/// The file is optional. Every field falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};
use crate::state::data::LayoutMode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Number of images in the catalog (indices 1..=total_images)
    pub total_images: usize,
    /// Descriptors dispatched per batch
    pub batch_size: usize,
    /// Directory holding the image files
    pub image_dir: PathBuf,
    /// File stem shared by every image, e.g. "zeus" for "zeus (12).jpg"
    pub basename: String,
    /// Display name used for alt text, titles and descriptions
    pub subject: String,
    /// Distance from the bottom (in logical pixels) that triggers another batch
    pub proximity_threshold: f32,
    /// Delay before a follow-up batch when still near the bottom
    pub reload_delay_ms: u64,
    /// Fade-out time before a shuffle resets the gallery
    pub fade_delay_ms: u64,
    /// Quiet period after the last scroll event before re-checking proximity
    pub scroll_debounce_ms: u64,
    /// Edge length of a grid cell
    pub tile_size: f32,
    /// Longest edge of decoded thumbnails
    pub thumbnail_size: u32,
    pub initial_layout: LayoutMode,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            total_images: 147,
            batch_size: 24,
            image_dir: PathBuf::from("images"),
            basename: "zeus".to_string(),
            subject: "Zuez".to_string(),
            proximity_threshold: 1000.0,
            reload_delay_ms: 300,
            fade_delay_ms: 300,
            scroll_debounce_ms: 100,
            tile_size: 240.0,
            thumbnail_size: 512,
            initial_layout: LayoutMode::Grid,
        }
    }
}

impl GalleryConfig {
    /// Load the config from the user's config directory.
    ///
    /// Never fails: a missing file means defaults, a broken one is
    /// logged and replaced with defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("📁 Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read and validate a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| GalleryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(GalleryError::InvalidConfig("batch_size must be at least 1".into()));
        }
        if !(self.tile_size > 0.0) {
            return Err(GalleryError::InvalidConfig("tile_size must be positive".into()));
        }
        if self.thumbnail_size == 0 {
            return Err(GalleryError::InvalidConfig("thumbnail_size must be at least 1".into()));
        }
        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("image-gallery");
        path.push("config.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GalleryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_images, 147);
        assert_eq!(config.batch_size, 24);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GalleryConfig::from_json(r#"{ "batch_size": 10, "initial_layout": "masonry" }"#)
            .unwrap();

        assert_eq!(config.batch_size, 10);
        assert_eq!(config.initial_layout, LayoutMode::Masonry);
        assert_eq!(config.total_images, 147);
        assert_eq!(config.basename, "zeus");
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let result = GalleryConfig::from_json(r#"{ "batch_size": 0 }"#);
        assert!(matches!(result, Err(GalleryError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = GalleryConfig::from_json("{ not json");
        assert!(matches!(result, Err(GalleryError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "total_images": 12 }"#).unwrap();

        let config = GalleryConfig::from_file(&path).unwrap();
        assert_eq!(config.total_images, 12);

        let missing = GalleryConfig::from_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(GalleryError::Io { .. })));
    }
}
