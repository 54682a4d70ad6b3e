/// Thumbnail loader
///
/// Decodes a gallery image from disk and shrinks it to a thumbnail.
/// Every tile gets exactly one of these calls; its result (success or
/// failure) is what completes the tile.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::{GalleryError, Result};

/// A decoded, display-ready thumbnail
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    /// Size of the original image
    pub natural_size: (u32, u32),
    /// Size of the thumbnail behind `handle`
    pub thumbnail_size: (u32, u32),
}

/// Load an image and downsize it so its longest edge is at most `max_edge`
pub async fn load_thumbnail(path: PathBuf, max_edge: u32) -> Result<LoadedImage> {
    // Spawn blocking because decoding is CPU-intensive
    task::spawn_blocking(move || load_thumbnail_blocking(&path, max_edge))
        .await
        .map_err(|e| GalleryError::Join(e.to_string()))?
}

/// Blocking implementation of thumbnail loading
fn load_thumbnail_blocking(path: &Path, max_edge: u32) -> Result<LoadedImage> {
    let bytes = std::fs::read(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&bytes).map_err(|e| GalleryError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let natural_size = (img.width(), img.height());

    // Only shrink, never upscale small images
    let thumb = if img.width() > max_edge || img.height() > max_edge {
        img.resize(max_edge, max_edge, FilterType::Triangle)
    } else {
        img
    };

    let rgba = thumb.to_rgba8();
    let thumbnail_size = rgba.dimensions();

    log::debug!(
        "🖼️  Decoded {} ({}x{} -> {}x{})",
        path.display(),
        natural_size.0,
        natural_size.1,
        thumbnail_size.0,
        thumbnail_size.1
    );

    Ok(LoadedImage {
        handle: Handle::from_rgba(thumbnail_size.0, thumbnail_size.1, rgba.into_raw()),
        natural_size,
        thumbnail_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[tokio::test]
    async fn test_load_thumbnail_downsizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zeus (1).jpg");
        RgbImage::from_pixel(800, 400, Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();

        let loaded = load_thumbnail(path, 200).await.unwrap();

        assert_eq!(loaded.natural_size, (800, 400));
        assert_eq!(loaded.thumbnail_size, (200, 100));
    }

    #[tokio::test]
    async fn test_small_image_not_upscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        RgbImage::new(50, 30).save(&path).unwrap();

        let loaded = load_thumbnail(path, 200).await.unwrap();
        assert_eq!(loaded.thumbnail_size, (50, 30));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_thumbnail(PathBuf::from("/nonexistent/zeus (12).jpg"), 256).await;
        assert!(matches!(result, Err(GalleryError::Io { .. })));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = load_thumbnail(path, 256).await;
        assert!(matches!(result, Err(GalleryError::Decode { .. })));
    }
}
