/// Image decoding module
///
/// This module handles:
/// - Decoding gallery images off the UI thread
/// - Downsizing them to thumbnails for the grid
/// - The placeholder shown for images that fail to load

pub mod loader;
pub mod placeholder;

pub use loader::{load_thumbnail, LoadedImage};
