/// State management module
///
/// This module handles all application state, including:
/// - The image catalog and shuffling (catalog.rs)
/// - Shared data structures (data.rs)
/// - Batched loading, shuffle and layout control (gallery.rs)
/// - Deferred work and its clock (scheduler.rs)
/// - Scroll position and gallery geometry (viewport.rs)
/// - The full-screen preview (preview.rs)

pub mod catalog;
pub mod data;
pub mod gallery;
pub mod preview;
pub mod scheduler;
pub mod viewport;
