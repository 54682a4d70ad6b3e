/// UI components
///
/// - `toolbar.rs` - title, counter, loading indicator and controls
/// - `grid.rs` - the scrollable gallery in grid or masonry layout
/// - `preview.rs` - the full-screen preview overlay

pub mod grid;
pub mod preview;
pub mod toolbar;
