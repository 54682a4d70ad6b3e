/// Scroll position and gallery geometry
///
/// The loader needs to know whether the user is close to the bottom of
/// the gallery right after a batch is attached, before iced has laid the
/// new tiles out. So the content height is computed here from the same
/// geometry the view uses, instead of waiting for the next scroll report.

use super::data::{LayoutMode, Tile};

/// Gap between tiles, both directions
pub const TILE_SPACING: f32 = 12.0;
/// Padding around the whole gallery
pub const GALLERY_PADDING: f32 = 16.0;

/// Visible window onto the scrollable gallery
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Distance scrolled from the top
    pub offset: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            offset: 0.0,
            width,
            height,
        }
    }

    /// True when the bottom edge of the viewport is within `threshold`
    /// of the end of the content
    pub fn near_bottom(&self, content_height: f32, threshold: f32) -> bool {
        self.offset + self.height >= content_height - threshold
    }
}

/// Number of tile columns that fit in `width`
pub fn column_count(width: f32, tile_size: f32) -> usize {
    let usable = width - 2.0 * GALLERY_PADDING + TILE_SPACING;
    ((usable / (tile_size + TILE_SPACING)).floor() as usize).max(1)
}

/// Shortest-column-first packing for masonry.
/// Returns the tile indices of each column, top to bottom.
pub fn masonry_columns(tiles: &[Tile], columns: usize, tile_size: f32) -> Vec<Vec<usize>> {
    let columns = columns.max(1);
    let mut assigned = vec![Vec::new(); columns];
    let mut heights = vec![0.0f32; columns];

    for (index, tile) in tiles.iter().enumerate() {
        let shortest = heights
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(col, _)| col)
            .unwrap_or(0);

        heights[shortest] += tile_size * tile.aspect_ratio() + TILE_SPACING;
        assigned[shortest].push(index);
    }

    assigned
}

/// Total height of the gallery content for the given layout
pub fn content_height(tiles: &[Tile], mode: LayoutMode, width: f32, tile_size: f32) -> f32 {
    if tiles.is_empty() {
        return 0.0;
    }

    let columns = column_count(width, tile_size);

    let body = match mode {
        LayoutMode::Grid => {
            let rows = tiles.len().div_ceil(columns);
            rows as f32 * tile_size + (rows - 1) as f32 * TILE_SPACING
        }
        LayoutMode::Masonry => masonry_columns(tiles, columns, tile_size)
            .iter()
            .map(|column| {
                let tiles_height: f32 = column
                    .iter()
                    .map(|&i| tile_size * tiles[i].aspect_ratio())
                    .sum();
                tiles_height + column.len().saturating_sub(1) as f32 * TILE_SPACING
            })
            .fold(0.0, f32::max),
    };

    body + 2.0 * GALLERY_PADDING
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::state::catalog;

    fn tiles(n: usize, mode: LayoutMode) -> Vec<Tile> {
        let config = GalleryConfig {
            total_images: n,
            ..GalleryConfig::default()
        };
        catalog::generate(&config)
            .into_iter()
            .map(|d| Tile::new(d, mode))
            .collect()
    }

    #[test]
    fn test_near_bottom() {
        let viewport = Viewport {
            offset: 500.0,
            width: 1000.0,
            height: 800.0,
        };
        // bottom edge at 1300
        assert!(viewport.near_bottom(2300.0, 1000.0));
        assert!(!viewport.near_bottom(2301.0, 1000.0));
        assert!(viewport.near_bottom(0.0, 1000.0));
    }

    #[test]
    fn test_column_count() {
        // 2 * 16 padding, 240 tiles, 12 gap: 3 columns need 32 + 744 = 776
        assert_eq!(column_count(776.0, 240.0), 3);
        assert_eq!(column_count(775.0, 240.0), 2);
        assert_eq!(column_count(10.0, 240.0), 1);
    }

    #[test]
    fn test_grid_height() {
        let tiles = tiles(7, LayoutMode::Grid);
        // 3 columns -> 3 rows
        let height = content_height(&tiles, LayoutMode::Grid, 776.0, 240.0);
        assert_eq!(height, 3.0 * 240.0 + 2.0 * 12.0 + 32.0);
        assert_eq!(content_height(&[], LayoutMode::Grid, 776.0, 240.0), 0.0);
    }

    #[test]
    fn test_masonry_packs_shortest_column() {
        let mut tiles = tiles(3, LayoutMode::Masonry);
        tiles[0].natural_size = Some((100, 300));
        tiles[1].natural_size = Some((100, 100));
        tiles[2].natural_size = Some((100, 100));

        let columns = masonry_columns(&tiles, 2, 100.0);
        assert_eq!(columns, vec![vec![0], vec![1, 2]]);

        let height = content_height(&tiles, LayoutMode::Masonry, 2.0 * 100.0 + 12.0 + 32.0, 100.0);
        assert_eq!(height, 300.0 + 32.0);
    }
}
