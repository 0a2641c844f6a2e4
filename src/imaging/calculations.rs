//! Pure calculation functions for tile layout.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::Dimensions;

/// Where one copy of the patch lands on the canvas.
///
/// `width` and `height` are the copied extent: the full patch for interior
/// tiles, less for tiles cropped at the right or bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Layout of a patch repeated across a target area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub patch: Dimensions,
    pub target: Dimensions,
    /// Tiles per row: `ceil(target.width / patch.width)`.
    pub columns: u32,
    /// Tiles per column: `ceil(target.height / patch.height)`.
    pub rows: u32,
}

impl TileGrid {
    /// Compute the grid for `patch` over `target`.
    ///
    /// Returns `None` when the patch has no pixels, since no number of
    /// copies can cover the target.
    ///
    /// # Examples
    /// ```
    /// # use webcam_tile::imaging::{Dimensions, TileGrid};
    /// // 640x480 frame over a 1280x720 reference → 2 x 2 tiles
    /// let grid = TileGrid::new(Dimensions::new(640, 480), Dimensions::new(1280, 720)).unwrap();
    /// assert_eq!((grid.columns, grid.rows), (2, 2));
    /// ```
    pub fn new(patch: Dimensions, target: Dimensions) -> Option<Self> {
        if patch.is_empty() {
            return None;
        }
        Some(Self {
            patch,
            target,
            columns: target.width.div_ceil(patch.width),
            rows: target.height.div_ceil(patch.height),
        })
    }

    /// Iterate placements left-to-right, top-to-bottom.
    pub fn placements(&self) -> impl Iterator<Item = TilePlacement> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| {
                let x = col * self.patch.width;
                let y = row * self.patch.height;
                TilePlacement {
                    x,
                    y,
                    width: clipped_extent(x, self.patch.width, self.target.width),
                    height: clipped_extent(y, self.patch.height, self.target.height),
                }
            })
        })
    }
}

/// Length of a span starting at `start` with length `len`, clipped to `limit`.
fn clipped_extent(start: u32, len: u32, limit: u32) -> u32 {
    (start + len).min(limit) - start
}
