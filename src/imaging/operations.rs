//! Tiling and sentinel substitution.
//!
//! Both operations are pure: they read their inputs and return new images.
//!
//! ```text
//! patch (pw x ph)         tile()          canvas (W x H)
//! ┌──┐                 ────────────►      ┌──┬──┬─┐
//! └──┘                                    ├──┼──┼─┤   edge tiles cropped
//!                                         └──┴──┴─┘
//!
//! source + canvas      substitute()       output: sentinel pixels taken
//!                      ────────────►      from canvas, the rest from source
//! ```

use super::calculations::TileGrid;
use super::params::{Dimensions, Sentinel};
use image::{RgbImage, imageops};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OperationError {
    #[error("Patch image is empty ({0})")]
    EmptyPatch(Dimensions),
    #[error("Tiled canvas is {tiled}, expected {expected}")]
    DimensionMismatch {
        expected: Dimensions,
        tiled: Dimensions,
    },
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, OperationError>;

/// Output of [`substitute`].
#[derive(Debug, Clone)]
pub struct Substitution {
    pub image: RgbImage,
    /// Number of sentinel pixels that were overwritten.
    pub replaced: u64,
}

/// Repeat `patch` across a zeroed canvas of `target` size.
///
/// Tiles run left-to-right, top-to-bottom starting at the origin. The last
/// column and row are cropped to the canvas, so `canvas[y, x]` always equals
/// `patch[y % ph, x % pw]`.
pub fn tile(patch: &RgbImage, target: Dimensions) -> Result<RgbImage> {
    let patch_dims = Dimensions::of(patch);
    let grid = TileGrid::new(patch_dims, target).ok_or(OperationError::EmptyPatch(patch_dims))?;
    Ok(tile_with_grid(patch, &grid))
}

/// [`tile`] with a precomputed grid.
pub fn tile_with_grid(patch: &RgbImage, grid: &TileGrid) -> RgbImage {
    let mut canvas = RgbImage::new(grid.target.width, grid.target.height);

    for placement in grid.placements() {
        let piece = imageops::crop_imm(patch, 0, 0, placement.width, placement.height).to_image();
        imageops::replace(&mut canvas, &piece, placement.x.into(), placement.y.into());
    }

    canvas
}

/// Copy `source`, taking the `tiled` pixel wherever the source pixel is
/// exactly `sentinel`.
///
/// Near-sentinel pixels (off by one in any channel) are left alone.
pub fn substitute(source: &RgbImage, tiled: &RgbImage, sentinel: Sentinel) -> Result<Substitution> {
    let source_dims = Dimensions::of(source);
    let tiled_dims = Dimensions::of(tiled);
    if source_dims != tiled_dims {
        return Err(OperationError::DimensionMismatch {
            expected: source_dims,
            tiled: tiled_dims,
        });
    }

    let mut image = source.clone();
    let mut replaced = 0;
    for (pixel, fill) in image.pixels_mut().zip(tiled.pixels()) {
        if sentinel.matches(pixel) {
            *pixel = *fill;
            replaced += 1;
        }
    }

    Ok(Substitution { image, replaced })
}
