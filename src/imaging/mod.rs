//! Image processing: tiling, sentinel substitution and image storage.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Tile layout** | [`TileGrid`] (pure arithmetic) |
//! | **Tile** | `imageops::crop_imm` + `imageops::replace` |
//! | **Substitute** | single pass over zipped pixel iterators |
//! | **Load / save** | `image::ImageReader`, `RgbImage::save_with_format` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for tile layout (unit testable)
//! - **Parameters**: [`Dimensions`] and [`Sentinel`]
//! - **Operations**: [`tile`] and [`substitute`]
//! - **Store**: [`ImageStore`] trait + [`FsStore`]

mod calculations;
pub mod fs_store;
pub mod operations;
mod params;
pub mod store;

pub use calculations::{TileGrid, TilePlacement};
pub use fs_store::FsStore;
pub use operations::{OperationError, Substitution, substitute, tile, tile_with_grid};
pub use params::{Dimensions, Sentinel};
pub use store::{ImageStore, StoreError};
