//! Compose stage: patch + reference → output image on disk.
//!
//! ## Steps
//!
//! 1. **Patch**: the captured frame, or the fallback image when nothing was
//!    captured. No fallback file is fatal.
//! 2. **Reference**: loaded from the images directory. Missing is fatal.
//! 3. **Tile**: the patch is repeated over a canvas the size of the reference.
//! 4. **Substitute**: reference pixels equal to the sentinel take the canvas
//!    pixel.
//! 5. **Save**: written to the output directory. A failed save is reported
//!    through [`ComposeEvent::SaveFailed`] and does not fail the stage.
//!
//! Progress is reported as [`ComposeEvent`]s through a callback so the CLI
//! can print them as they happen and tests can collect them.

use crate::config::{ComposeConfig, PathsConfig};
use crate::imaging::{
    Dimensions, ImageStore, OperationError, StoreError, Substitution, TileGrid,
    substitute, tile_with_grid,
};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("No camera frame and fallback image not found: {0}")]
    FallbackMissing(PathBuf),
    #[error("Reference image not found: {0}")]
    ReferenceMissing(PathBuf),
    #[error("No image captured")]
    NothingCaptured,
    #[error("Image store error: {0}")]
    Store(#[from] StoreError),
    #[error("Image operation failed: {0}")]
    Operation(#[from] OperationError),
}

/// Resolved input and output locations under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub reference: PathBuf,
    pub fallback: PathBuf,
    pub output: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, paths: &PathsConfig) -> Self {
        let images = root.join(&paths.images_dir);
        Self {
            reference: images.join(&paths.reference),
            fallback: images.join(&paths.fallback),
            output: root.join(&paths.output_dir).join(&paths.output),
        }
    }
}

/// Where the patch image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOrigin {
    Camera,
    Fallback(PathBuf),
    File(PathBuf),
}

/// Progress reported while composing.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeEvent {
    FallbackUsed {
        path: PathBuf,
    },
    ReferenceLoaded {
        dimensions: Dimensions,
        channels: u8,
        /// `(x, y, pixel)` when the configured sample point is inside the image.
        sample: Option<(u32, u32, Rgb<u8>)>,
    },
    PatchReady {
        dimensions: Dimensions,
        origin: PatchOrigin,
    },
    TilingStarted {
        columns: u32,
        rows: u32,
    },
    TilingFinished,
    SubstitutionStarted,
    SubstitutionFinished {
        replaced: u64,
    },
    Saved {
        path: PathBuf,
    },
    SaveFailed {
        path: PathBuf,
        reason: String,
    },
}

/// Summary of a finished compose run.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeReport {
    pub origin: PatchOrigin,
    pub reference: Dimensions,
    pub patch: Dimensions,
    pub grid: TileGrid,
    pub replaced: u64,
    pub output: PathBuf,
    pub saved: bool,
}

/// Pick the patch: the captured frame if there is one, else the fallback file.
pub fn resolve_patch(
    store: &impl ImageStore,
    layout: &Layout,
    captured: Option<RgbImage>,
    on_event: &mut impl FnMut(ComposeEvent),
) -> Result<(RgbImage, PatchOrigin), ComposeError> {
    if let Some(frame) = captured {
        return Ok((frame, PatchOrigin::Camera));
    }

    on_event(ComposeEvent::FallbackUsed {
        path: layout.fallback.clone(),
    });
    let fallback = store
        .load(&layout.fallback)?
        .ok_or_else(|| ComposeError::FallbackMissing(layout.fallback.clone()))?;
    Ok((fallback, PatchOrigin::Fallback(layout.fallback.clone())))
}

/// Run the full compose stage with a captured frame (or `None` to use the
/// fallback image).
pub fn compose_and_save(
    store: &impl ImageStore,
    layout: &Layout,
    config: &ComposeConfig,
    captured: Option<RgbImage>,
    mut on_event: impl FnMut(ComposeEvent),
) -> Result<ComposeReport, ComposeError> {
    let (patch, origin) = resolve_patch(store, layout, captured, &mut on_event)?;
    compose_patch_and_save(store, layout, config, patch, origin, on_event)
}

/// Run the compose stage with an already-resolved patch.
pub fn compose_patch_and_save(
    store: &impl ImageStore,
    layout: &Layout,
    config: &ComposeConfig,
    patch: RgbImage,
    origin: PatchOrigin,
    mut on_event: impl FnMut(ComposeEvent),
) -> Result<ComposeReport, ComposeError> {
    let reference = store
        .load(&layout.reference)?
        .ok_or_else(|| ComposeError::ReferenceMissing(layout.reference.clone()))?;
    let reference_dims = Dimensions::of(&reference);

    let [sample_x, sample_y] = config.sample_pixel;
    let sample = (sample_x < reference_dims.width && sample_y < reference_dims.height)
        .then(|| (sample_x, sample_y, *reference.get_pixel(sample_x, sample_y)));
    on_event(ComposeEvent::ReferenceLoaded {
        dimensions: reference_dims,
        channels: 3,
        sample,
    });

    let patch_dims = Dimensions::of(&patch);
    on_event(ComposeEvent::PatchReady {
        dimensions: patch_dims,
        origin: origin.clone(),
    });

    let grid =
        TileGrid::new(patch_dims, reference_dims).ok_or(OperationError::EmptyPatch(patch_dims))?;
    on_event(ComposeEvent::TilingStarted {
        columns: grid.columns,
        rows: grid.rows,
    });
    let canvas = tile_with_grid(&patch, &grid);
    on_event(ComposeEvent::TilingFinished);

    on_event(ComposeEvent::SubstitutionStarted);
    let Substitution { image, replaced } = substitute(&reference, &canvas, config.sentinel())?;
    on_event(ComposeEvent::SubstitutionFinished { replaced });

    let saved = match store.save(&layout.output, &image) {
        Ok(()) => {
            on_event(ComposeEvent::Saved {
                path: layout.output.clone(),
            });
            true
        }
        Err(e) => {
            on_event(ComposeEvent::SaveFailed {
                path: layout.output.clone(),
                reason: e.to_string(),
            });
            false
        }
    };

    Ok(ComposeReport {
        origin,
        reference: reference_dims,
        patch: patch_dims,
        grid,
        replaced,
        output: layout.output.clone(),
        saved,
    })
}

/// Write a captured frame to `path`, e.g. to serve as the fallback image.
pub fn save_capture(
    store: &impl ImageStore,
    path: &Path,
    captured: Option<&RgbImage>,
) -> Result<Dimensions, ComposeError> {
    let frame = captured.ok_or(ComposeError::NothingCaptured)?;
    store.save(path, frame)?;
    Ok(Dimensions::of(frame))
}
