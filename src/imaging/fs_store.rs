//! Filesystem image store on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with format guessed from content |
//! | Convert | `DynamicImage::into_rgb8` (alpha dropped) |
//! | Encode | `RgbImage::save` with format from extension |

use super::store::{ImageStore, StoreError};
use image::{ImageFormat, ImageReader, RgbImage};
use std::path::Path;

/// Reads and writes images on the local filesystem.
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore for FsStore {
    fn load(&self, path: &Path) -> Result<Option<RgbImage>, StoreError> {
        if !path.is_file() {
            return Ok(None);
        }
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| StoreError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Some(decoded.into_rgb8()))
    }

    fn save(&self, path: &Path, image: &RgbImage) -> Result<(), StoreError> {
        let format = ImageFormat::from_path(path).map_err(|e| StoreError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        image
            .save_with_format(path, format)
            .map_err(|e| StoreError::Encode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
