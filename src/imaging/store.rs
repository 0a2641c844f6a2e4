//! Image storage trait and shared error type.
//!
//! The [`ImageStore`] trait is the file I/O seam: everything that reads or
//! writes pixels goes through it, so pipeline logic can be tested against an
//! in-memory store.
//!
//! The production implementation is [`FsStore`](super::fs_store::FsStore),
//! backed by the `image` crate.

use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

/// Trait for image storage backends.
pub trait ImageStore {
    /// Load an image as RGB8.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`. A file that exists
    /// but cannot be decoded is an error.
    fn load(&self, path: &Path) -> Result<Option<RgbImage>, StoreError>;

    /// Write an image, choosing the format from the file extension.
    fn save(&self, path: &Path, image: &RgbImage) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store that records every call.
    #[derive(Default)]
    pub struct MockStore {
        pub images: Mutex<HashMap<PathBuf, RgbImage>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        /// When set, every save fails with this message.
        pub fail_saves: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Load(String),
        Save(String),
    }

    impl MockStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(self, path: impl Into<PathBuf>, image: RgbImage) -> Self {
            self.images.lock().unwrap().insert(path.into(), image);
            self
        }

        pub fn failing_saves(mut self, reason: &str) -> Self {
            self.fail_saves = Some(reason.to_string());
            self
        }

        pub fn get(&self, path: &Path) -> Option<RgbImage> {
            self.images.lock().unwrap().get(path).cloned()
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn saves(&self) -> Vec<String> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Save(p) => Some(p),
                    RecordedOp::Load(_) => None,
                })
                .collect()
        }
    }

    impl ImageStore for MockStore {
        fn load(&self, path: &Path) -> Result<Option<RgbImage>, StoreError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Load(path.to_string_lossy().to_string()));
            Ok(self.get(path))
        }

        fn save(&self, path: &Path, image: &RgbImage) -> Result<(), StoreError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Save(path.to_string_lossy().to_string()));
            if let Some(reason) = &self.fail_saves {
                return Err(StoreError::Encode {
                    path: path.to_path_buf(),
                    reason: reason.clone(),
                });
            }
            self.images
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), image.clone());
            Ok(())
        }
    }

    #[test]
    fn mock_load_missing_is_none() {
        let store = MockStore::new();
        assert!(store.load(Path::new("/missing.png")).unwrap().is_none());
        assert_eq!(
            store.get_operations(),
            vec![RecordedOp::Load("/missing.png".to_string())]
        );
    }

    #[test]
    fn mock_save_then_load() {
        let store = MockStore::new();
        let img = RgbImage::new(2, 3);
        store.save(Path::new("/out.png"), &img).unwrap();

        let loaded = store.load(Path::new("/out.png")).unwrap().unwrap();
        assert_eq!(loaded.dimensions(), (2, 3));
        assert_eq!(store.saves(), vec!["/out.png".to_string()]);
    }

    #[test]
    fn mock_failing_save_records_attempt() {
        let store = MockStore::new().failing_saves("disk full");
        let result = store.save(Path::new("/out.png"), &RgbImage::new(1, 1));
        assert!(matches!(result, Err(StoreError::Encode { .. })));
        assert_eq!(store.saves(), vec!["/out.png".to_string()]);
        assert!(store.get(Path::new("/out.png")).is_none());
    }
}
