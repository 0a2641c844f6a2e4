//! # webcam-tile
//!
//! Capture one webcam frame, tile it across a reference image, and paint it
//! into the reference wherever the reference is pure white.
//!
//! # Architecture: Two Stages
//!
//! ```text
//! 1. Capture   camera  →  frame        (live preview, press q to keep a frame)
//! 2. Compose   frame + images/google.png  →  output_images/lecture05_01_k24015.png
//! ```
//!
//! The stages only share an `Option<RgbImage>`. When the camera gives
//! nothing, compose falls back to `images/camera_capture.png`.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`capture`] | Stage 1: [`capture::FrameCapture`] preview loop over device and window traits |
//! | [`compose`] | Stage 2: patch resolution, tiling, substitution, save, progress events |
//! | [`imaging`] | Pure image operations ([`imaging::tile`], [`imaging::substitute`]) and the [`imaging::ImageStore`] seam |
//! | [`config`] | Optional `config.toml` merged over stock defaults |
//! | [`output`] | CLI output formatting for compose, capture and check |
//!
//! # Design Decisions
//!
//! ## Exact Sentinel Matching
//!
//! A pixel is replaced only when it is exactly the sentinel color
//! (default `(255, 255, 255)`). Anti-aliased edges around the white areas of
//! the reference keep their original color. There is no tolerance setting.
//!
//! ## Hardware Behind Traits
//!
//! The camera ([`capture::CaptureDevice`]), the preview window
//! ([`capture::Preview`]) and the filesystem ([`imaging::ImageStore`]) are
//! traits. The capture loop and the compose stage are tested against scripted
//! and in-memory implementations; the real ones (nokhwa, minifb, the `image`
//! crate) are thin.
//!
//! ## `camera` Feature
//!
//! The nokhwa device and minifb window are behind the `camera` cargo
//! feature. Without it the binary still builds and runs everywhere, taking
//! the fallback-image path.
//!
//! ## Save Failures Don't Abort
//!
//! Missing inputs stop the run before anything is written. A failed write
//! of the output is reported and the run still completes.

pub mod capture;
pub mod compose;
pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
