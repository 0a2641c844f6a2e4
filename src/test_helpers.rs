//! Shared test utilities.
//!
//! Synthetic images plus scripted stand-ins for the camera and preview
//! window, so capture and pipeline logic run without hardware.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let device = ScriptedDevice::new(vec![gradient(4, 3), solid(4, 3, RED)]);
//! let preview = ScriptedPreview::with_keys(vec![None, Some('q')]);
//! ```

use crate::capture::{CaptureDevice, CaptureError, Preview};
use image::{Rgb, RgbImage};
use std::collections::VecDeque;
use std::time::Duration;

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

// =========================================================================
// Synthetic images
// =========================================================================

/// Single-color image.
pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Image where every pixel is distinct for small sizes and none is white.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 17 % 251) as u8, (y * 29 % 251) as u8, 7])
    })
}

// =========================================================================
// Scripted capture collaborators
// =========================================================================

/// Capture device that plays back a fixed list of frames, then fails.
#[derive(Default)]
pub struct ScriptedDevice {
    pub frames: VecDeque<RgbImage>,
    pub configured: Option<(u32, u32)>,
    pub reject_configure: bool,
    pub reads: usize,
    pub released: bool,
}

impl ScriptedDevice {
    pub fn new(frames: Vec<RgbImage>) -> Self {
        Self {
            frames: frames.into(),
            ..Self::default()
        }
    }

    /// A device that never produces a frame.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

impl CaptureDevice for ScriptedDevice {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        if self.reject_configure {
            return Err(CaptureError::Device("resolution not supported".into()));
        }
        self.configured = Some((width, height));
        Ok(())
    }

    fn read_frame(&mut self) -> Option<RgbImage> {
        self.reads += 1;
        self.frames.pop_front()
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Preview that records shown frames and replays scripted key presses.
#[derive(Default)]
pub struct ScriptedPreview {
    pub keys: VecDeque<Option<char>>,
    pub shown: Vec<(String, RgbImage)>,
    pub delays: Vec<Duration>,
    /// Close the window after this many frames have been shown.
    pub close_after: Option<usize>,
    pub fail_show: bool,
    pub closed: bool,
}

impl ScriptedPreview {
    pub fn with_keys(keys: Vec<Option<char>>) -> Self {
        Self {
            keys: keys.into(),
            ..Self::default()
        }
    }
}

impl Preview for ScriptedPreview {
    fn show(&mut self, title: &str, frame: &RgbImage) -> Result<(), CaptureError> {
        if self.fail_show {
            return Err(CaptureError::Preview("no display".into()));
        }
        self.shown.push((title.to_string(), frame.clone()));
        Ok(())
    }

    fn poll_key(&mut self, delay: Duration) -> Option<char> {
        self.delays.push(delay);
        self.keys.pop_front().flatten()
    }

    fn is_open(&self) -> bool {
        self.close_after.is_none_or(|n| self.shown.len() < n)
    }

    fn close_all(&mut self) {
        self.closed = true;
    }
}
