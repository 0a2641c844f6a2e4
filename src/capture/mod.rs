//! Live camera preview with single-frame capture.
//!
//! [`FrameCapture`] drives a [`CaptureDevice`] and a [`Preview`] surface:
//!
//! ```text
//! loop:
//!   frame = device.read_frame()      ── None → stop, nothing captured
//!   preview.show(marker + mirror of frame)
//!   key = preview.poll_key(delay)    ── quit key → keep frame, stop
//!                                    ── window closed → stop, nothing captured
//! finally: device.release(); preview.close_all()
//! ```
//!
//! Both collaborators are traits so the loop runs under test with scripted
//! doubles. The hardware implementations (`NokhwaDevice`, `PreviewWindow`)
//! are compiled with the `camera` feature.

pub mod overlay;

#[cfg(feature = "camera")]
mod device;
#[cfg(feature = "camera")]
mod window;

#[cfg(feature = "camera")]
pub use device::NokhwaDevice;
#[cfg(feature = "camera")]
pub use window::PreviewWindow;

use crate::config::CameraConfig;
use image::RgbImage;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Camera error: {0}")]
    Device(String),
    #[error("Preview window error: {0}")]
    Preview(String),
}

/// A source of video frames.
///
/// Opening is left to the implementation's constructor.
pub trait CaptureDevice {
    /// Request a frame size. Devices may settle on a nearby supported size.
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CaptureError>;

    /// Grab the next frame, or `None` when the device can't produce one.
    fn read_frame(&mut self) -> Option<RgbImage>;

    /// Stop streaming and free the device. Must be safe to call twice.
    fn release(&mut self);
}

/// A window that shows frames and reports key presses.
pub trait Preview {
    fn show(&mut self, title: &str, frame: &RgbImage) -> Result<(), CaptureError>;

    /// Wait up to `delay` and return the key pressed in that time, if any.
    fn poll_key(&mut self, delay: Duration) -> Option<char>;

    /// False once the user has closed the window.
    fn is_open(&self) -> bool {
        true
    }

    fn close_all(&mut self);
}

/// Longest wait between two window updates inside [`Preview::poll_key`].
pub const KEY_POLL_SLICE: Duration = Duration::from_millis(10);

/// Spend `delay` in waits of at most `slice`, calling `step` with each wait
/// until it reports a key.
///
/// Window toolkits only register key events while pumping their event
/// queue, so one long sleep followed by a single poll loses most presses.
/// `step` always runs at least once, even for a zero delay.
pub fn poll_in_slices(
    delay: Duration,
    slice: Duration,
    mut step: impl FnMut(Duration) -> Option<char>,
) -> Option<char> {
    let slice = slice.max(Duration::from_millis(1));
    let mut remaining = delay;
    loop {
        let wait = remaining.min(slice);
        if let Some(key) = step(wait) {
            return Some(key);
        }
        remaining -= wait;
        if remaining.is_zero() {
            return None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Capturing,
    Stopped,
}

/// Shows a live feed until the quit key, keeping the frame on screen at
/// that moment.
pub struct FrameCapture<D: CaptureDevice, P: Preview> {
    device: D,
    preview: P,
    settings: CameraConfig,
    state: CaptureState,
    captured: Option<RgbImage>,
}

impl<D: CaptureDevice, P: Preview> FrameCapture<D, P> {
    /// Take ownership of an opened device and request the configured size.
    ///
    /// A device that refuses the size keeps its own; that only warns.
    pub fn new(mut device: D, preview: P, settings: CameraConfig) -> Self {
        if let Err(e) = device.configure(settings.width, settings.height) {
            eprintln!(
                "[camera] Could not set {}x{}: {}",
                settings.width, settings.height, e
            );
        }
        Self {
            device,
            preview,
            settings,
            state: CaptureState::Capturing,
            captured: None,
        }
    }

    /// Run the preview loop until the quit key, a failed read, or a closed
    /// window. Releases the device and closes the preview on every exit.
    ///
    /// Calling `run` again after it has stopped does nothing.
    pub fn run(&mut self) {
        if self.state == CaptureState::Stopped {
            return;
        }

        self.captured = self.preview_until_quit();

        self.device.release();
        self.preview.close_all();
        self.state = CaptureState::Stopped;
    }

    fn preview_until_quit(&mut self) -> Option<RgbImage> {
        let delay = Duration::from_millis(self.settings.poll_delay_ms);

        loop {
            let frame = self.device.read_frame()?;

            let shown = overlay::preview_frame(
                &frame,
                &self.settings.marker,
                self.settings.mirror_preview,
            );
            if let Err(e) = self.preview.show(&self.settings.window_title, &shown) {
                eprintln!("[camera] {}", e);
                return None;
            }

            if self.preview.poll_key(delay) == Some(self.settings.quit_key) {
                return Some(frame);
            }
            if !self.preview.is_open() {
                return None;
            }
        }
    }

    /// The frame kept when the quit key was pressed.
    pub fn get_img(&self) -> Option<&RgbImage> {
        self.captured.as_ref()
    }

    /// Consume the capture, yielding the kept frame.
    pub fn into_img(self) -> Option<RgbImage> {
        self.captured
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }
}
