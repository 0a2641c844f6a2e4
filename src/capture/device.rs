//! Camera device on nokhwa.
//!
//! The stream is opened lazily on the first read so that `configure` can
//! still change the resolution.

use super::{CaptureDevice, CaptureError};
use image::RgbImage;
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution};

pub struct NokhwaDevice {
    camera: Camera,
    index: u32,
}

impl NokhwaDevice {
    /// Open the camera at `index` (0 = first camera).
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| CaptureError::Device(format!("Failed to open camera {index}: {e}")))?;
        Ok(Self { camera, index })
    }

    fn ensure_stream(&mut self) -> Result<(), CaptureError> {
        if self.camera.is_stream_open() {
            return Ok(());
        }
        self.camera
            .open_stream()
            .map_err(|e| CaptureError::Device(format!("Failed to open stream: {e}")))?;
        let resolution = self.camera.resolution();
        eprintln!(
            "[camera] Opened {} ({}x{})",
            self.camera.info().human_name(),
            resolution.width(),
            resolution.height()
        );
        Ok(())
    }

    fn grab(&mut self) -> Result<RgbImage, CaptureError> {
        self.ensure_stream()?;
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::Device(format!("Frame capture failed: {e}")))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Device(format!("Frame decode failed: {e}")))?;
        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
            CaptureError::Device(format!("Decoded frame is not {width}x{height} RGB"))
        })
    }
}

impl CaptureDevice for NokhwaDevice {
    fn configure(&mut self, width: u32, height: u32) -> Result<(), CaptureError> {
        self.camera
            .set_resolution(Resolution::new(width, height))
            .map_err(|e| CaptureError::Device(e.to_string()))
    }

    fn read_frame(&mut self) -> Option<RgbImage> {
        match self.grab() {
            Ok(frame) => Some(frame),
            Err(e) => {
                eprintln!("[camera] Device {}: {}", self.index, e);
                None
            }
        }
    }

    fn release(&mut self) {
        if self.camera.is_stream_open() {
            if let Err(e) = self.camera.stop_stream() {
                eprintln!("[camera] Failed to stop stream: {}", e);
            }
        }
    }
}

impl Drop for NokhwaDevice {
    fn drop(&mut self) {
        self.release();
    }
}
