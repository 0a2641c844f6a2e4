//! Parameter types for image operations.
//!
//! - [`Dimensions`]: width × height in pixels.
//! - [`Sentinel`]: the exact color that marks pixels to be replaced.

use image::{GenericImageView, Rgb};

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of any image view.
    pub fn of<I: GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Placeholder color. A pixel is replaced only when all three channels
/// match exactly; there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel(pub Rgb<u8>);

impl Sentinel {
    pub fn new(channels: [u8; 3]) -> Self {
        Self(Rgb(channels))
    }

    pub fn matches(self, pixel: &Rgb<u8>) -> bool {
        *pixel == self.0
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new([255, 255, 255])
    }
}
