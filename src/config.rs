//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! reproduce the fixed classroom layout; a `config.toml` in the root
//! directory overrides any subset of them.
//!
//! ## Config File Location
//!
//! ```text
//! <root>/
//! ├── config.toml                     # Optional overrides
//! ├── images/
//! │   ├── google.png                  # Reference image (white = placeholder)
//! │   └── camera_capture.png          # Fallback when no camera frame
//! └── output_images/
//!     └── lecture05_01_k24015.png     # Written by `run` / `compose`
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! images_dir = "images"
//! output_dir = "output_images"
//! reference = "google.png"
//! fallback = "camera_capture.png"
//! output = "lecture05_01_k24015.png"
//!
//! [camera]
//! device_index = 0
//! width = 640
//! height = 480
//! poll_delay_ms = 100
//! quit_key = "q"
//! window_title = "Camera - press q to capture"
//! mirror_preview = true
//!
//! [camera.marker]
//! radius = 30
//! thickness = 3
//! color = [255, 0, 0]       # RGB
//!
//! [compose]
//! sentinel = [255, 255, 255]
//! sample_pixel = [640, 140] # [x, y]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Sentinel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// File layout relative to the root directory.
    pub paths: PathsConfig,
    /// Capture device and preview window settings.
    pub camera: CameraConfig,
    /// Tiling and substitution settings.
    pub compose: ComposeConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("paths.images_dir", &self.paths.images_dir),
            ("paths.output_dir", &self.paths.output_dir),
            ("paths.reference", &self.paths.reference),
            ("paths.fallback", &self.paths.fallback),
            ("paths.output", &self.paths.output),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(ConfigError::Validation(
                "camera.width and camera.height must be non-zero".into(),
            ));
        }
        if self.camera.marker.radius == 0 || self.camera.marker.thickness == 0 {
            return Err(ConfigError::Validation(
                "camera.marker radius and thickness must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// File names and directories, all relative to the root directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the reference and fallback images.
    pub images_dir: String,
    /// Directory the composite is written to.
    pub output_dir: String,
    /// Reference image whose sentinel pixels get replaced.
    pub reference: String,
    /// Used as the patch when no camera frame was captured.
    pub fallback: String,
    /// Output file name; the extension picks the encoder.
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images_dir: "images".to_string(),
            output_dir: "output_images".to_string(),
            reference: "google.png".to_string(),
            fallback: "camera_capture.png".to_string(),
            output: "lecture05_01_k24015.png".to_string(),
        }
    }
}

/// Capture device and preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Index of the capture device (0 = first camera).
    pub device_index: u32,
    /// Requested frame width. The device may pick the nearest it supports.
    pub width: u32,
    /// Requested frame height.
    pub height: u32,
    /// Keyboard poll delay per frame, in milliseconds.
    pub poll_delay_ms: u64,
    /// Key that captures the current frame and ends the preview.
    pub quit_key: char,
    /// Preview window title.
    pub window_title: String,
    /// Mirror the preview horizontally. The captured frame is never mirrored.
    pub mirror_preview: bool,
    /// Center marker drawn on the preview.
    pub marker: MarkerConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            width: 640,
            height: 480,
            poll_delay_ms: 100,
            quit_key: 'q',
            window_title: "Camera - press q to capture".to_string(),
            mirror_preview: true,
            marker: MarkerConfig::default(),
        }
    }
}

/// Hollow circle drawn at the center of the preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    pub radius: u32,
    /// Ring thickness in pixels.
    pub thickness: u32,
    /// RGB color.
    pub color: [u8; 3],
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            radius: 30,
            thickness: 3,
            color: [255, 0, 0],
        }
    }
}

/// Tiling and substitution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Exact RGB value that marks pixels to replace.
    pub sentinel: [u8; 3],
    /// `[x, y]` of a reference pixel printed for inspection.
    pub sample_pixel: [u32; 2],
}

impl ComposeConfig {
    pub fn sentinel(&self) -> Sentinel {
        Sentinel::new(self.sentinel)
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            sentinel: [255, 255, 255],
            sample_pixel: [640, 140],
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the root directory, falling back to
/// stock defaults for everything it doesn't set.
pub fn load_config(root: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# webcam-tile configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
# Place this file in the root directory (see --root).

# ---------------------------------------------------------------------------
# File layout (relative to the root directory)
# ---------------------------------------------------------------------------
[paths]
images_dir = "images"
output_dir = "output_images"

# Reference image. Pixels exactly equal to compose.sentinel are replaced.
reference = "google.png"

# Patch used when the camera produced no frame. `webcam-tile capture`
# writes this file.
fallback = "camera_capture.png"

# Output file, written to output_dir. The extension picks the format.
output = "lecture05_01_k24015.png"

# ---------------------------------------------------------------------------
# Camera preview
# ---------------------------------------------------------------------------
[camera]
device_index = 0

# Requested resolution. The device may choose the nearest it supports.
width = 640
height = 480

# Keyboard poll delay per frame (milliseconds).
poll_delay_ms = 100

# Press this key in the preview window to capture the current frame.
quit_key = "q"

window_title = "Camera - press q to capture"

# Mirror the preview like a selfie camera. The captured frame is unmirrored.
mirror_preview = true

# Hollow circle drawn at the preview center (never on the captured frame).
[camera.marker]
radius = 30
thickness = 3
color = [255, 0, 0]

# ---------------------------------------------------------------------------
# Composition
# ---------------------------------------------------------------------------
[compose]
# Exact RGB value to replace. No tolerance: [254, 255, 255] is kept.
sentinel = [255, 255, 255]

# [x, y] of a reference pixel to print (skipped when outside the image).
sample_pixel = [640, 140]
"##
}
