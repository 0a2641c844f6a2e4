//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Compose
//!
//! ```text
//! Fallback: no camera frame, using images/camera_capture.png
//! Reference: 1280x720, 3 channels
//!     Sample pixel (640, 140): RGB(255, 255, 255)
//! Patch: 640x480 (camera)
//! Tiling: 2 x 2 tiles
//!     done
//! Replacing white pixels...
//!     312448 pixels replaced
//! ✓ Saved: output_images/lecture05_01_k24015.png
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     config.toml (stock defaults)
//! Inputs
//!     Reference: images/google.png (found)
//!     Fallback:  images/camera_capture.png (missing)
//! Output
//!     output_images/lecture05_01_k24015.png
//! ```
//!
//! # Architecture
//!
//! Each block has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure, with no I/O. Paths are shown relative to
//! the root directory when possible.

use crate::compose::{ComposeEvent, Layout, PatchOrigin};
use crate::imaging::{Dimensions, Sentinel};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Show `path` relative to `root` when it lives under it.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn sentinel_label(sentinel: Sentinel) -> String {
    if sentinel == Sentinel::default() {
        "white".to_string()
    } else {
        let [r, g, b] = sentinel.0.0;
        format!("RGB({r}, {g}, {b})")
    }
}

// ============================================================================
// Compose
// ============================================================================

/// Format one compose event as output lines.
pub fn format_compose_event(event: &ComposeEvent, root: &Path, sentinel: Sentinel) -> Vec<String> {
    match event {
        ComposeEvent::FallbackUsed { path } => vec![format!(
            "Fallback: no camera frame, using {}",
            display_path(path, root)
        )],
        ComposeEvent::ReferenceLoaded {
            dimensions,
            channels,
            sample,
        } => {
            let mut lines = vec![format!("Reference: {}, {} channels", dimensions, channels)];
            if let Some((x, y, pixel)) = sample {
                let [r, g, b] = pixel.0;
                lines.push(format!(
                    "{}Sample pixel ({}, {}): RGB({}, {}, {})",
                    indent(1),
                    x,
                    y,
                    r,
                    g,
                    b
                ));
            }
            lines
        }
        ComposeEvent::PatchReady { dimensions, origin } => {
            let source = match origin {
                PatchOrigin::Camera => "camera".to_string(),
                PatchOrigin::Fallback(p) | PatchOrigin::File(p) => display_path(p, root),
            };
            vec![format!("Patch: {} ({})", dimensions, source)]
        }
        ComposeEvent::TilingStarted { columns, rows } => {
            vec![format!("Tiling: {} x {} tiles", columns, rows)]
        }
        ComposeEvent::TilingFinished => vec![format!("{}done", indent(1))],
        ComposeEvent::SubstitutionStarted => {
            vec![format!("Replacing {} pixels...", sentinel_label(sentinel))]
        }
        ComposeEvent::SubstitutionFinished { replaced } => {
            vec![format!("{}{} pixels replaced", indent(1), replaced)]
        }
        ComposeEvent::Saved { path } => {
            vec![format!("\u{2713} Saved: {}", display_path(path, root))]
        }
        ComposeEvent::SaveFailed { path, reason } => vec![
            format!("\u{2717} Failed to save: {}", display_path(path, root)),
            format!("{}{}", indent(1), reason),
        ],
    }
}

/// Print a compose event to stdout.
pub fn print_compose_event(event: &ComposeEvent, root: &Path, sentinel: Sentinel) {
    for line in format_compose_event(event, root, sentinel) {
        println!("{}", line);
    }
}

// ============================================================================
// Capture
// ============================================================================

/// Format the result of saving a captured frame.
pub fn format_capture_saved(path: &Path, dimensions: Dimensions, root: &Path) -> Vec<String> {
    vec![format!(
        "\u{2713} Saved capture ({}): {}",
        dimensions,
        display_path(path, root)
    )]
}

pub fn print_capture_saved(path: &Path, dimensions: Dimensions, root: &Path) {
    for line in format_capture_saved(path, dimensions, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the `check` report: config source, inputs, output location.
pub fn format_check_output(layout: &Layout, root: &Path) -> Vec<String> {
    let status = |p: &Path| if p.is_file() { "found" } else { "missing" };
    let config_line = if root.join("config.toml").is_file() {
        "config.toml"
    } else {
        "config.toml (stock defaults)"
    };

    vec![
        "Config".to_string(),
        format!("{}{}", indent(1), config_line),
        "Inputs".to_string(),
        format!(
            "{}Reference: {} ({})",
            indent(1),
            display_path(&layout.reference, root),
            status(&layout.reference)
        ),
        format!(
            "{}Fallback:  {} ({})",
            indent(1),
            display_path(&layout.fallback, root),
            status(&layout.fallback)
        ),
        "Output".to_string(),
        format!("{}{}", indent(1), display_path(&layout.output, root)),
    ]
}

pub fn print_check_output(layout: &Layout, root: &Path) {
    for line in format_check_output(layout, root) {
        println!("{}", line);
    }
}
