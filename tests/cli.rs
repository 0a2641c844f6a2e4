//! CLI contract tests: run the built binary against a temp root.

use image::{Rgb, RgbImage};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn webcam_tile(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_webcam-tile"))
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("run webcam-tile")
}

fn write_png(path: &Path, image: &RgbImage) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image.save(path).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let tmp = TempDir::new().unwrap();
    let output = webcam_tile(tmp.path(), &["help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    for cmd in ["run", "compose", "capture", "check", "gen-config"] {
        assert!(text.contains(cmd), "missing {cmd} in help output");
    }
}

#[test]
fn gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();
    let output = webcam_tile(tmp.path(), &["gen-config"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[paths]"));
    assert!(text.contains("sentinel = [255, 255, 255]"));
}

#[test]
fn run_without_camera_uses_fallback() {
    let tmp = TempDir::new().unwrap();
    write_png(
        &tmp.path().join("images/google.png"),
        &RgbImage::from_pixel(6, 4, Rgb([255, 255, 255])),
    );
    write_png(
        &tmp.path().join("images/camera_capture.png"),
        &RgbImage::from_pixel(2, 2, Rgb([200, 10, 10])),
    );

    let output = webcam_tile(tmp.path(), &["run", "--no-camera"]);

    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    assert!(text.contains("Fallback: no camera frame, using images/camera_capture.png"));
    assert!(text.contains("Tiling: 3 x 2 tiles"));
    assert!(text.contains("24 pixels replaced"));

    let result = image::open(tmp.path().join("output_images/lecture05_01_k24015.png"))
        .unwrap()
        .into_rgb8();
    assert!(result.pixels().all(|p| *p == Rgb([200, 10, 10])));
}

#[test]
fn run_without_any_patch_fails() {
    let tmp = TempDir::new().unwrap();
    write_png(
        &tmp.path().join("images/google.png"),
        &RgbImage::from_pixel(6, 4, Rgb([255, 255, 255])),
    );

    let output = webcam_tile(tmp.path(), &["run", "--no-camera"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("Error: No camera frame and fallback image not found:"),
        "unexpected stderr: {stderr}"
    );
    assert!(!tmp.path().join("output_images").exists());
}

#[test]
fn compose_without_reference_reports_message() {
    let tmp = TempDir::new().unwrap();
    let patch = tmp.path().join("tile.png");
    write_png(&patch, &RgbImage::from_pixel(1, 1, Rgb([0, 128, 0])));

    let output = webcam_tile(tmp.path(), &["compose", "--patch", patch.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Reference image not found:"),
        "unexpected stderr: {stderr}"
    );
    assert!(!stderr.contains("ReferenceMissing"));
}

#[test]
fn compose_with_patch_file() {
    let tmp = TempDir::new().unwrap();
    write_png(
        &tmp.path().join("images/google.png"),
        &RgbImage::from_pixel(3, 3, Rgb([255, 255, 255])),
    );
    let patch = tmp.path().join("tile.png");
    write_png(&patch, &RgbImage::from_pixel(1, 1, Rgb([0, 128, 0])));

    let output = webcam_tile(tmp.path(), &["compose", "--patch", patch.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Patch: 1x1 (tile.png)"));
    assert!(tmp.path().join("output_images/lecture05_01_k24015.png").is_file());
}

#[test]
fn check_reports_layout() {
    let tmp = TempDir::new().unwrap();
    let output = webcam_tile(tmp.path(), &["check"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Reference: images/google.png (missing)"));
    assert!(text.contains("==> Config is valid"));
}

#[test]
fn check_rejects_bad_config() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.toml"), "[camera]\nzoom = 2\n").unwrap();

    let output = webcam_tile(tmp.path(), &["check"]);

    assert!(!output.status.success());
}
