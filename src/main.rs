use clap::{Parser, Subcommand};
use image::RgbImage;
use std::path::{Path, PathBuf};
use webcam_tile::compose::{self, ComposeEvent, ComposeReport, Layout, PatchOrigin};
use webcam_tile::config::{self, AppConfig, CameraConfig};
use webcam_tile::imaging::{FsStore, ImageStore};
use webcam_tile::output;

#[derive(Parser)]
#[command(name = "webcam-tile")]
#[command(about = "Tile a webcam frame into the white areas of an image")]
#[command(long_about = "\
Tile a webcam frame into the white areas of an image

Opens a live camera preview. Press q to keep the current frame; the frame
is then repeated across the reference image and every pure-white pixel of
the reference takes the tiled pixel underneath it.

Layout (relative to --root):

  images/
  ├── google.png               # Reference image (white = placeholder)
  └── camera_capture.png       # Fallback patch when no frame is captured
  output_images/
  └── lecture05_01_k24015.png  # Result
  config.toml                  # Optional overrides

Run 'webcam-tile gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Root directory the image layout is resolved against
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture a frame, then compose and save the result
    Run {
        /// Skip the camera and use the fallback image
        #[arg(long)]
        no_camera: bool,
    },
    /// Compose with a patch image from disk instead of the camera
    Compose {
        /// Image to tile
        #[arg(long)]
        patch: PathBuf,
    },
    /// Capture a frame and save it (defaults to the fallback image path)
    Capture {
        /// Where to write the frame
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate config and show the resolved file layout
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let root = cli.root.as_path();
    let store = FsStore::new();

    match cli.command {
        Command::Run { no_camera } => {
            let (config, layout) = load(root)?;
            let captured = if no_camera {
                None
            } else {
                println!(
                    "==> Capture: press '{}' in the preview window to keep a frame",
                    config.camera.quit_key
                );
                capture_frame(&config.camera)
            };

            println!("==> Compose");
            let sentinel = config.compose.sentinel();
            let report = compose::compose_and_save(
                &store,
                &layout,
                &config.compose,
                captured,
                |event: ComposeEvent| output::print_compose_event(&event, root, sentinel),
            )?;
            print_summary(&report);
        }
        Command::Compose { patch } => {
            let (config, layout) = load(root)?;
            let image = store
                .load(&patch)?
                .ok_or_else(|| format!("Patch image not found: {}", patch.display()))?;

            println!("==> Compose");
            let sentinel = config.compose.sentinel();
            let report = compose::compose_patch_and_save(
                &store,
                &layout,
                &config.compose,
                image,
                PatchOrigin::File(patch),
                |event: ComposeEvent| output::print_compose_event(&event, root, sentinel),
            )?;
            print_summary(&report);
        }
        Command::Capture { output: target } => {
            let (config, layout) = load(root)?;
            let path = target.unwrap_or(layout.fallback);

            println!(
                "==> Capture: press '{}' in the preview window to keep a frame",
                config.camera.quit_key
            );
            let captured = capture_frame(&config.camera);
            let dimensions = compose::save_capture(&store, &path, captured.as_ref())?;
            output::print_capture_saved(&path, dimensions, root);
        }
        Command::Check => {
            println!("==> Checking {}", root.display());
            let (_, layout) = load(root)?;
            output::print_check_output(&layout, root);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config from the root directory and resolve the file layout.
fn load(root: &Path) -> Result<(AppConfig, Layout), config::ConfigError> {
    let config = config::load_config(root)?;
    let layout = Layout::new(root, &config.paths);
    Ok((config, layout))
}

fn print_summary(report: &ComposeReport) {
    if report.saved {
        println!("==> Compose complete: {}", report.output.display());
    } else {
        println!("==> Compose finished without saving");
    }
}

/// Run the live preview and return the kept frame, if any.
#[cfg(feature = "camera")]
fn capture_frame(settings: &CameraConfig) -> Option<RgbImage> {
    use webcam_tile::capture::{FrameCapture, NokhwaDevice, PreviewWindow};

    let device = match NokhwaDevice::open(settings.device_index) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("[camera] {}", e);
            return None;
        }
    };
    let mut capture = FrameCapture::new(device, PreviewWindow::new(), settings.clone());
    capture.run();
    capture.into_img()
}

#[cfg(not(feature = "camera"))]
fn capture_frame(_settings: &CameraConfig) -> Option<RgbImage> {
    eprintln!("[camera] Built without the `camera` feature, no frame captured");
    None
}
