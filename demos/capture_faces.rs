//! Face Capture Example
//!
//! Detects faces on a single image and prints their position, orientation
//! and landmarks.
//!
//! Usage:
//!   cargo run --example capture_faces -- --conf-dir <conf_dir> --image <path_to_image> [--save <dir>]

use clap::Parser;
use facerec::{Config, FacerecService, ImageFormat, RawImage, RawImageFormat, ServiceConfig};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

/// Command line parameters for the face capture example
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration directory
    #[arg(short, long)]
    conf_dir: String,

    /// Engine library; defaults to FACEREC_LIBRARY or the platform name
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Image to process
    #[arg(short, long)]
    image: String,

    /// Capturer configuration file
    #[arg(long, default_value = "common_capturer_uld_fda.xml")]
    capturer: String,

    /// Minimum face size override
    #[arg(long)]
    min_size: Option<f64>,

    /// Directory where every detected face is saved as a sample file
    #[arg(short, long)]
    save: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ServiceConfig::new(&args.conf_dir);
    if let Some(path) = args.library {
        config = config.with_library(facerec::LibraryConfig::Dynamic { path: Some(path) });
    }
    let service = FacerecService::create_service(config)?;
    println!("facerec {}", service.version()?);

    let mut capturer_config = Config::new(&args.capturer);
    if let Some(min_size) = args.min_size {
        capturer_config = capturer_config.override_parameter("min_size", min_size);
    }
    let capturer = service.create_capturer(&capturer_config)?;

    let img = image::open(&args.image)?.to_rgb8();
    let (width, height) = img.dimensions();
    let pixels = img.into_raw();
    let samples = capturer.capture(&RawImage::new(
        &pixels,
        width as i32,
        height as i32,
        RawImageFormat::Rgb,
    ))?;

    println!("Found {} faces", samples.len());
    for (i, sample) in samples.iter().enumerate() {
        let rect = sample.rectangle()?;
        let angles = sample.angles()?;
        println!(
            "  Face {}: x={}, y={}, w={}, h={}, yaw={:.1}, pitch={:.1}, roll={:.1}, {} landmarks",
            i,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            angles.yaw,
            angles.pitch,
            angles.roll,
            sample.landmarks()?.len()
        );

        if let Some(dir) = &args.save {
            let path = dir.join(format!("face_{i}.bin"));
            sample.save(&mut File::create(&path)?, ImageFormat::Jpg)?;
            println!("    saved to {}", path.display());
        }
    }

    Ok(())
}
