//! Face Verification Example
//!
//! Compares the largest face of two images and reports whether they belong
//! to the same person.
//!
//! Usage:
//!   cargo run --example verify_faces -- --conf-dir <conf_dir> --first <image> --second <image>

use clap::Parser;
use facerec::{
    Capturer, Config, FacerecService, RawImage, RawImageFormat, RawSample, ServiceConfig,
};
use std::error::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration directory
    #[arg(short, long)]
    conf_dir: String,

    #[arg(long)]
    first: String,

    #[arg(long)]
    second: String,

    /// Recognition method configuration file
    #[arg(long, default_value = "method12v30_recognizer.xml")]
    method: String,

    /// Acceptable false acceptance rate
    #[arg(long, default_value_t = 1e-5)]
    far: f64,
}

fn largest_face(capturer: &Capturer, path: &str) -> Result<RawSample, Box<dyn Error>> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    let pixels = img.into_raw();
    let samples = capturer.capture(&RawImage::new(
        &pixels,
        width as i32,
        height as i32,
        RawImageFormat::Rgb,
    ))?;

    let mut best: Option<(i64, RawSample)> = None;
    for sample in samples {
        let rect = sample.rectangle()?;
        let area = rect.width as i64 * rect.height as i64;
        if best.as_ref().map_or(true, |(a, _)| area > *a) {
            best = Some((area, sample));
        }
    }
    best.map(|(_, sample)| sample)
        .ok_or_else(|| format!("no face found on {path}").into())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let service = FacerecService::create_service(ServiceConfig::new(&args.conf_dir))?;
    let capturer = service.create_capturer(&Config::new("common_capturer_uld_fda.xml"))?;
    let recognizer = service.create_recognizer(&args.method, true, true, false)?;

    let first = recognizer.processing(&largest_face(&capturer, &args.first)?)?;
    let second = recognizer.processing(&largest_face(&capturer, &args.second)?)?;

    let result = recognizer.verify_match(&first, &second)?;
    let threshold = recognizer.roc_point_by_far(args.far)?;

    println!(
        "distance={:.4}, score={:.4}, far={:e}, frr={:.4}",
        result.distance, result.score, result.fa_r, result.fr_r
    );
    if result.distance <= threshold.distance {
        println!("Same person (threshold {:.4} at FAR {:e})", threshold.distance, args.far);
    } else {
        println!("Different people (threshold {:.4} at FAR {:e})", threshold.distance, args.far);
    }

    Ok(())
}
