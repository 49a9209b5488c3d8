//! Video Tracking Example
//!
//! Feeds a directory of frames (sorted by file name) into a video worker and
//! prints tracking, template and tracking-lost events as they arrive.
//! Optionally matches faces against a database of enrolled images.
//!
//! Usage:
//!   cargo run --example video_tracking -- --conf-dir <conf_dir> --frames <dir> [--enroll <image>...]

use clap::Parser;
use facerec::{
    Config, DatabaseElement, FacerecService, RawImage, RawImageFormat, SearchAccelerationType,
    ServiceConfig, VideoWorkerParams,
};
use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration directory
    #[arg(short, long)]
    conf_dir: String,

    /// Directory with the frames of one video stream
    #[arg(short, long)]
    frames: PathBuf,

    /// Images of people to recognize, one face each
    #[arg(short, long)]
    enroll: Vec<String>,

    #[arg(long, default_value = "video_worker_fdatracker_uld_fda.xml")]
    worker_config: String,

    #[arg(long, default_value = "method12v30_recognizer.xml")]
    method: String,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 40)]
    delay_ms: u64,
}

fn load_rgb(path: &std::path::Path) -> Result<(Vec<u8>, i32, i32), Box<dyn Error>> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    Ok((img.into_raw(), width as i32, height as i32))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let service = FacerecService::create_service(ServiceConfig::new(&args.conf_dir))?;
    let worker = service.create_video_worker(
        &VideoWorkerParams::new(Config::new(&args.worker_config))
            .recognizer_ini_file(&args.method)
            .streams_count(1)
            .processing_threads_count(1)
            .matching_threads_count(1),
    )?;

    if !args.enroll.is_empty() {
        let capturer = service.create_capturer(&Config::new("common_capturer_uld_fda.xml"))?;
        let recognizer = service.create_recognizer(&args.method, true, true, false)?;
        let threshold = recognizer.roc_point_by_far(1e-5)?.distance as f32;
        let mut database = Vec::new();
        for (person, path) in args.enroll.iter().enumerate() {
            let (pixels, width, height) = load_rgb(path.as_ref())?;
            let samples =
                capturer.capture(&RawImage::new(&pixels, width, height, RawImageFormat::Rgb))?;
            let Some(sample) = samples.first() else {
                eprintln!("No face on {}, skipped", path);
                continue;
            };
            database.push(DatabaseElement {
                element_id: database.len() as u64,
                person_id: person as u64,
                templ: recognizer.processing(sample)?,
                distance_threshold: threshold,
            });
        }
        println!("Enrolled {} people", database.len());
        worker.set_database(&database, SearchAccelerationType::SearchAcceleration1)?;
    }

    worker.add_tracking_callback_u(|data| {
        if !data.samples.is_empty() {
            println!(
                "frame {}: tracks {:?}, quality {:?}",
                data.frame_id, data.samples_track_id, data.samples_quality
            );
        }
        Ok(())
    })?;
    worker.add_template_created_callback_u(|data| {
        println!(
            "frame {}: template for track {} (quality {:.2})",
            data.frame_id,
            data.sample.id()?,
            data.quality
        );
        Ok(())
    })?;
    worker.add_match_found_callback_u(|data| {
        if let Some(best) = data.search_results.first() {
            if best.person_id == facerec::MATCH_NOT_FOUND_ID {
                println!("frame {}: unknown person", data.frame_id);
            } else {
                println!(
                    "frame {}: person {} (distance {:.3})",
                    data.frame_id, best.person_id, best.match_result.distance
                );
            }
        }
        Ok(())
    })?;
    worker.add_tracking_lost_callback_u(|data| {
        println!(
            "track {} lost, frames {}..={}, best quality {:.2} on frame {}",
            data.track_id,
            data.first_frame_id,
            data.last_frame_id,
            data.best_quality,
            data.best_quality_frame_id
        );
        Ok(())
    })?;

    let mut frames: Vec<PathBuf> = std::fs::read_dir(&args.frames)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    frames.sort();

    for path in &frames {
        let (pixels, width, height) = load_rgb(path)?;
        worker.add_video_frame(
            &RawImage::new(&pixels, width, height, RawImageFormat::Rgb),
            0,
            None,
        )?;
        worker.check_exceptions()?;
        thread::sleep(Duration::from_millis(args.delay_ms));
    }

    // Ends every track so tracking-lost events are delivered.
    worker.reset_tracker_on_stream(0)?;
    thread::sleep(Duration::from_millis(500));
    worker.check_exceptions()?;

    Ok(())
}
