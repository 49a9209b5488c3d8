//! # facerec
//!
//! Rust bindings for the facerec face recognition engine, a native shared
//! library with a C ABI.
//!
//! The engine is loaded at runtime with the `dynamic` feature (default) or
//! linked at build time with `static-link`. Everything starts from a
//! [`FacerecService`], which creates the other objects:
//!
//! - [`Capturer`]: face detection on still images;
//! - [`Recognizer`]: templates, verification and search;
//! - [`VideoWorker`]: multi-stream tracking and recognition with callbacks;
//! - [`CameraCalibrator`]: camera calibration from pattern images;
//! - [`DynamicTemplateIndex`] and [`ProcessingBlock`]: the context-based API.
//!
//! Native objects are shared by cloning the wrappers and destroyed when the
//! last clone is dropped. Engine exceptions surface as
//! [`FacerecError::Native`] with the engine's code and message.
//!
//! ```no_run
//! use facerec::{Config, FacerecService, RawImage, RawImageFormat, ServiceConfig};
//!
//! let service = FacerecService::create_service(ServiceConfig::new("/opt/face_sdk/conf/facerec"))?;
//! let capturer = service.create_capturer(&Config::new("common_capturer4_fda.xml"))?;
//! let pixels = vec![0u8; 640 * 480 * 3];
//! let samples = capturer.capture(&RawImage::new(&pixels, 640, 480, RawImageFormat::Rgb))?;
//! println!("{} faces", samples.len());
//! # Ok::<(), facerec::FacerecError>(())
//! ```

pub mod backends;
mod calibrator;
mod capturer;
mod config;
mod context;
mod dynamic_index;
mod error;
mod exception;
pub mod ffi;
mod handle;
mod processing_block;
mod raw_sample;
mod recognizer;
mod service;
mod template;
pub mod types;
mod video_worker;

pub use backends::{load_library, load_library_from, LibraryConfig};
pub use calibrator::{CalibrationSettings, CameraCalibrator, PatternDetection, PatternType};
pub use capturer::Capturer;
pub use config::{
    ActiveLivenessCheckType, Config, License, ServiceConfig, VideoWorkerParams, CONF_DIR_ENV,
    LICENSE_DIR_ENV,
};
pub use context::{Context, ContextMut, ContextRef};
pub use dynamic_index::{ContextTemplate, DynamicTemplateIndex};
pub use error::*;
pub use processing_block::ProcessingBlock;
pub use raw_sample::RawSample;
pub use recognizer::Recognizer;
pub use service::FacerecService;
pub use template::{Template, TemplatesIndex};
pub use types::*;
pub use video_worker::{
    CallbackResult, DatabaseElement, MatchFoundCallbackData, SearchResult,
    StiPersonOutdatedCallbackData, TemplateCreatedCallbackData, TrackingCallbackData,
    TrackingLostCallbackData, VideoWorker,
};

#[cfg(test)]
mod testing;
