//! Camera calibration from pattern images.

use crate::error::Result;
use crate::exception::call;
use crate::ffi::adapters::{ReadAdapter, WriteAdapter};
use crate::ffi::{FacerecApi, RawCalibrationArgs, RawHandle};
use crate::handle::NativeObject;
use crate::types::{Point, RawImage};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::ptr;
use std::sync::Arc;
use tracing::debug;

/// Calibration target printed and shown to the camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternType {
    #[default]
    Chessboard = 0,
    CirclesGrid = 1,
    AsymmetricCirclesGrid = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationSettings {
    pub image_width: i32,
    pub image_height: i32,
    pub pattern_type: PatternType,
    /// Inner corners (or circles) per row
    pub pattern_width: i32,
    /// Inner corners (or circles) per column
    pub pattern_height: i32,
    pub fix_aspect_ratio: bool,
    pub calib_zero_tangent_dist: bool,
    pub calib_fix_principal_point: bool,
    pub rational_distortion_model: bool,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            image_width: 0,
            image_height: 0,
            pattern_type: PatternType::Chessboard,
            pattern_width: 9,
            pattern_height: 6,
            fix_aspect_ratio: false,
            calib_zero_tangent_dist: false,
            calib_fix_principal_point: false,
            rational_distortion_model: true,
        }
    }
}

/// Outcome of [`CameraCalibrator::add_image`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternDetection {
    pub found: bool,
    /// Whether the image was kept for calibration
    pub accepted: bool,
    /// Detected pattern points, row by row; empty before `init_calibration`
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, Default)]
struct PatternSize {
    width: i32,
    height: i32,
}

impl PatternSize {
    fn points(&self) -> usize {
        if self.width > 0 && self.height > 0 {
            (self.width * self.height) as usize
        } else {
            0
        }
    }
}

fn to_points(coords: &[f32]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|p| Point {
            x: p[0],
            y: p[1],
            z: 0.0,
        })
        .collect()
}

/// Estimates camera intrinsics from a series of pattern images.
#[derive(Debug, Clone)]
pub struct CameraCalibrator {
    object: Arc<NativeObject>,
    pattern: Arc<Mutex<PatternSize>>,
}

impl CameraCalibrator {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self {
            object,
            pattern: Arc::new(Mutex::new(PatternSize::default())),
        }
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    /// Starts a new calibration, discarding previously added images.
    pub fn init_calibration(&self, settings: &CalibrationSettings) -> Result<()> {
        *self.pattern.lock() = PatternSize::default();
        let args = RawCalibrationArgs {
            image_width: settings.image_width,
            image_height: settings.image_height,
            pattern_type: settings.pattern_type as i32,
            pattern_width: settings.pattern_width,
            pattern_height: settings.pattern_height,
            fix_aspect_ratio: settings.fix_aspect_ratio as i32,
            calib_zero_tangent_dist: settings.calib_zero_tangent_dist as i32,
            calib_fix_principal_point: settings.calib_fix_principal_point as i32,
            rational_distortion_model: settings.rational_distortion_model as i32,
        };
        let api = self.api();
        call(api, |e| unsafe { api.camera_calibrator_init_calibration(self.raw(), &args, e) })?;
        *self.pattern.lock() = PatternSize {
            width: settings.pattern_width,
            height: settings.pattern_height,
        };
        debug!(
            "Calibration initialized for {}x{} pattern",
            settings.pattern_width, settings.pattern_height
        );
        Ok(())
    }

    /// Looks for the pattern in `image` and keeps the image if it adds coverage.
    pub fn add_image(&self, image: &RawImage<'_>) -> Result<PatternDetection> {
        let args = image.to_args()?;
        let count = self.pattern.lock().points();
        let mut coords = vec![0f32; count * 2];
        let out = if coords.is_empty() { ptr::null_mut() } else { coords.as_mut_ptr() };
        let mut found = 0i32;
        let mut accepted = 0i32;
        let api = self.api();
        call(api, |e| unsafe {
            api.camera_calibrator_add_image_with_crop(
                self.raw(),
                &args,
                &mut found,
                &mut accepted,
                out,
                e,
            )
        })?;
        Ok(PatternDetection {
            found: found != 0,
            accepted: accepted != 0,
            points: to_points(&coords),
        })
    }

    /// Fraction in `[0, 1]` of the image area covered by accepted patterns.
    pub fn pattern_space_cover_progress(&self) -> Result<f32> {
        let api = self.api();
        call(api, |e| unsafe {
            api.camera_calibrator_get_pattern_space_cover_progress(self.raw(), e)
        })
    }

    /// Suggested pattern position for the next image, if the engine has one.
    pub fn tip(&self) -> Result<Option<Vec<Point>>> {
        let count = self.pattern.lock().points();
        let mut coords = vec![0f32; count * 2];
        let out = if coords.is_empty() { ptr::null_mut() } else { coords.as_mut_ptr() };
        let api = self.api();
        let ready = call(api, |e| unsafe { api.camera_calibrator_get_tip(self.raw(), out, e) })?;
        Ok((ready != 0).then(|| to_points(&coords)))
    }

    /// Runs the calibration on up to `max_used_patterns_count` images.
    ///
    /// Returns the reprojection error, or `None` if the engine could not
    /// calibrate with the images collected so far.
    pub fn calibrate(&self, max_used_patterns_count: i32) -> Result<Option<f32>> {
        let api = self.api();
        let error = call(api, |e| unsafe {
            api.camera_calibrator_calibrate(self.raw(), max_used_patterns_count, e)
        })?;
        Ok((error >= -0.1).then_some(error))
    }

    pub fn save_camera_parameters(&self, writer: &mut impl Write) -> Result<()> {
        let api = self.api();
        let mut adapter = WriteAdapter::new(writer);
        let stream = adapter.as_stream();
        let result = call(api, |e| unsafe {
            api.camera_calibrator_save_camera_parameters(
                self.raw(),
                stream,
                WriteAdapter::WRITE_FUNC,
                e,
            )
        });
        adapter.finish()?;
        result
    }

    pub fn load_camera_parameters(&self, reader: &mut impl Read) -> Result<()> {
        let api = self.api();
        let mut adapter = ReadAdapter::new(reader);
        let stream = adapter.as_stream();
        let result = call(api, |e| unsafe {
            api.camera_calibrator_load_camera_parameters(
                self.raw(),
                stream,
                ReadAdapter::READ_FUNC,
                e,
            )
        });
        adapter.finish()?;
        result
    }
}
