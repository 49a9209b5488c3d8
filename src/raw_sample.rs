//! Captured faces.

use crate::error::{FacerecError, Result};
use crate::exception::call;
use crate::ffi::adapters::{assign_floats_vector, WriteAdapter};
use crate::ffi::{FacerecApi, RawHandle};
use crate::handle::{NativeObject, ObjectKind};
use crate::types::{Angles, ImageFormat, Point, Rectangle, SampleType};
use std::ffi::c_void;
use std::io::Write;
use std::sync::Arc;

/// A face found by a capturer or reported by a video worker.
///
/// Holds the face position, landmarks and orientation, and optionally the
/// source image. Clones share one native sample.
#[derive(Debug, Clone)]
pub struct RawSample {
    object: Arc<NativeObject>,
}

impl RawSample {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    /// Takes ownership of a sample pointer handed out by the engine.
    pub(crate) fn from_raw(api: &Arc<dyn FacerecApi>, raw: RawHandle) -> Result<Self> {
        NativeObject::wrap(api.clone(), raw, ObjectKind::Api("RawSample")).map(Self::new)
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    pub fn rectangle(&self) -> Result<Rectangle> {
        let api = self.api();
        let mut rect = Rectangle::default();
        call(api, |e| unsafe {
            api.raw_sample_get_rectangle(
                self.raw(),
                &mut rect.x,
                &mut rect.y,
                &mut rect.width,
                &mut rect.height,
                e,
            )
        })?;
        Ok(rect)
    }

    /// Facial landmarks; the point set depends on the capturer configuration.
    pub fn landmarks(&self) -> Result<Vec<Point>> {
        let api = self.api();
        let mut coords: Vec<f32> = Vec::new();
        call(api, |e| unsafe {
            api.raw_sample_get_landmarks(
                self.raw(),
                &mut coords as *mut Vec<f32> as *mut c_void,
                assign_floats_vector,
                e,
            )
        })?;
        Ok(coords
            .chunks_exact(3)
            .map(|p| Point {
                x: p[0],
                y: p[1],
                z: p[2],
            })
            .collect())
    }

    pub fn left_eye(&self) -> Result<Point> {
        let api = self.api();
        let mut point = Point::default();
        call(api, |e| unsafe {
            api.raw_sample_get_left_eye(self.raw(), &mut point.x, &mut point.y, e)
        })?;
        Ok(point)
    }

    pub fn right_eye(&self) -> Result<Point> {
        let api = self.api();
        let mut point = Point::default();
        call(api, |e| unsafe {
            api.raw_sample_get_right_eye(self.raw(), &mut point.x, &mut point.y, e)
        })?;
        Ok(point)
    }

    pub fn angles(&self) -> Result<Angles> {
        let api = self.api();
        let mut angles = Angles::default();
        call(api, |e| unsafe {
            api.raw_sample_get_angles(
                self.raw(),
                &mut angles.yaw,
                &mut angles.pitch,
                &mut angles.roll,
                e,
            )
        })?;
        Ok(angles)
    }

    /// Track id for samples from a video worker, `-1` otherwise.
    pub fn id(&self) -> Result<i32> {
        let api = self.api();
        call(api, |e| unsafe { api.raw_sample_get_id(self.raw(), e) })
    }

    pub fn sample_type(&self) -> Result<SampleType> {
        let api = self.api();
        let value = call(api, |e| unsafe { api.raw_sample_get_type(self.raw(), e) })?;
        SampleType::from_raw(value)
    }

    /// Frame the sample was captured from, `-1` for still images.
    pub fn frame_id(&self) -> Result<i32> {
        let api = self.api();
        call(api, |e| unsafe { api.raw_sample_get_frame_id(self.raw(), e) })
    }

    pub fn has_original_image(&self) -> Result<bool> {
        let api = self.api();
        call(api, |e| unsafe { api.raw_sample_has_original_image(self.raw(), e) }).map(|v| v != 0)
    }

    /// Serializes the sample, embedding the face crop encoded as `format`.
    pub fn save(&self, writer: &mut impl Write, format: ImageFormat) -> Result<()> {
        let api = self.api();
        let mut adapter = WriteAdapter::new(writer);
        let stream = adapter.as_stream();
        let result = call(api, |e| unsafe {
            api.raw_sample_save(self.raw(), stream, WriteAdapter::WRITE_FUNC, format as i32, e)
        });
        adapter.finish()?;
        result
    }
}

/// Wraps every pointer of an engine-filled vector.
///
/// All non-null pointers are owned afterwards even when an error is
/// returned, so none of them leak.
pub(crate) fn wrap_samples(
    api: &Arc<dyn FacerecApi>,
    pointers: Vec<*mut c_void>,
) -> Result<Vec<RawSample>> {
    let mut samples = Vec::with_capacity(pointers.len());
    let mut first_error: Option<FacerecError> = None;
    for pointer in pointers {
        match RawSample::from_raw(api, pointer) {
            Ok(sample) => samples.push(sample),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(samples),
    }
}
