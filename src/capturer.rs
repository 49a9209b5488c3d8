use crate::error::Result;
use crate::exception::call;
use crate::ffi::adapters::assign_pointers_vector;
use crate::ffi::{ExceptionOut, FacerecApi, RawHandle};
use crate::handle::NativeObject;
use crate::raw_sample::{wrap_samples, RawSample};
use crate::types::{CapturerType, RawImage, SampleType};
use std::ffi::{c_void, CString};
use std::sync::Arc;
use tracing::debug;

/// Face detector created with [`crate::FacerecService::create_capturer`].
#[derive(Debug, Clone)]
pub struct Capturer {
    object: Arc<NativeObject>,
}

impl Capturer {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    /// Detects faces in a decoded image.
    pub fn capture(&self, image: &RawImage<'_>) -> Result<Vec<RawSample>> {
        let args = image.to_args()?;
        let api = self.api();
        self.collect(|vector, e| unsafe {
            api.capturer_capture_raw_image_with_crop(
                self.raw(),
                &args,
                vector,
                assign_pointers_vector,
                e,
            )
        })
    }

    /// Detects faces in an encoded image (JPEG, PNG, TIFF or BMP).
    pub fn capture_encoded(&self, data: &[u8]) -> Result<Vec<RawSample>> {
        let api = self.api();
        self.collect(|vector, e| unsafe {
            api.capturer_capture_encoded_image(
                self.raw(),
                data.as_ptr() as *const c_void,
                data.len() as i32,
                vector,
                assign_pointers_vector,
                e,
            )
        })
    }

    fn collect(&self, capture: impl FnOnce(*mut c_void, ExceptionOut)) -> Result<Vec<RawSample>> {
        let mut pointers: Vec<*mut c_void> = Vec::new();
        let vector = &mut pointers as *mut Vec<*mut c_void> as *mut c_void;
        let outcome = call(self.api(), |e| capture(vector, e));
        // Whatever the engine handed over is owned now, even on failure.
        let samples = wrap_samples(self.object.api_arc(), pointers);
        outcome?;
        let samples = samples?;
        debug!("Captured {} faces", samples.len());
        Ok(samples)
    }

    /// Forgets tracking history; use between unrelated image sequences.
    pub fn reset_history(&self) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe { api.capturer_reset_history(self.raw(), e) })
    }

    pub fn capturer_type(&self) -> Result<CapturerType> {
        let api = self.api();
        let value = call(api, |e| unsafe { api.capturer_get_type(self.raw(), e) })?;
        SampleType::from_raw(value)
    }

    /// Changes a detector parameter at runtime.
    pub fn set_parameter(&self, parameter: &str, value: f64) -> Result<()> {
        let name = CString::new(parameter)?;
        let api = self.api();
        call(api, |e| unsafe {
            api.capturer_set_parameter(self.raw(), name.as_ptr(), value, e)
        })
    }
}
