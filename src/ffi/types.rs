//! C ABI types shared by every backend.
//!
//! These mirror the engine's exported signatures. Opaque engine objects are
//! plain `*mut c_void`; their layout is never inspected on the Rust side.

use std::ffi::{c_char, c_void};

/// Opaque pointer to an engine-owned object.
pub type RawHandle = *mut c_void;

/// Out-parameter receiving an engine exception handle, null on success.
pub type ExceptionOut = *mut *mut c_void;

pub type BinaryStreamWriteFunc =
    unsafe extern "C" fn(stream: *mut c_void, data: *const c_void, bytes_count: u64);

pub type BinaryStreamReadFunc =
    unsafe extern "C" fn(stream: *mut c_void, data: *mut c_void, bytes_count: u64);

pub type AssignFloatsVectorFunc =
    unsafe extern "C" fn(floats_vector: *mut c_void, elements: *const f32, elements_count: i32);

pub type AssignPointersVectorFunc = unsafe extern "C" fn(
    pointers_vector: *mut c_void,
    elements: *const *mut c_void,
    elements_count: i32,
);

/// Trampoline shape shared by tracking, template-created and tracking-lost events.
pub type VideoWorkerCallbackFunc = unsafe extern "C" fn(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
    u_callbacks_count: i32,
    u_callbacks_func: *const *mut c_void,
    u_callbacks_userdata: *const *mut c_void,
);

pub type VideoWorkerMatchFoundCallbackFunc = unsafe extern "C" fn(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
    ext_callbacks_count: i32,
    ext_callbacks_func: *const *mut c_void,
    ext_callbacks_userdata: *const *mut c_void,
    u_callbacks_count: i32,
    u_callbacks_func: *const *mut c_void,
    u_callbacks_userdata: *const *mut c_void,
);

pub type VideoWorkerStiPersonOutdatedCallbackFunc = unsafe extern "C" fn(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
);

/// `VideoWorker_toggleSomething` selectors.
pub const VIDEO_WORKER_PROCESSING_ENABLE: i32 = 1;
pub const VIDEO_WORKER_PROCESSING_DISABLE: i32 = 2;
pub const VIDEO_WORKER_AGE_GENDER_ENABLE: i32 = 3;
pub const VIDEO_WORKER_AGE_GENDER_DISABLE: i32 = 4;
pub const VIDEO_WORKER_EMOTIONS_ENABLE: i32 = 5;
pub const VIDEO_WORKER_EMOTIONS_DISABLE: i32 = 6;

/// Image arguments as the engine's `*_with_crop` entry points take them.
#[derive(Debug, Clone, Copy)]
pub struct RawImageArgs {
    pub data: *const c_void,
    pub width: i32,
    pub height: i32,
    pub format: i32,
    pub with_crop: i32,
    pub crop_offset_x: i32,
    pub crop_offset_y: i32,
    pub crop_data_width: i32,
    pub crop_data_height: i32,
}

/// Depth map arguments for `VideoWorker_addDepthFrame`.
#[derive(Debug, Clone, Copy)]
pub struct RawDepthMapArgs {
    pub rows: i32,
    pub cols: i32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub horizontal_fov: f32,
    pub vertical_fov: f32,
    pub depth_unit_in_millimeters: f32,
    pub data: *const u16,
    pub stride_in_bytes: i32,
}

/// Key/value override arrays for one config file.
#[derive(Debug, Clone, Copy)]
pub struct RawConfigArgs {
    pub file: *const c_char,
    pub overridden_count: i32,
    pub overridden_keys: *const *const c_char,
    pub overridden_values: *const f64,
}

/// Arguments of `FacerecService_createVideoWorker_sti_age_gender_emotions`.
#[derive(Clone, Copy)]
pub struct RawVideoWorkerArgs {
    pub tracking_callback: VideoWorkerCallbackFunc,
    pub template_created_callback: VideoWorkerCallbackFunc,
    pub match_found_callback: VideoWorkerMatchFoundCallbackFunc,
    pub tracking_lost_callback: VideoWorkerCallbackFunc,
    pub sti_person_outdated_callback: VideoWorkerStiPersonOutdatedCallbackFunc,
    pub video_worker_config: RawConfigArgs,
    pub recognizer_config: RawConfigArgs,
    pub streams_count: i32,
    pub processing_threads_count: i32,
    pub matching_threads_count: i32,
    pub short_time_identification_enabled: u32,
    pub short_time_identification_distance_threshold: f32,
    pub short_time_identification_outdate_time_seconds: f32,
    pub age_gender_threads_count: i32,
    pub emotions_threads_count: i32,
}

/// Arguments of `CameraCalibrator_initCalibration`.
#[derive(Debug, Clone, Copy)]
pub struct RawCalibrationArgs {
    pub image_width: i32,
    pub image_height: i32,
    pub pattern_type: i32,
    pub pattern_width: i32,
    pub pattern_height: i32,
    pub fix_aspect_ratio: i32,
    pub calib_zero_tangent_dist: i32,
    pub calib_fix_principal_point: i32,
    pub rational_distortion_model: i32,
}

/// Output slots shared by `verifyMatch` and the ROC-curve queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawMatchResult {
    pub distance: f64,
    pub fa_r: f64,
    pub fr_r: f64,
    pub score: f64,
}
