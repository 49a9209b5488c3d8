//! The capability table: every engine function the bindings call.
//!
//! The table is split into one trait per object family and gathered by
//! [`FacerecApi`]. Method names follow the exported C names in snake case.
//! Backends in [`crate::backends`] implement these traits by forwarding to
//! resolved symbols; tests implement them with an in-process fake engine.
//!
//! # Safety
//!
//! Every method is a raw C call. Callers must pass pointers obtained from the
//! same engine instance and buffers sized as the engine expects.

use super::types::*;
use std::ffi::{c_char, c_void};

/// Object release, exception decoding, version and `StructStorage` access.
pub trait CoreApi {
    unsafe fn api_object_destructor(&self, object: RawHandle);
    unsafe fn api_exception_code(&self, exception: RawHandle) -> u32;
    unsafe fn api_exception_what(&self, exception: RawHandle) -> *const c_char;
    unsafe fn get_version(
        &self,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn struct_storage_get_int64(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: ExceptionOut,
    ) -> i64;
    unsafe fn struct_storage_get_double(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: ExceptionOut,
    ) -> f64;
    unsafe fn struct_storage_get_pointer(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: ExceptionOut,
    ) -> *mut c_void;
}

/// `FacerecService_*`: service construction and object factories.
pub trait ServiceApi {
    unsafe fn facerec_service_constructor3(
        &self,
        ae_ptr: *mut c_void,
        conf_dir: *const c_char,
        license_dir: *const c_char,
        dll_path: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_constructor5(
        &self,
        ae_ptr: *mut c_void,
        conf_dir: *const c_char,
        license: *const c_char,
        dll_path: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_toggle_algorithms_cache_kepp(
        &self,
        cache_keep_enabled: i32,
        exception: ExceptionOut,
    );
    unsafe fn facerec_service_force_online_license_update(
        &self,
        service: RawHandle,
        exception: ExceptionOut,
    );
    unsafe fn facerec_service_create_capturer_e(
        &self,
        service: RawHandle,
        config: &RawConfigArgs,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_create_recognizer2(
        &self,
        service: RawHandle,
        ini_file: *const c_char,
        processing: i32,
        matching: i32,
        processing_less_memory_consumption: i32,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_create_video_worker_sti_age_gender_emotions(
        &self,
        service: RawHandle,
        args: &RawVideoWorkerArgs,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_load_raw_sample(
        &self,
        service: RawHandle,
        stream: *mut c_void,
        read_func: BinaryStreamReadFunc,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_create_camera_calibrator(
        &self,
        service: RawHandle,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_create_dynamic_template_index_2(
        &self,
        service: RawHandle,
        config: *const c_void,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn facerec_service_processing_block_create_processing_block(
        &self,
        service: RawHandle,
        context: RawHandle,
        exception: ExceptionOut,
    ) -> RawHandle;
}

/// `Capturer_*`.
pub trait CapturerApi {
    unsafe fn capturer_capture_raw_image_with_crop(
        &self,
        capturer: RawHandle,
        image: &RawImageArgs,
        result_pointers_vector: *mut c_void,
        assign_func: AssignPointersVectorFunc,
        exception: ExceptionOut,
    );
    unsafe fn capturer_capture_encoded_image(
        &self,
        capturer: RawHandle,
        data: *const c_void,
        data_size: i32,
        result_pointers_vector: *mut c_void,
        assign_func: AssignPointersVectorFunc,
        exception: ExceptionOut,
    );
    unsafe fn capturer_reset_history(&self, capturer: RawHandle, exception: ExceptionOut);
    unsafe fn capturer_get_type(&self, capturer: RawHandle, exception: ExceptionOut) -> i32;
    unsafe fn capturer_set_parameter(
        &self,
        capturer: RawHandle,
        name: *const c_char,
        value: f64,
        exception: ExceptionOut,
    );
}

/// `RawSample_*`.
pub trait RawSampleApi {
    unsafe fn raw_sample_get_rectangle(
        &self,
        sample: RawHandle,
        x: *mut i32,
        y: *mut i32,
        width: *mut i32,
        height: *mut i32,
        exception: ExceptionOut,
    );
    unsafe fn raw_sample_get_landmarks(
        &self,
        sample: RawHandle,
        floats_vector: *mut c_void,
        assign_func: AssignFloatsVectorFunc,
        exception: ExceptionOut,
    );
    unsafe fn raw_sample_get_left_eye(
        &self,
        sample: RawHandle,
        x: *mut f32,
        y: *mut f32,
        exception: ExceptionOut,
    );
    unsafe fn raw_sample_get_right_eye(
        &self,
        sample: RawHandle,
        x: *mut f32,
        y: *mut f32,
        exception: ExceptionOut,
    );
    unsafe fn raw_sample_get_angles(
        &self,
        sample: RawHandle,
        yaw: *mut f32,
        pitch: *mut f32,
        roll: *mut f32,
        exception: ExceptionOut,
    );
    unsafe fn raw_sample_get_id(&self, sample: RawHandle, exception: ExceptionOut) -> i32;
    unsafe fn raw_sample_get_type(&self, sample: RawHandle, exception: ExceptionOut) -> i32;
    unsafe fn raw_sample_get_frame_id(&self, sample: RawHandle, exception: ExceptionOut) -> i32;
    unsafe fn raw_sample_has_original_image(
        &self,
        sample: RawHandle,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn raw_sample_save(
        &self,
        sample: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        format: i32,
        exception: ExceptionOut,
    );
}

/// `Template_*`, `TemplatesIndex_*`, `ContextTemplate_*` and `DynamicTemplateIndex_*`.
pub trait TemplateApi {
    unsafe fn template_get_method_name(
        &self,
        templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn template_save(
        &self,
        templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );

    unsafe fn templates_index_get_method_name(
        &self,
        index: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn templates_index_size(&self, index: RawHandle, exception: ExceptionOut) -> i64;
    unsafe fn templates_index_at(
        &self,
        index: RawHandle,
        position: i64,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn templates_index_reserve_search_memory(
        &self,
        index: RawHandle,
        queries_count: i64,
        exception: ExceptionOut,
    );

    unsafe fn context_template_get_method_name(
        &self,
        templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn context_template_save(
        &self,
        templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn context_template_size(&self, templ: RawHandle, exception: ExceptionOut) -> i32;
    unsafe fn context_template_destructor(&self, templ: RawHandle);

    unsafe fn dynamic_template_index_get_method_name(
        &self,
        index: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_size(&self, index: RawHandle, exception: ExceptionOut) -> u64;
    unsafe fn dynamic_template_index_capacity(
        &self,
        index: RawHandle,
        exception: ExceptionOut,
    ) -> u64;
    unsafe fn dynamic_template_index_add_1(
        &self,
        index: RawHandle,
        templ: *const c_void,
        uuid: *const c_char,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_add_3(
        &self,
        index: RawHandle,
        context_template: *const c_void,
        uuid: *const c_char,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_remove_1(
        &self,
        index: RawHandle,
        uuid: *const c_char,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_remove_2(
        &self,
        index: RawHandle,
        uuids: *const *const c_char,
        size: u64,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_concatenate(
        &self,
        index: RawHandle,
        other: RawHandle,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_clear(&self, index: RawHandle, exception: ExceptionOut);
    unsafe fn dynamic_template_index_at_by_index(
        &self,
        index: RawHandle,
        position: i64,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn dynamic_template_index_at_by_uuid(
        &self,
        index: RawHandle,
        uuid: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn dynamic_template_index_get(
        &self,
        index: RawHandle,
        position: i64,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn dynamic_template_index_destructor(&self, index: RawHandle);
}

/// `Recognizer_*`.
pub trait RecognizerApi {
    unsafe fn recognizer_get_method_name(
        &self,
        recognizer: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn recognizer_processing(
        &self,
        recognizer: RawHandle,
        sample: *const c_void,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn recognizer_load_template(
        &self,
        recognizer: RawHandle,
        stream: *mut c_void,
        read_func: BinaryStreamReadFunc,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn recognizer_verify_match_v2(
        &self,
        recognizer: RawHandle,
        template1: *const c_void,
        template2: *const c_void,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    );
    unsafe fn recognizer_create_index(
        &self,
        recognizer: RawHandle,
        templates_count: i64,
        templates: *const *const c_void,
        search_threads_count: i32,
        exception: ExceptionOut,
    ) -> RawHandle;
    #[allow(clippy::too_many_arguments)]
    unsafe fn recognizer_search_v2(
        &self,
        recognizer: RawHandle,
        acceleration: i32,
        queries_count: i32,
        query_templates: *const *const c_void,
        templates_index: *const c_void,
        k: i64,
        result_i: *mut i64,
        result_distance: *mut f32,
        result_far: *mut f32,
        result_frr: *mut f32,
        result_score: *mut f32,
        exception: ExceptionOut,
    );
    unsafe fn recognizer_get_roc_curve_point_by_distance_threshold_v2(
        &self,
        recognizer: RawHandle,
        distance_threshold: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    );
    unsafe fn recognizer_get_roc_curve_point_by_far_v2(
        &self,
        recognizer: RawHandle,
        desired_far: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    );
    unsafe fn recognizer_get_roc_curve_point_by_frr_v2(
        &self,
        recognizer: RawHandle,
        desired_frr: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    );
    unsafe fn recognizer_get_roc_curve_point_by_score_threshold(
        &self,
        recognizer: RawHandle,
        score_threshold: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    );
}

/// `CameraCalibrator_*`.
pub trait CalibratorApi {
    unsafe fn camera_calibrator_init_calibration(
        &self,
        calibrator: RawHandle,
        settings: &RawCalibrationArgs,
        exception: ExceptionOut,
    );
    unsafe fn camera_calibrator_add_image_with_crop(
        &self,
        calibrator: RawHandle,
        image: &RawImageArgs,
        pattern_found: *mut i32,
        pattern_accepted: *mut i32,
        pattern_out: *mut f32,
        exception: ExceptionOut,
    );
    unsafe fn camera_calibrator_get_pattern_space_cover_progress(
        &self,
        calibrator: RawHandle,
        exception: ExceptionOut,
    ) -> f32;
    unsafe fn camera_calibrator_get_tip(
        &self,
        calibrator: RawHandle,
        pattern_out: *mut f32,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn camera_calibrator_calibrate(
        &self,
        calibrator: RawHandle,
        max_used_patterns_count: i32,
        exception: ExceptionOut,
    ) -> f32;
    unsafe fn camera_calibrator_save_camera_parameters(
        &self,
        calibrator: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn camera_calibrator_load_camera_parameters(
        &self,
        calibrator: RawHandle,
        stream: *mut c_void,
        read_func: BinaryStreamReadFunc,
        exception: ExceptionOut,
    );
}

/// `VideoWorker_*`.
pub trait VideoWorkerApi {
    unsafe fn video_worker_err_stream_write_func(
        &self,
        err_stream: *mut c_void,
        data: *const c_void,
        bytes_count: u64,
    );
    unsafe fn video_worker_set_this_vw(
        &self,
        video_worker: RawHandle,
        this_vw: *mut c_void,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_get_method_name(
        &self,
        video_worker: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_get_streams_count(
        &self,
        video_worker: RawHandle,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_get_tracking_conveyor_size(
        &self,
        video_worker: RawHandle,
        stream_id: i32,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_video_frame_with_timestamp_with_crop(
        &self,
        video_worker: RawHandle,
        image: &RawImageArgs,
        stream_id: i32,
        timestamp_microsec: u64,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_depth_frame(
        &self,
        video_worker: RawHandle,
        depth_map: &RawDepthMapArgs,
        stream_id: i32,
        timestamp_microsec: u64,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_reset_tracker_on_stream(
        &self,
        video_worker: RawHandle,
        stream_id: i32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_reset_stream(
        &self,
        video_worker: RawHandle,
        stream_id: i32,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_check_exceptions(
        &self,
        video_worker: RawHandle,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_add_tracking_callback(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_tracking_callback_u(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_remove_tracking_callback(
        &self,
        video_worker: RawHandle,
        callback_id: i32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_add_template_created_callback(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_template_created_callback_u(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_remove_template_created_callback(
        &self,
        video_worker: RawHandle,
        callback_id: i32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_add_match_found_callback(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_match_found_callback_ext(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_match_found_callback_u(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_remove_match_found_callback(
        &self,
        video_worker: RawHandle,
        callback_id: i32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_add_tracking_lost_callback(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_add_tracking_lost_callback_u(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_remove_tracking_lost_callback(
        &self,
        video_worker: RawHandle,
        callback_id: i32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_add_sti_person_outdated_callback_u(
        &self,
        video_worker: RawHandle,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: ExceptionOut,
    ) -> i32;
    unsafe fn video_worker_remove_sti_person_outdated_callback(
        &self,
        video_worker: RawHandle,
        callback_id: i32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_toggle_something(
        &self,
        video_worker: RawHandle,
        stream_id: i32,
        something: i32,
        exception: ExceptionOut,
    );
    #[allow(clippy::too_many_arguments)]
    unsafe fn video_worker_set_database(
        &self,
        video_worker: RawHandle,
        acceleration: i32,
        elements_count: i32,
        elements_ids: *const u64,
        persons_ids: *const u64,
        elements_templates: *const *const c_void,
        elements_thresholds: *const f32,
        exception: ExceptionOut,
    );
    unsafe fn video_worker_set_parameter(
        &self,
        video_worker: RawHandle,
        name: *const c_char,
        value: f64,
        exception: ExceptionOut,
    );
}

/// `TDVContext_*`, `TDVException_*` and `TDVProcessingBlock_*`.
///
/// These use their own exception handles, decoded through the
/// `tdv_exception_*` methods rather than `api_exception_*`.
pub trait ContextApi {
    unsafe fn tdv_context_create(&self, exception: ExceptionOut) -> RawHandle;
    unsafe fn tdv_context_destroy(&self, context: RawHandle, exception: ExceptionOut);
    unsafe fn tdv_context_clone(&self, context: RawHandle, exception: ExceptionOut) -> RawHandle;
    unsafe fn tdv_context_copy(
        &self,
        source: RawHandle,
        destination: RawHandle,
        exception: ExceptionOut,
    );
    unsafe fn tdv_context_get_by_key(
        &self,
        context: RawHandle,
        key: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn tdv_context_get_or_insert_by_key(
        &self,
        context: RawHandle,
        key: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn tdv_context_get_by_index(
        &self,
        context: RawHandle,
        index: i32,
        exception: ExceptionOut,
    ) -> RawHandle;
    unsafe fn tdv_context_push_back(
        &self,
        context: RawHandle,
        data: RawHandle,
        copy: bool,
        exception: ExceptionOut,
    );
    unsafe fn tdv_context_put_str(
        &self,
        context: RawHandle,
        value: *const c_char,
        exception: ExceptionOut,
    );
    unsafe fn tdv_context_put_long(&self, context: RawHandle, value: i64, exception: ExceptionOut);
    unsafe fn tdv_context_put_double(
        &self,
        context: RawHandle,
        value: f64,
        exception: ExceptionOut,
    );
    unsafe fn tdv_context_put_bool(&self, context: RawHandle, value: bool, exception: ExceptionOut);
    unsafe fn tdv_context_get_str_size(&self, context: RawHandle, exception: ExceptionOut) -> u64;
    unsafe fn tdv_context_get_str(
        &self,
        context: RawHandle,
        buffer: *mut c_char,
        exception: ExceptionOut,
    );
    unsafe fn tdv_context_get_long(&self, context: RawHandle, exception: ExceptionOut) -> i64;
    unsafe fn tdv_context_get_double(&self, context: RawHandle, exception: ExceptionOut) -> f64;
    unsafe fn tdv_context_get_bool(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_get_length(&self, context: RawHandle, exception: ExceptionOut) -> u64;
    unsafe fn tdv_context_get_keys(
        &self,
        context: RawHandle,
        length: u64,
        exception: ExceptionOut,
    ) -> *mut *mut c_char;
    unsafe fn tdv_context_free_ptr(&self, ptr: *mut c_void);
    unsafe fn tdv_context_is_none(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_is_array(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_is_object(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_is_bool(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_is_long(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_is_double(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_is_string(&self, context: RawHandle, exception: ExceptionOut) -> bool;
    unsafe fn tdv_context_clear(&self, context: RawHandle, exception: ExceptionOut);

    unsafe fn tdv_exception_get_error_code(&self, exception: RawHandle) -> u32;
    unsafe fn tdv_exception_get_message(&self, exception: RawHandle) -> *const c_char;
    unsafe fn tdv_exception_delete_exception(&self, exception: RawHandle);

    unsafe fn tdv_processing_block_process_context(
        &self,
        block: RawHandle,
        context: RawHandle,
        exception: ExceptionOut,
    );
    unsafe fn tdv_processing_block_destroy_block(&self, block: RawHandle, exception: ExceptionOut);
}

/// The complete function table of one loaded engine.
///
/// Implemented automatically for any type that provides every family.
pub trait FacerecApi:
    CoreApi
    + ServiceApi
    + CapturerApi
    + RawSampleApi
    + TemplateApi
    + RecognizerApi
    + CalibratorApi
    + VideoWorkerApi
    + ContextApi
    + Send
    + Sync
{
}

impl<T> FacerecApi for T where
    T: CoreApi
        + ServiceApi
        + CapturerApi
        + RawSampleApi
        + TemplateApi
        + RecognizerApi
        + CalibratorApi
        + VideoWorkerApi
        + ContextApi
        + Send
        + Sync
{
}
