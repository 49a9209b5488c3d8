//! The resolved function table.
//!
//! [`Symbols`] holds one C function pointer per engine export. Both backends
//! fill the same struct, dynamically through `libloading` or statically from
//! link-time `extern` declarations, and the capability traits are implemented
//! once here by forwarding to those pointers.

use crate::ffi::api::*;
use crate::ffi::types::*;
use std::ffi::{c_char, c_void};

type Exc = ExceptionOut;
type H = RawHandle;
type WriteF = BinaryStreamWriteFunc;
type ReadF = BinaryStreamReadFunc;

pub(crate) type RocFunc =
    unsafe extern "C" fn(H, f64, *mut f64, *mut f64, *mut f64, *mut f64, Exc);
pub(crate) type AddCallbackFunc = unsafe extern "C" fn(H, *mut c_void, *mut c_void, Exc) -> i32;
pub(crate) type RemoveCallbackFunc = unsafe extern "C" fn(H, i32, Exc);
pub(crate) type PredicateFunc = unsafe extern "C" fn(H, Exc) -> bool;

/// Declares [`Symbols`] together with both ways of filling it.
///
/// `engine` entries are exported under the versioned facerec prefix, `tdv`
/// entries under their bare names.
macro_rules! engine_symbols {
    (
        engine { $( $field:ident = $name:literal : $ty:ty, )* }
        tdv { $( $tfield:ident = $tname:literal : $tty:ty, )* }
    ) => {
        pub(crate) struct Symbols {
            $( pub $field: $ty, )*
            $( pub $tfield: $tty, )*
            // Keeps the image mapped for as long as the pointers above live.
            #[cfg(feature = "dynamic")]
            _library: Option<libloading::Library>,
        }

        #[cfg(feature = "dynamic")]
        impl Symbols {
            /// Resolves every export and takes ownership of the library.
            pub(crate) fn resolve(
                library: libloading::Library,
                path: &std::path::Path,
            ) -> crate::error::Result<Self> {
                unsafe {
                    Ok(Self {
                        $( $field: super::dynamic::lookup(
                            &library,
                            path,
                            &crate::ffi::engine_symbol_name($name),
                        )?, )*
                        $( $tfield: super::dynamic::lookup(&library, path, $tname)?, )*
                        _library: Some(library),
                    })
                }
            }
        }

        #[cfg(feature = "static-link")]
        mod linked {
            extern "C" {
                $(
                    #[link_name = concat!("__4848a76477c449608aa5deb15c5495e4_facerec_v3_", $name)]
                    pub fn $field();
                )*
                $(
                    #[link_name = $tname]
                    pub fn $tfield();
                )*
            }
        }

        #[cfg(feature = "static-link")]
        impl Symbols {
            /// Table of the exports bound at link time.
            pub(crate) fn linked() -> Self {
                // Declarations above carry no signature; each is re-typed here.
                unsafe {
                    Self {
                        $( $field: std::mem::transmute::<unsafe extern "C" fn(), $ty>(
                            linked::$field as unsafe extern "C" fn(),
                        ), )*
                        $( $tfield: std::mem::transmute::<unsafe extern "C" fn(), $tty>(
                            linked::$tfield as unsafe extern "C" fn(),
                        ), )*
                        #[cfg(feature = "dynamic")]
                        _library: None,
                    }
                }
            }
        }
    };
}

engine_symbols! {
    engine {
        api_object_destructor = "apiObject_destructor": unsafe extern "C" fn(H),
        api_exception_code = "apiException_code": unsafe extern "C" fn(H) -> u32,
        api_exception_what = "apiException_what": unsafe extern "C" fn(H) -> *const c_char,
        get_version = "get_version": unsafe extern "C" fn(*mut c_void, WriteF, Exc),
        struct_storage_get_int64 = "StructStorage_get_int64":
            unsafe extern "C" fn(*const c_void, i32, Exc) -> i64,
        struct_storage_get_double = "StructStorage_get_double":
            unsafe extern "C" fn(*const c_void, i32, Exc) -> f64,
        struct_storage_get_pointer = "StructStorage_get_pointer":
            unsafe extern "C" fn(*const c_void, i32, Exc) -> *mut c_void,

        facerec_service_constructor3 = "FacerecService_constructor3":
            unsafe extern "C" fn(*mut c_void, *const c_char, *const c_char, *const c_char, Exc) -> H,
        facerec_service_constructor5 = "FacerecService_constructor5":
            unsafe extern "C" fn(*mut c_void, *const c_char, *const c_char, *const c_char, Exc) -> H,
        facerec_service_toggle_algorithms_cache_kepp = "FacerecService_toggleAlgorithmsCacheKepp":
            unsafe extern "C" fn(i32, Exc),
        facerec_service_force_online_license_update = "FacerecService_forceOnlineLicenseUpdate":
            unsafe extern "C" fn(H, Exc),
        facerec_service_create_capturer_e = "FacerecService_createCapturerE":
            unsafe extern "C" fn(H, *const c_char, i32, *const *const c_char, *const f64, Exc) -> H,
        facerec_service_create_recognizer2 = "FacerecService_createRecognizer2":
            unsafe extern "C" fn(H, *const c_char, i32, i32, i32, Exc) -> H,
        facerec_service_create_video_worker_sti_age_gender_emotions =
            "FacerecService_createVideoWorker_sti_age_gender_emotions":
            unsafe extern "C" fn(
                H,
                VideoWorkerCallbackFunc,
                VideoWorkerCallbackFunc,
                VideoWorkerMatchFoundCallbackFunc,
                VideoWorkerCallbackFunc,
                VideoWorkerStiPersonOutdatedCallbackFunc,
                *const c_char,
                i32,
                *const *const c_char,
                *const f64,
                *const c_char,
                i32,
                *const *const c_char,
                *const f64,
                i32,
                i32,
                i32,
                u32,
                f32,
                f32,
                i32,
                i32,
                Exc,
            ) -> H,
        facerec_service_load_raw_sample = "FacerecService_loadRawSample":
            unsafe extern "C" fn(H, *mut c_void, ReadF, Exc) -> H,
        facerec_service_create_camera_calibrator = "FacerecService_createCameraCalibrator":
            unsafe extern "C" fn(H, Exc) -> H,
        facerec_service_create_dynamic_template_index_2 = "FacerecService_createDynamicTemplateIndex_2":
            unsafe extern "C" fn(H, *const c_void, Exc) -> H,
        facerec_service_processing_block_create_processing_block =
            "FacerecService_ProcessingBlock_createProcessingBlock":
            unsafe extern "C" fn(H, H, Exc) -> H,

        capturer_capture_raw_image_with_crop = "Capturer_capture_raw_image_with_crop":
            unsafe extern "C" fn(
                H,
                *const c_void,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                *mut c_void,
                AssignPointersVectorFunc,
                Exc,
            ),
        capturer_capture_encoded_image = "Capturer_capture_encoded_image":
            unsafe extern "C" fn(H, *const c_void, i32, *mut c_void, AssignPointersVectorFunc, Exc),
        capturer_reset_history = "Capturer_resetHistory": unsafe extern "C" fn(H, Exc),
        capturer_get_type = "Capturer_getType": unsafe extern "C" fn(H, Exc) -> i32,
        capturer_set_parameter = "Capturer_setParameter":
            unsafe extern "C" fn(H, *const c_char, f64, Exc),

        raw_sample_get_rectangle = "RawSample_getRectangle":
            unsafe extern "C" fn(H, *mut i32, *mut i32, *mut i32, *mut i32, Exc),
        raw_sample_get_landmarks = "RawSample_getLandmarks":
            unsafe extern "C" fn(H, *mut c_void, AssignFloatsVectorFunc, Exc),
        raw_sample_get_left_eye = "RawSample_getLeftEye":
            unsafe extern "C" fn(H, *mut f32, *mut f32, Exc),
        raw_sample_get_right_eye = "RawSample_getRightEye":
            unsafe extern "C" fn(H, *mut f32, *mut f32, Exc),
        raw_sample_get_angles = "RawSample_getAngles":
            unsafe extern "C" fn(H, *mut f32, *mut f32, *mut f32, Exc),
        raw_sample_get_id = "RawSample_getID": unsafe extern "C" fn(H, Exc) -> i32,
        raw_sample_get_type = "RawSample_getType": unsafe extern "C" fn(H, Exc) -> i32,
        raw_sample_get_frame_id = "RawSample_getFrameID": unsafe extern "C" fn(H, Exc) -> i32,
        raw_sample_has_original_image = "RawSample_hasOriginalImage":
            unsafe extern "C" fn(H, Exc) -> i32,
        raw_sample_save = "RawSample_save":
            unsafe extern "C" fn(H, *mut c_void, WriteF, i32, Exc),

        template_get_method_name = "Template_getMethodName":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        template_save = "Template_save": unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        templates_index_get_method_name = "TemplatesIndex_getMethodName":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        templates_index_size = "TemplatesIndex_size": unsafe extern "C" fn(H, Exc) -> i64,
        templates_index_at = "TemplatesIndex_at": unsafe extern "C" fn(H, i64, Exc) -> H,
        templates_index_reserve_search_memory = "TemplatesIndex_reserveSearchMemory":
            unsafe extern "C" fn(H, i64, Exc),
        context_template_get_method_name = "ContextTemplate_getMethodName":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        context_template_save = "ContextTemplate_save":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        context_template_size = "ContextTemplate_size": unsafe extern "C" fn(H, Exc) -> i32,
        context_template_destructor = "ContextTemplate_destructor": unsafe extern "C" fn(H),
        dynamic_template_index_get_method_name = "DynamicTemplateIndex_getMethodName":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        dynamic_template_index_size = "DynamicTemplateIndex_size":
            unsafe extern "C" fn(H, Exc) -> u64,
        dynamic_template_index_capacity = "DynamicTemplateIndex_capacity":
            unsafe extern "C" fn(H, Exc) -> u64,
        dynamic_template_index_add_1 = "DynamicTemplateIndex_add_1":
            unsafe extern "C" fn(H, *const c_void, *const c_char, Exc),
        dynamic_template_index_add_3 = "DynamicTemplateIndex_add_3":
            unsafe extern "C" fn(H, *const c_void, *const c_char, Exc),
        dynamic_template_index_remove_1 = "DynamicTemplateIndex_remove_1":
            unsafe extern "C" fn(H, *const c_char, Exc),
        dynamic_template_index_remove_2 = "DynamicTemplateIndex_remove_2":
            unsafe extern "C" fn(H, *const *const c_char, u64, Exc),
        dynamic_template_index_concatenate = "DynamicTemplateIndex_concatenate":
            unsafe extern "C" fn(H, H, Exc),
        dynamic_template_index_clear = "DynamicTemplateIndex_clear": unsafe extern "C" fn(H, Exc),
        dynamic_template_index_at_by_index = "DynamicTemplateIndex_at_by_index":
            unsafe extern "C" fn(H, i64, *mut c_void, WriteF, Exc),
        dynamic_template_index_at_by_uuid = "DynamicTemplateIndex_at_by_uuid":
            unsafe extern "C" fn(H, *const c_char, Exc) -> H,
        dynamic_template_index_get = "DynamicTemplateIndex_get":
            unsafe extern "C" fn(H, i64, Exc) -> H,
        dynamic_template_index_destructor = "DynamicTemplateIndex_destructor":
            unsafe extern "C" fn(H),

        recognizer_get_method_name = "Recognizer_getMethodName":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        recognizer_processing = "Recognizer_processing":
            unsafe extern "C" fn(H, *const c_void, Exc) -> H,
        recognizer_load_template = "Recognizer_loadTemplate":
            unsafe extern "C" fn(H, *mut c_void, ReadF, Exc) -> H,
        recognizer_verify_match_v2 = "Recognizer_verifyMatch_v2":
            unsafe extern "C" fn(
                H,
                *const c_void,
                *const c_void,
                *mut f64,
                *mut f64,
                *mut f64,
                *mut f64,
                Exc,
            ),
        recognizer_create_index = "Recognizer_createIndex":
            unsafe extern "C" fn(H, i64, *const *const c_void, i32, Exc) -> H,
        recognizer_search_v2 = "Recognizer_search_v2":
            unsafe extern "C" fn(
                H,
                i32,
                i32,
                *const *const c_void,
                *const c_void,
                i64,
                *mut i64,
                *mut f32,
                *mut f32,
                *mut f32,
                *mut f32,
                Exc,
            ),
        recognizer_get_roc_curve_point_by_distance_threshold_v2 =
            "Recognizer_getROCCurvePointByDistanceThreshold_v2": RocFunc,
        recognizer_get_roc_curve_point_by_far_v2 = "Recognizer_getROCCurvePointByFAR_v2": RocFunc,
        recognizer_get_roc_curve_point_by_frr_v2 = "Recognizer_getROCCurvePointByFRR_v2": RocFunc,
        recognizer_get_roc_curve_point_by_score_threshold =
            "Recognizer_getROCCurvePointByScoreThreshold": RocFunc,

        camera_calibrator_init_calibration = "CameraCalibrator_initCalibration":
            unsafe extern "C" fn(H, i32, i32, i32, i32, i32, i32, i32, i32, i32, Exc),
        camera_calibrator_add_image_with_crop = "CameraCalibrator_addImage_with_crop":
            unsafe extern "C" fn(
                H,
                *const c_void,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                *mut i32,
                *mut i32,
                *mut f32,
                Exc,
            ),
        camera_calibrator_get_pattern_space_cover_progress =
            "CameraCalibrator_getPatternSpaceCoverProgress": unsafe extern "C" fn(H, Exc) -> f32,
        camera_calibrator_get_tip = "CameraCalibrator_getTip":
            unsafe extern "C" fn(H, *mut f32, Exc) -> i32,
        camera_calibrator_calibrate = "CameraCalibrator_calibrate":
            unsafe extern "C" fn(H, i32, Exc) -> f32,
        camera_calibrator_save_camera_parameters = "CameraCalibrator_saveCameraParameters":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        camera_calibrator_load_camera_parameters = "CameraCalibrator_loadCameraParameters":
            unsafe extern "C" fn(H, *mut c_void, ReadF, Exc),

        video_worker_err_stream_write_func = "VideoWorker_errStreamWriteFunc":
            unsafe extern "C" fn(*mut c_void, *const c_void, u64),
        video_worker_set_this_vw = "VideoWorker_setThisVW":
            unsafe extern "C" fn(H, *mut c_void, Exc),
        video_worker_get_method_name = "VideoWorker_getMethodName":
            unsafe extern "C" fn(H, *mut c_void, WriteF, Exc),
        video_worker_get_streams_count = "VideoWorker_getStreamsCount":
            unsafe extern "C" fn(H, Exc) -> i32,
        video_worker_get_tracking_conveyor_size = "VideoWorker_getTrackingConveyorSize":
            unsafe extern "C" fn(H, i32, Exc) -> i32,
        video_worker_add_video_frame_with_timestamp_with_crop =
            "VideoWorker_addVideoFrameWithTimestamp_with_crop":
            unsafe extern "C" fn(
                H,
                *const c_void,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                i32,
                u64,
                Exc,
            ) -> i32,
        video_worker_add_depth_frame = "VideoWorker_addDepthFrame":
            unsafe extern "C" fn(
                H,
                i32,
                i32,
                f32,
                f32,
                f32,
                f32,
                f32,
                f32,
                f32,
                *const u16,
                i32,
                i32,
                u64,
                Exc,
            ),
        video_worker_reset_tracker_on_stream = "VideoWorker_resetTrackerOnStream":
            unsafe extern "C" fn(H, i32, Exc),
        video_worker_reset_stream = "VideoWorker_resetStream":
            unsafe extern "C" fn(H, i32, Exc) -> i32,
        video_worker_check_exceptions = "VideoWorker_checkExceptions": unsafe extern "C" fn(H, Exc),
        video_worker_add_tracking_callback = "VideoWorker_addTrackingCallback": AddCallbackFunc,
        video_worker_add_tracking_callback_u = "VideoWorker_addTrackingCallbackU": AddCallbackFunc,
        video_worker_remove_tracking_callback = "VideoWorker_removeTrackingCallback":
            RemoveCallbackFunc,
        video_worker_add_template_created_callback = "VideoWorker_addTemplateCreatedCallback":
            AddCallbackFunc,
        video_worker_add_template_created_callback_u = "VideoWorker_addTemplateCreatedCallbackU":
            AddCallbackFunc,
        video_worker_remove_template_created_callback = "VideoWorker_removeTemplateCreatedCallback":
            RemoveCallbackFunc,
        video_worker_add_match_found_callback = "VideoWorker_addMatchFoundCallback":
            AddCallbackFunc,
        video_worker_add_match_found_callback_ext = "VideoWorker_addMatchFoundCallbackExt":
            AddCallbackFunc,
        video_worker_add_match_found_callback_u = "VideoWorker_addMatchFoundCallbackU":
            AddCallbackFunc,
        video_worker_remove_match_found_callback = "VideoWorker_removeMatchFoundCallback":
            RemoveCallbackFunc,
        video_worker_add_tracking_lost_callback = "VideoWorker_addTrackingLostCallback":
            AddCallbackFunc,
        video_worker_add_tracking_lost_callback_u = "VideoWorker_addTrackingLostCallbackU":
            AddCallbackFunc,
        video_worker_remove_tracking_lost_callback = "VideoWorker_removeTrackingLostCallback":
            RemoveCallbackFunc,
        video_worker_add_sti_person_outdated_callback_u = "VideoWorker_addStiPersonOutdatedCallbackU":
            AddCallbackFunc,
        video_worker_remove_sti_person_outdated_callback =
            "VideoWorker_removeStiPersonOutdatedCallback": RemoveCallbackFunc,
        video_worker_toggle_something = "VideoWorker_toggleSomething":
            unsafe extern "C" fn(H, i32, i32, Exc),
        video_worker_set_database = "VideoWorker_setDatabase":
            unsafe extern "C" fn(
                H,
                i32,
                i32,
                *const u64,
                *const u64,
                *const *const c_void,
                *const f32,
                Exc,
            ),
        video_worker_set_parameter = "VideoWorker_setParameter":
            unsafe extern "C" fn(H, *const c_char, f64, Exc),
    }
    tdv {
        tdv_context_create = "TDVContext_create": unsafe extern "C" fn(Exc) -> H,
        tdv_context_destroy = "TDVContext_destroy": unsafe extern "C" fn(H, Exc),
        tdv_context_clone = "TDVContext_clone": unsafe extern "C" fn(H, Exc) -> H,
        tdv_context_copy = "TDVContext_copy": unsafe extern "C" fn(H, H, Exc),
        tdv_context_get_by_key = "TDVContext_getByKey":
            unsafe extern "C" fn(H, *const c_char, Exc) -> H,
        tdv_context_get_or_insert_by_key = "TDVContext_getOrInsertByKey":
            unsafe extern "C" fn(H, *const c_char, Exc) -> H,
        tdv_context_get_by_index = "TDVContext_getByIndex": unsafe extern "C" fn(H, i32, Exc) -> H,
        tdv_context_push_back = "TDVContext_pushBack": unsafe extern "C" fn(H, H, bool, Exc),
        tdv_context_put_str = "TDVContext_putStr": unsafe extern "C" fn(H, *const c_char, Exc),
        tdv_context_put_long = "TDVContext_putLong": unsafe extern "C" fn(H, i64, Exc),
        tdv_context_put_double = "TDVContext_putDouble": unsafe extern "C" fn(H, f64, Exc),
        tdv_context_put_bool = "TDVContext_putBool": unsafe extern "C" fn(H, bool, Exc),
        tdv_context_get_str_size = "TDVContext_getStrSize": unsafe extern "C" fn(H, Exc) -> u64,
        tdv_context_get_str = "TDVContext_getStr": unsafe extern "C" fn(H, *mut c_char, Exc),
        tdv_context_get_long = "TDVContext_getLong": unsafe extern "C" fn(H, Exc) -> i64,
        tdv_context_get_double = "TDVContext_getDouble": unsafe extern "C" fn(H, Exc) -> f64,
        tdv_context_get_bool = "TDVContext_getBool": unsafe extern "C" fn(H, Exc) -> bool,
        tdv_context_get_length = "TDVContext_getLength": unsafe extern "C" fn(H, Exc) -> u64,
        tdv_context_get_keys = "TDVContext_getKeys":
            unsafe extern "C" fn(H, u64, Exc) -> *mut *mut c_char,
        tdv_context_free_ptr = "TDVContext_freePtr": unsafe extern "C" fn(*mut c_void),
        tdv_context_is_none = "TDVContext_isNone": PredicateFunc,
        tdv_context_is_array = "TDVContext_isArray": PredicateFunc,
        tdv_context_is_object = "TDVContext_isObject": PredicateFunc,
        tdv_context_is_bool = "TDVContext_isBool": PredicateFunc,
        tdv_context_is_long = "TDVContext_isLong": PredicateFunc,
        tdv_context_is_double = "TDVContext_isDouble": PredicateFunc,
        tdv_context_is_string = "TDVContext_isString": PredicateFunc,
        tdv_context_clear = "TDVContext_clear": unsafe extern "C" fn(H, Exc),
        tdv_exception_get_error_code = "TDVException_getErrorCode": unsafe extern "C" fn(H) -> u32,
        tdv_exception_get_message = "TDVException_getMessage":
            unsafe extern "C" fn(H) -> *const c_char,
        tdv_exception_delete_exception = "TDVException_deleteException": unsafe extern "C" fn(H),
        tdv_processing_block_process_context = "TDVProcessingBlock_processContext":
            unsafe extern "C" fn(H, H, Exc),
        tdv_processing_block_destroy_block = "TDVProcessingBlock_destroyBlock":
            unsafe extern "C" fn(H, Exc),
    }
}


impl CoreApi for Symbols {
    unsafe fn api_object_destructor(&self, object: H) {
        (self.api_object_destructor)(object)
    }

    unsafe fn api_exception_code(&self, exception: H) -> u32 {
        (self.api_exception_code)(exception)
    }

    unsafe fn api_exception_what(&self, exception: H) -> *const c_char {
        (self.api_exception_what)(exception)
    }

    unsafe fn get_version(&self, stream: *mut c_void, write_func: WriteF, exception: Exc) {
        (self.get_version)(stream, write_func, exception)
    }

    unsafe fn struct_storage_get_int64(&self, storage: *const c_void, field_id: i32, exception: Exc) -> i64 {
        (self.struct_storage_get_int64)(storage, field_id, exception)
    }

    unsafe fn struct_storage_get_double(&self, storage: *const c_void, field_id: i32, exception: Exc) -> f64 {
        (self.struct_storage_get_double)(storage, field_id, exception)
    }

    unsafe fn struct_storage_get_pointer(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: Exc,
    ) -> *mut c_void {
        (self.struct_storage_get_pointer)(storage, field_id, exception)
    }
}

impl ServiceApi for Symbols {
    unsafe fn facerec_service_constructor3(
        &self,
        ae_ptr: *mut c_void,
        conf_dir: *const c_char,
        license_dir: *const c_char,
        dll_path: *const c_char,
        exception: Exc,
    ) -> H {
        (self.facerec_service_constructor3)(ae_ptr, conf_dir, license_dir, dll_path, exception)
    }

    unsafe fn facerec_service_constructor5(
        &self,
        ae_ptr: *mut c_void,
        conf_dir: *const c_char,
        license: *const c_char,
        dll_path: *const c_char,
        exception: Exc,
    ) -> H {
        (self.facerec_service_constructor5)(ae_ptr, conf_dir, license, dll_path, exception)
    }

    unsafe fn facerec_service_toggle_algorithms_cache_kepp(&self, cache_keep_enabled: i32, exception: Exc) {
        (self.facerec_service_toggle_algorithms_cache_kepp)(cache_keep_enabled, exception)
    }

    unsafe fn facerec_service_force_online_license_update(&self, service: H, exception: Exc) {
        (self.facerec_service_force_online_license_update)(service, exception)
    }

    unsafe fn facerec_service_create_capturer_e(&self, service: H, config: &RawConfigArgs, exception: Exc) -> H {
        (self.facerec_service_create_capturer_e)(
            service,
            config.file,
            config.overridden_count,
            config.overridden_keys,
            config.overridden_values,
            exception,
        )
    }

    unsafe fn facerec_service_create_recognizer2(
        &self,
        service: H,
        ini_file: *const c_char,
        processing: i32,
        matching: i32,
        processing_less_memory_consumption: i32,
        exception: Exc,
    ) -> H {
        (self.facerec_service_create_recognizer2)(
            service,
            ini_file,
            processing,
            matching,
            processing_less_memory_consumption,
            exception,
        )
    }

    unsafe fn facerec_service_create_video_worker_sti_age_gender_emotions(
        &self,
        service: H,
        args: &RawVideoWorkerArgs,
        exception: Exc,
    ) -> H {
        (self.facerec_service_create_video_worker_sti_age_gender_emotions)(
            service,
            args.tracking_callback,
            args.template_created_callback,
            args.match_found_callback,
            args.tracking_lost_callback,
            args.sti_person_outdated_callback,
            args.video_worker_config.file,
            args.video_worker_config.overridden_count,
            args.video_worker_config.overridden_keys,
            args.video_worker_config.overridden_values,
            args.recognizer_config.file,
            args.recognizer_config.overridden_count,
            args.recognizer_config.overridden_keys,
            args.recognizer_config.overridden_values,
            args.streams_count,
            args.processing_threads_count,
            args.matching_threads_count,
            args.short_time_identification_enabled,
            args.short_time_identification_distance_threshold,
            args.short_time_identification_outdate_time_seconds,
            args.age_gender_threads_count,
            args.emotions_threads_count,
            exception,
        )
    }

    unsafe fn facerec_service_load_raw_sample(
        &self,
        service: H,
        stream: *mut c_void,
        read_func: ReadF,
        exception: Exc,
    ) -> H {
        (self.facerec_service_load_raw_sample)(service, stream, read_func, exception)
    }

    unsafe fn facerec_service_create_camera_calibrator(&self, service: H, exception: Exc) -> H {
        (self.facerec_service_create_camera_calibrator)(service, exception)
    }

    unsafe fn facerec_service_create_dynamic_template_index_2(
        &self,
        service: H,
        config: *const c_void,
        exception: Exc,
    ) -> H {
        (self.facerec_service_create_dynamic_template_index_2)(service, config, exception)
    }

    unsafe fn facerec_service_processing_block_create_processing_block(
        &self,
        service: H,
        context: H,
        exception: Exc,
    ) -> H {
        (self.facerec_service_processing_block_create_processing_block)(service, context, exception)
    }
}

impl CapturerApi for Symbols {
    unsafe fn capturer_capture_raw_image_with_crop(
        &self,
        capturer: H,
        image: &RawImageArgs,
        result_pointers_vector: *mut c_void,
        assign_func: AssignPointersVectorFunc,
        exception: Exc,
    ) {
        (self.capturer_capture_raw_image_with_crop)(
            capturer,
            image.data,
            image.width,
            image.height,
            image.format,
            image.with_crop,
            image.crop_offset_x,
            image.crop_offset_y,
            image.crop_data_width,
            image.crop_data_height,
            result_pointers_vector,
            assign_func,
            exception,
        )
    }

    unsafe fn capturer_capture_encoded_image(
        &self,
        capturer: H,
        data: *const c_void,
        data_size: i32,
        result_pointers_vector: *mut c_void,
        assign_func: AssignPointersVectorFunc,
        exception: Exc,
    ) {
        (self.capturer_capture_encoded_image)(
            capturer,
            data,
            data_size,
            result_pointers_vector,
            assign_func,
            exception,
        )
    }

    unsafe fn capturer_reset_history(&self, capturer: H, exception: Exc) {
        (self.capturer_reset_history)(capturer, exception)
    }

    unsafe fn capturer_get_type(&self, capturer: H, exception: Exc) -> i32 {
        (self.capturer_get_type)(capturer, exception)
    }

    unsafe fn capturer_set_parameter(&self, capturer: H, name: *const c_char, value: f64, exception: Exc) {
        (self.capturer_set_parameter)(capturer, name, value, exception)
    }
}

impl RawSampleApi for Symbols {
    unsafe fn raw_sample_get_rectangle(
        &self,
        sample: H,
        x: *mut i32,
        y: *mut i32,
        width: *mut i32,
        height: *mut i32,
        exception: Exc,
    ) {
        (self.raw_sample_get_rectangle)(sample, x, y, width, height, exception)
    }

    unsafe fn raw_sample_get_landmarks(
        &self,
        sample: H,
        floats_vector: *mut c_void,
        assign_func: AssignFloatsVectorFunc,
        exception: Exc,
    ) {
        (self.raw_sample_get_landmarks)(sample, floats_vector, assign_func, exception)
    }

    unsafe fn raw_sample_get_left_eye(&self, sample: H, x: *mut f32, y: *mut f32, exception: Exc) {
        (self.raw_sample_get_left_eye)(sample, x, y, exception)
    }

    unsafe fn raw_sample_get_right_eye(&self, sample: H, x: *mut f32, y: *mut f32, exception: Exc) {
        (self.raw_sample_get_right_eye)(sample, x, y, exception)
    }

    unsafe fn raw_sample_get_angles(
        &self,
        sample: H,
        yaw: *mut f32,
        pitch: *mut f32,
        roll: *mut f32,
        exception: Exc,
    ) {
        (self.raw_sample_get_angles)(sample, yaw, pitch, roll, exception)
    }

    unsafe fn raw_sample_get_id(&self, sample: H, exception: Exc) -> i32 {
        (self.raw_sample_get_id)(sample, exception)
    }

    unsafe fn raw_sample_get_type(&self, sample: H, exception: Exc) -> i32 {
        (self.raw_sample_get_type)(sample, exception)
    }

    unsafe fn raw_sample_get_frame_id(&self, sample: H, exception: Exc) -> i32 {
        (self.raw_sample_get_frame_id)(sample, exception)
    }

    unsafe fn raw_sample_has_original_image(&self, sample: H, exception: Exc) -> i32 {
        (self.raw_sample_has_original_image)(sample, exception)
    }

    unsafe fn raw_sample_save(
        &self,
        sample: H,
        stream: *mut c_void,
        write_func: WriteF,
        format: i32,
        exception: Exc,
    ) {
        (self.raw_sample_save)(sample, stream, write_func, format, exception)
    }
}

impl TemplateApi for Symbols {
    unsafe fn template_get_method_name(&self, templ: H, stream: *mut c_void, write_func: WriteF, exception: Exc) {
        (self.template_get_method_name)(templ, stream, write_func, exception)
    }

    unsafe fn template_save(&self, templ: H, stream: *mut c_void, write_func: WriteF, exception: Exc) {
        (self.template_save)(templ, stream, write_func, exception)
    }

    unsafe fn templates_index_get_method_name(
        &self,
        index: H,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.templates_index_get_method_name)(index, stream, write_func, exception)
    }

    unsafe fn templates_index_size(&self, index: H, exception: Exc) -> i64 {
        (self.templates_index_size)(index, exception)
    }

    unsafe fn templates_index_at(&self, index: H, position: i64, exception: Exc) -> H {
        (self.templates_index_at)(index, position, exception)
    }

    unsafe fn templates_index_reserve_search_memory(&self, index: H, queries_count: i64, exception: Exc) {
        (self.templates_index_reserve_search_memory)(index, queries_count, exception)
    }

    unsafe fn context_template_get_method_name(
        &self,
        templ: H,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.context_template_get_method_name)(templ, stream, write_func, exception)
    }

    unsafe fn context_template_save(&self, templ: H, stream: *mut c_void, write_func: WriteF, exception: Exc) {
        (self.context_template_save)(templ, stream, write_func, exception)
    }

    unsafe fn context_template_size(&self, templ: H, exception: Exc) -> i32 {
        (self.context_template_size)(templ, exception)
    }

    unsafe fn context_template_destructor(&self, templ: H) {
        (self.context_template_destructor)(templ)
    }

    unsafe fn dynamic_template_index_get_method_name(
        &self,
        index: H,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.dynamic_template_index_get_method_name)(index, stream, write_func, exception)
    }

    unsafe fn dynamic_template_index_size(&self, index: H, exception: Exc) -> u64 {
        (self.dynamic_template_index_size)(index, exception)
    }

    unsafe fn dynamic_template_index_capacity(&self, index: H, exception: Exc) -> u64 {
        (self.dynamic_template_index_capacity)(index, exception)
    }

    unsafe fn dynamic_template_index_add_1(
        &self,
        index: H,
        templ: *const c_void,
        uuid: *const c_char,
        exception: Exc,
    ) {
        (self.dynamic_template_index_add_1)(index, templ, uuid, exception)
    }

    unsafe fn dynamic_template_index_add_3(
        &self,
        index: H,
        context_template: *const c_void,
        uuid: *const c_char,
        exception: Exc,
    ) {
        (self.dynamic_template_index_add_3)(index, context_template, uuid, exception)
    }

    unsafe fn dynamic_template_index_remove_1(&self, index: H, uuid: *const c_char, exception: Exc) {
        (self.dynamic_template_index_remove_1)(index, uuid, exception)
    }

    unsafe fn dynamic_template_index_remove_2(
        &self,
        index: H,
        uuids: *const *const c_char,
        size: u64,
        exception: Exc,
    ) {
        (self.dynamic_template_index_remove_2)(index, uuids, size, exception)
    }

    unsafe fn dynamic_template_index_concatenate(&self, index: H, other: H, exception: Exc) {
        (self.dynamic_template_index_concatenate)(index, other, exception)
    }

    unsafe fn dynamic_template_index_clear(&self, index: H, exception: Exc) {
        (self.dynamic_template_index_clear)(index, exception)
    }

    unsafe fn dynamic_template_index_at_by_index(
        &self,
        index: H,
        position: i64,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.dynamic_template_index_at_by_index)(index, position, stream, write_func, exception)
    }

    unsafe fn dynamic_template_index_at_by_uuid(&self, index: H, uuid: *const c_char, exception: Exc) -> H {
        (self.dynamic_template_index_at_by_uuid)(index, uuid, exception)
    }

    unsafe fn dynamic_template_index_get(&self, index: H, position: i64, exception: Exc) -> H {
        (self.dynamic_template_index_get)(index, position, exception)
    }

    unsafe fn dynamic_template_index_destructor(&self, index: H) {
        (self.dynamic_template_index_destructor)(index)
    }
}

impl RecognizerApi for Symbols {
    unsafe fn recognizer_get_method_name(
        &self,
        recognizer: H,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.recognizer_get_method_name)(recognizer, stream, write_func, exception)
    }

    unsafe fn recognizer_processing(&self, recognizer: H, sample: *const c_void, exception: Exc) -> H {
        (self.recognizer_processing)(recognizer, sample, exception)
    }

    unsafe fn recognizer_load_template(
        &self,
        recognizer: H,
        stream: *mut c_void,
        read_func: ReadF,
        exception: Exc,
    ) -> H {
        (self.recognizer_load_template)(recognizer, stream, read_func, exception)
    }

    unsafe fn recognizer_verify_match_v2(
        &self,
        recognizer: H,
        template1: *const c_void,
        template2: *const c_void,
        result: &mut RawMatchResult,
        exception: Exc,
    ) {
        (self.recognizer_verify_match_v2)(
            recognizer,
            template1,
            template2,
            &mut result.distance,
            &mut result.fa_r,
            &mut result.fr_r,
            &mut result.score,
            exception,
        )
    }

    unsafe fn recognizer_create_index(
        &self,
        recognizer: H,
        templates_count: i64,
        templates: *const *const c_void,
        search_threads_count: i32,
        exception: Exc,
    ) -> H {
        (self.recognizer_create_index)(recognizer, templates_count, templates, search_threads_count, exception)
    }

    unsafe fn recognizer_search_v2(
        &self,
        recognizer: H,
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
        exception: Exc,
    ) {
        (self.recognizer_search_v2)(
            recognizer,
            acceleration,
            queries_count,
            query_templates,
            templates_index,
            k,
            result_i,
            result_distance,
            result_far,
            result_frr,
            result_score,
            exception,
        )
    }

    unsafe fn recognizer_get_roc_curve_point_by_distance_threshold_v2(
        &self,
        recognizer: H,
        distance_threshold: f64,
        result: &mut RawMatchResult,
        exception: Exc,
    ) {
        call_roc(self.recognizer_get_roc_curve_point_by_distance_threshold_v2, recognizer, distance_threshold, result, exception)
    }

    unsafe fn recognizer_get_roc_curve_point_by_far_v2(
        &self,
        recognizer: H,
        desired_far: f64,
        result: &mut RawMatchResult,
        exception: Exc,
    ) {
        call_roc(self.recognizer_get_roc_curve_point_by_far_v2, recognizer, desired_far, result, exception)
    }

    unsafe fn recognizer_get_roc_curve_point_by_frr_v2(
        &self,
        recognizer: H,
        desired_frr: f64,
        result: &mut RawMatchResult,
        exception: Exc,
    ) {
        call_roc(self.recognizer_get_roc_curve_point_by_frr_v2, recognizer, desired_frr, result, exception)
    }

    unsafe fn recognizer_get_roc_curve_point_by_score_threshold(
        &self,
        recognizer: H,
        score_threshold: f64,
        result: &mut RawMatchResult,
        exception: Exc,
    ) {
        call_roc(self.recognizer_get_roc_curve_point_by_score_threshold, recognizer, score_threshold, result, exception)
    }
}

unsafe fn call_roc(func: RocFunc, recognizer: H, value: f64, result: &mut RawMatchResult, exception: Exc) {
    func(
        recognizer,
        value,
        &mut result.distance,
        &mut result.fa_r,
        &mut result.fr_r,
        &mut result.score,
        exception,
    )
}

impl CalibratorApi for Symbols {
    unsafe fn camera_calibrator_init_calibration(&self, calibrator: H, settings: &RawCalibrationArgs, exception: Exc) {
        (self.camera_calibrator_init_calibration)(
            calibrator,
            settings.image_width,
            settings.image_height,
            settings.pattern_type,
            settings.pattern_width,
            settings.pattern_height,
            settings.fix_aspect_ratio,
            settings.calib_zero_tangent_dist,
            settings.calib_fix_principal_point,
            settings.rational_distortion_model,
            exception,
        )
    }

    unsafe fn camera_calibrator_add_image_with_crop(
        &self,
        calibrator: H,
        image: &RawImageArgs,
        pattern_found: *mut i32,
        pattern_accepted: *mut i32,
        pattern_out: *mut f32,
        exception: Exc,
    ) {
        (self.camera_calibrator_add_image_with_crop)(
            calibrator,
            image.data,
            image.width,
            image.height,
            image.format,
            image.with_crop,
            image.crop_offset_x,
            image.crop_offset_y,
            image.crop_data_width,
            image.crop_data_height,
            pattern_found,
            pattern_accepted,
            pattern_out,
            exception,
        )
    }

    unsafe fn camera_calibrator_get_pattern_space_cover_progress(&self, calibrator: H, exception: Exc) -> f32 {
        (self.camera_calibrator_get_pattern_space_cover_progress)(calibrator, exception)
    }

    unsafe fn camera_calibrator_get_tip(&self, calibrator: H, pattern_out: *mut f32, exception: Exc) -> i32 {
        (self.camera_calibrator_get_tip)(calibrator, pattern_out, exception)
    }

    unsafe fn camera_calibrator_calibrate(&self, calibrator: H, max_used_patterns_count: i32, exception: Exc) -> f32 {
        (self.camera_calibrator_calibrate)(calibrator, max_used_patterns_count, exception)
    }

    unsafe fn camera_calibrator_save_camera_parameters(
        &self,
        calibrator: H,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.camera_calibrator_save_camera_parameters)(calibrator, stream, write_func, exception)
    }

    unsafe fn camera_calibrator_load_camera_parameters(
        &self,
        calibrator: H,
        stream: *mut c_void,
        read_func: ReadF,
        exception: Exc,
    ) {
        (self.camera_calibrator_load_camera_parameters)(calibrator, stream, read_func, exception)
    }
}

impl VideoWorkerApi for Symbols {
    unsafe fn video_worker_err_stream_write_func(&self, err_stream: *mut c_void, data: *const c_void, bytes_count: u64) {
        (self.video_worker_err_stream_write_func)(err_stream, data, bytes_count)
    }

    unsafe fn video_worker_set_this_vw(&self, video_worker: H, this_vw: *mut c_void, exception: Exc) {
        (self.video_worker_set_this_vw)(video_worker, this_vw, exception)
    }

    unsafe fn video_worker_get_method_name(
        &self,
        video_worker: H,
        stream: *mut c_void,
        write_func: WriteF,
        exception: Exc,
    ) {
        (self.video_worker_get_method_name)(video_worker, stream, write_func, exception)
    }

    unsafe fn video_worker_get_streams_count(&self, video_worker: H, exception: Exc) -> i32 {
        (self.video_worker_get_streams_count)(video_worker, exception)
    }

    unsafe fn video_worker_get_tracking_conveyor_size(&self, video_worker: H, stream_id: i32, exception: Exc) -> i32 {
        (self.video_worker_get_tracking_conveyor_size)(video_worker, stream_id, exception)
    }

    unsafe fn video_worker_add_video_frame_with_timestamp_with_crop(
        &self,
        video_worker: H,
        image: &RawImageArgs,
        stream_id: i32,
        timestamp_microsec: u64,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_video_frame_with_timestamp_with_crop)(
            video_worker,
            image.data,
            image.width,
            image.height,
            image.format,
            image.with_crop,
            image.crop_offset_x,
            image.crop_offset_y,
            image.crop_data_width,
            image.crop_data_height,
            stream_id,
            timestamp_microsec,
            exception,
        )
    }

    unsafe fn video_worker_add_depth_frame(
        &self,
        video_worker: H,
        depth_map: &RawDepthMapArgs,
        stream_id: i32,
        timestamp_microsec: u64,
        exception: Exc,
    ) {
        (self.video_worker_add_depth_frame)(
            video_worker,
            depth_map.rows,
            depth_map.cols,
            depth_map.offset_x,
            depth_map.offset_y,
            depth_map.scale_x,
            depth_map.scale_y,
            depth_map.horizontal_fov,
            depth_map.vertical_fov,
            depth_map.depth_unit_in_millimeters,
            depth_map.data,
            depth_map.stride_in_bytes,
            stream_id,
            timestamp_microsec,
            exception,
        )
    }

    unsafe fn video_worker_reset_tracker_on_stream(&self, video_worker: H, stream_id: i32, exception: Exc) {
        (self.video_worker_reset_tracker_on_stream)(video_worker, stream_id, exception)
    }

    unsafe fn video_worker_reset_stream(&self, video_worker: H, stream_id: i32, exception: Exc) -> i32 {
        (self.video_worker_reset_stream)(video_worker, stream_id, exception)
    }

    unsafe fn video_worker_check_exceptions(&self, video_worker: H, exception: Exc) {
        (self.video_worker_check_exceptions)(video_worker, exception)
    }

    unsafe fn video_worker_add_tracking_callback(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_tracking_callback)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_add_tracking_callback_u(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_tracking_callback_u)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_remove_tracking_callback(&self, video_worker: H, callback_id: i32, exception: Exc) {
        (self.video_worker_remove_tracking_callback)(video_worker, callback_id, exception)
    }

    unsafe fn video_worker_add_template_created_callback(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_template_created_callback)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_add_template_created_callback_u(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_template_created_callback_u)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_remove_template_created_callback(&self, video_worker: H, callback_id: i32, exception: Exc) {
        (self.video_worker_remove_template_created_callback)(video_worker, callback_id, exception)
    }

    unsafe fn video_worker_add_match_found_callback(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_match_found_callback)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_add_match_found_callback_ext(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_match_found_callback_ext)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_add_match_found_callback_u(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_match_found_callback_u)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_remove_match_found_callback(&self, video_worker: H, callback_id: i32, exception: Exc) {
        (self.video_worker_remove_match_found_callback)(video_worker, callback_id, exception)
    }

    unsafe fn video_worker_add_tracking_lost_callback(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_tracking_lost_callback)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_add_tracking_lost_callback_u(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_tracking_lost_callback_u)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_remove_tracking_lost_callback(&self, video_worker: H, callback_id: i32, exception: Exc) {
        (self.video_worker_remove_tracking_lost_callback)(video_worker, callback_id, exception)
    }

    unsafe fn video_worker_add_sti_person_outdated_callback_u(
        &self,
        video_worker: H,
        callback: *mut c_void,
        userdata: *mut c_void,
        exception: Exc,
    ) -> i32 {
        (self.video_worker_add_sti_person_outdated_callback_u)(video_worker, callback, userdata, exception)
    }

    unsafe fn video_worker_remove_sti_person_outdated_callback(
        &self,
        video_worker: H,
        callback_id: i32,
        exception: Exc,
    ) {
        (self.video_worker_remove_sti_person_outdated_callback)(video_worker, callback_id, exception)
    }

    unsafe fn video_worker_toggle_something(&self, video_worker: H, stream_id: i32, something: i32, exception: Exc) {
        (self.video_worker_toggle_something)(video_worker, stream_id, something, exception)
    }

    unsafe fn video_worker_set_database(
        &self,
        video_worker: H,
        acceleration: i32,
        elements_count: i32,
        elements_ids: *const u64,
        persons_ids: *const u64,
        elements_templates: *const *const c_void,
        elements_thresholds: *const f32,
        exception: Exc,
    ) {
        (self.video_worker_set_database)(
            video_worker,
            acceleration,
            elements_count,
            elements_ids,
            persons_ids,
            elements_templates,
            elements_thresholds,
            exception,
        )
    }

    unsafe fn video_worker_set_parameter(&self, video_worker: H, name: *const c_char, value: f64, exception: Exc) {
        (self.video_worker_set_parameter)(video_worker, name, value, exception)
    }
}

impl ContextApi for Symbols {
    unsafe fn tdv_context_create(&self, exception: Exc) -> H {
        (self.tdv_context_create)(exception)
    }

    unsafe fn tdv_context_destroy(&self, context: H, exception: Exc) {
        (self.tdv_context_destroy)(context, exception)
    }

    unsafe fn tdv_context_clone(&self, context: H, exception: Exc) -> H {
        (self.tdv_context_clone)(context, exception)
    }

    unsafe fn tdv_context_copy(&self, source: H, destination: H, exception: Exc) {
        (self.tdv_context_copy)(source, destination, exception)
    }

    unsafe fn tdv_context_get_by_key(&self, context: H, key: *const c_char, exception: Exc) -> H {
        (self.tdv_context_get_by_key)(context, key, exception)
    }

    unsafe fn tdv_context_get_or_insert_by_key(&self, context: H, key: *const c_char, exception: Exc) -> H {
        (self.tdv_context_get_or_insert_by_key)(context, key, exception)
    }

    unsafe fn tdv_context_get_by_index(&self, context: H, index: i32, exception: Exc) -> H {
        (self.tdv_context_get_by_index)(context, index, exception)
    }

    unsafe fn tdv_context_push_back(&self, context: H, data: H, copy: bool, exception: Exc) {
        (self.tdv_context_push_back)(context, data, copy, exception)
    }

    unsafe fn tdv_context_put_str(&self, context: H, value: *const c_char, exception: Exc) {
        (self.tdv_context_put_str)(context, value, exception)
    }

    unsafe fn tdv_context_put_long(&self, context: H, value: i64, exception: Exc) {
        (self.tdv_context_put_long)(context, value, exception)
    }

    unsafe fn tdv_context_put_double(&self, context: H, value: f64, exception: Exc) {
        (self.tdv_context_put_double)(context, value, exception)
    }

    unsafe fn tdv_context_put_bool(&self, context: H, value: bool, exception: Exc) {
        (self.tdv_context_put_bool)(context, value, exception)
    }

    unsafe fn tdv_context_get_str_size(&self, context: H, exception: Exc) -> u64 {
        (self.tdv_context_get_str_size)(context, exception)
    }

    unsafe fn tdv_context_get_str(&self, context: H, buffer: *mut c_char, exception: Exc) {
        (self.tdv_context_get_str)(context, buffer, exception)
    }

    unsafe fn tdv_context_get_long(&self, context: H, exception: Exc) -> i64 {
        (self.tdv_context_get_long)(context, exception)
    }

    unsafe fn tdv_context_get_double(&self, context: H, exception: Exc) -> f64 {
        (self.tdv_context_get_double)(context, exception)
    }

    unsafe fn tdv_context_get_bool(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_get_bool)(context, exception)
    }

    unsafe fn tdv_context_get_length(&self, context: H, exception: Exc) -> u64 {
        (self.tdv_context_get_length)(context, exception)
    }

    unsafe fn tdv_context_get_keys(&self, context: H, length: u64, exception: Exc) -> *mut *mut c_char {
        (self.tdv_context_get_keys)(context, length, exception)
    }

    unsafe fn tdv_context_free_ptr(&self, ptr: *mut c_void) {
        (self.tdv_context_free_ptr)(ptr)
    }

    unsafe fn tdv_context_is_none(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_none)(context, exception)
    }

    unsafe fn tdv_context_is_array(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_array)(context, exception)
    }

    unsafe fn tdv_context_is_object(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_object)(context, exception)
    }

    unsafe fn tdv_context_is_bool(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_bool)(context, exception)
    }

    unsafe fn tdv_context_is_long(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_long)(context, exception)
    }

    unsafe fn tdv_context_is_double(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_double)(context, exception)
    }

    unsafe fn tdv_context_is_string(&self, context: H, exception: Exc) -> bool {
        (self.tdv_context_is_string)(context, exception)
    }

    unsafe fn tdv_context_clear(&self, context: H, exception: Exc) {
        (self.tdv_context_clear)(context, exception)
    }

    unsafe fn tdv_exception_get_error_code(&self, exception: H) -> u32 {
        (self.tdv_exception_get_error_code)(exception)
    }

    unsafe fn tdv_exception_get_message(&self, exception: H) -> *const c_char {
        (self.tdv_exception_get_message)(exception)
    }

    unsafe fn tdv_exception_delete_exception(&self, exception: H) {
        (self.tdv_exception_delete_exception)(exception)
    }

    unsafe fn tdv_processing_block_process_context(&self, block: H, context: H, exception: Exc) {
        (self.tdv_processing_block_process_context)(block, context, exception)
    }

    unsafe fn tdv_processing_block_destroy_block(&self, block: H, exception: Exc) {
        (self.tdv_processing_block_destroy_block)(block, exception)
    }
}
