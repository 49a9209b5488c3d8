//! In-process fake engine for unit tests.
//!
//! [`FakeEngine`] implements the whole capability table with plain Rust
//! state. Handles are opaque counters, exceptions carry real C strings, and
//! video worker events are produced on demand with the `emit_*` methods,
//! which call the trampolines exactly like the engine's worker threads do.

mod context;
pub(crate) mod events;

use crate::ffi::*;
use crate::types::{MatchResult, LIBFACEREC_VERSION};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::{c_char, c_void, CStr, CString};
use std::slice;
use std::sync::Arc;

pub(crate) use worker::{FakeStorage, WORKER_ERROR_CODE};

/// Code of every exception the fake raises on its own.
pub(crate) const FAKE_ERROR_CODE: u32 = 0x0fa4_e001;

const METHOD_NAME: &str = "12v1000";
const TEMPLATE_MAGIC: &[u8; 4] = b"FTPL";
const SAMPLE_MAGIC: &[u8; 4] = b"FSMP";
const CAMERA_MAGIC: &[u8; 4] = b"FCAM";

type Failure = (u32, String);

fn fail(message: impl Into<String>) -> Failure {
    (FAKE_ERROR_CODE, message.into())
}

/// Calls that can be told to fail once with [`FakeEngine::fail_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Fail {
    Capture,
    AddCallback,
    CreateVideoWorker,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Stats {
    pub(crate) objects_destroyed: usize,
    pub(crate) exceptions_freed: usize,
    pub(crate) tdv_exceptions_freed: usize,
    pub(crate) dynamic_indexes_destroyed: usize,
    pub(crate) context_templates_destroyed: usize,
    pub(crate) contexts_destroyed: usize,
    pub(crate) blocks_destroyed: usize,
    pub(crate) captures: usize,
    pub(crate) searches: usize,
}

/// A config file and its overrides as the engine received them.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RecordedConfig {
    pub(crate) file: String,
    pub(crate) overridden: Vec<(String, f64)>,
}

impl RecordedConfig {
    unsafe fn read(args: &RawConfigArgs) -> Self {
        let file = c_string(args.file);
        let count = args.overridden_count.max(0) as usize;
        let overridden = if count == 0 || args.overridden_keys.is_null() {
            Vec::new()
        } else {
            let keys = slice::from_raw_parts(args.overridden_keys, count);
            let values = slice::from_raw_parts(args.overridden_values, count);
            keys.iter().map(|&k| c_string(k)).zip(values.iter().copied()).collect()
        };
        Self { file, overridden }
    }
}

unsafe fn c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

unsafe fn write_bytes(stream: *mut c_void, write: BinaryStreamWriteFunc, bytes: &[u8]) {
    write(stream, bytes.as_ptr() as *const c_void, bytes.len() as u64);
}

unsafe fn read_bytes<const N: usize>(stream: *mut c_void, read: BinaryStreamReadFunc) -> [u8; N] {
    let mut buffer = [0u8; N];
    read(stream, buffer.as_mut_ptr() as *mut c_void, N as u64);
    buffer
}

struct FakeException {
    code: u32,
    message: CString,
}

#[derive(Debug, Clone, Copy)]
struct SampleInfo {
    id: i32,
    frame_id: i32,
}

#[derive(Debug, Default)]
struct DynamicIndex {
    uuids: Vec<String>,
    capacity: usize,
}

#[derive(Default)]
struct State {
    next_handle: usize,
    exceptions: HashMap<usize, FakeException>,
    tdv_exceptions: HashMap<usize, FakeException>,
    samples: HashMap<usize, SampleInfo>,
    stats: Stats,
    failures: HashMap<Fail, Failure>,
    capture_count: usize,
    landmarks: Vec<f32>,
    search_hits: usize,
    reprojection_error: f32,
    pattern_points: usize,
    configs: Vec<RecordedConfig>,
    templates_indexes: HashMap<usize, i64>,
    dynamic_indexes: HashMap<usize, DynamicIndex>,
    context_templates: HashMap<usize, String>,
    blocks: HashMap<usize, String>,
    contexts: context::Tree,
    worker: Option<worker::Worker>,
}

impl State {
    fn alloc(&mut self) -> usize {
        self.next_handle += 16;
        0x1000 + self.next_handle
    }

    fn raise(&mut self, code: u32, message: &[u8], tdv: bool) -> usize {
        let clean: Vec<u8> = message.iter().copied().filter(|&b| b != 0).collect();
        let exception = FakeException {
            code,
            message: CString::new(clean).unwrap_or_default(),
        };
        let handle = self.alloc();
        if tdv {
            self.tdv_exceptions.insert(handle, exception);
        } else {
            self.exceptions.insert(handle, exception);
        }
        handle
    }

    fn take_failure(&mut self, kind: Fail) -> Result<(), Failure> {
        match self.failures.remove(&kind) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn sample(&self, handle: RawHandle) -> Result<SampleInfo, Failure> {
        self.samples
            .get(&(handle as usize))
            .copied()
            .ok_or_else(|| fail(format!("{handle:p} is not a sample")))
    }

    fn alloc_sample(&mut self, id: i32, frame_id: i32) -> usize {
        let handle = self.alloc();
        self.samples.insert(handle, SampleInfo { id, frame_id });
        handle
    }

    fn dynamic_index(&mut self, handle: RawHandle) -> Result<&mut DynamicIndex, Failure> {
        self.dynamic_indexes
            .get_mut(&(handle as usize))
            .ok_or_else(|| fail(format!("{handle:p} is not a dynamic index")))
    }
}

pub(crate) struct FakeEngine {
    state: Mutex<State>,
}

impl FakeEngine {
    pub(crate) const MATCH_RESULT: MatchResult = MatchResult {
        distance: 0.5,
        fa_r: 1e-5,
        fr_r: 0.02,
        score: 0.93,
    };

    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                reprojection_error: 0.5,
                ..State::default()
            }),
        })
    }

    pub(crate) fn stats(&self) -> Stats {
        self.state.lock().stats.clone()
    }

    /// A fresh object handle the engine would release with `apiObject_destructor`.
    pub(crate) fn alloc_object(&self) -> RawHandle {
        self.state.lock().alloc() as RawHandle
    }

    pub(crate) fn alloc_sample(&self, id: i32, frame_id: i32) -> RawHandle {
        self.state.lock().alloc_sample(id, frame_id) as RawHandle
    }

    /// An exception object as an engine call would leave it.
    pub(crate) fn raise(&self, code: u32, message: &str) -> RawHandle {
        self.raise_bytes(code, message.as_bytes())
    }

    pub(crate) fn raise_bytes(&self, code: u32, message: &[u8]) -> RawHandle {
        self.state.lock().raise(code, message, false) as RawHandle
    }

    pub(crate) fn raise_tdv(&self, code: u32, message: &str) -> RawHandle {
        self.state.lock().raise(code, message.as_bytes(), true) as RawHandle
    }

    pub(crate) fn fail_next(&self, kind: Fail, code: u32, message: &str) {
        self.state
            .lock()
            .failures
            .insert(kind, (code, message.to_string()));
    }

    pub(crate) fn set_capture_count(&self, count: usize) {
        self.state.lock().capture_count = count;
    }

    pub(crate) fn set_landmarks(&self, landmarks: Vec<f32>) {
        self.state.lock().landmarks = landmarks;
    }

    /// Number of index entries every query finds.
    pub(crate) fn set_search_hits(&self, hits: usize) {
        self.state.lock().search_hits = hits;
    }

    pub(crate) fn set_reprojection_error(&self, error: f32) {
        self.state.lock().reprojection_error = error;
    }

    /// Config files received by capturer and video worker constructors.
    pub(crate) fn configs(&self) -> Vec<RecordedConfig> {
        self.state.lock().configs.clone()
    }

    /// Runs `f` on the state and converts a failure into an exception.
    unsafe fn guarded<T: Default>(
        &self,
        exception: ExceptionOut,
        tdv: bool,
        f: impl FnOnce(&mut State) -> Result<T, Failure>,
    ) -> T {
        let mut state = self.state.lock();
        match f(&mut state) {
            Ok(value) => value,
            Err((code, message)) => {
                let raised = state.raise(code, message.as_bytes(), tdv);
                if !exception.is_null() {
                    *exception = raised as RawHandle;
                }
                T::default()
            }
        }
    }

    unsafe fn api_call<T: Default>(
        &self,
        exception: ExceptionOut,
        f: impl FnOnce(&mut State) -> Result<T, Failure>,
    ) -> T {
        self.guarded(exception, false, f)
    }

    unsafe fn tdv_call<T: Default>(
        &self,
        exception: ExceptionOut,
        f: impl FnOnce(&mut State) -> Result<T, Failure>,
    ) -> T {
        self.guarded(exception, true, f)
    }

    unsafe fn write_name(
        &self,
        stream: *mut c_void,
        write: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |_| {
            write_bytes(stream, write, METHOD_NAME.as_bytes());
            Ok(())
        })
    }
}

impl CoreApi for FakeEngine {
    unsafe fn api_object_destructor(&self, object: RawHandle) {
        let handle = object as usize;
        let mut state = self.state.lock();
        if state.exceptions.remove(&handle).is_some() {
            state.stats.exceptions_freed += 1;
            return;
        }
        state.samples.remove(&handle);
        state.templates_indexes.remove(&handle);
        if state.worker.as_ref().is_some_and(|w| w.handle == handle) {
            state.worker = None;
        }
        state.stats.objects_destroyed += 1;
    }

    unsafe fn api_exception_code(&self, exception: RawHandle) -> u32 {
        let state = self.state.lock();
        state.exceptions.get(&(exception as usize)).map_or(0, |e| e.code)
    }

    unsafe fn api_exception_what(&self, exception: RawHandle) -> *const c_char {
        let state = self.state.lock();
        state
            .exceptions
            .get(&(exception as usize))
            .map_or(std::ptr::null(), |e| e.message.as_ptr())
    }

    unsafe fn get_version(
        &self,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |_| {
            write_bytes(stream, write_func, LIBFACEREC_VERSION.as_bytes());
            Ok(())
        })
    }

    unsafe fn struct_storage_get_int64(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: ExceptionOut,
    ) -> i64 {
        let storage = &*(storage as *const FakeStorage);
        self.api_call(exception, |_| storage.int64(field_id))
    }

    unsafe fn struct_storage_get_double(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: ExceptionOut,
    ) -> f64 {
        let storage = &*(storage as *const FakeStorage);
        self.api_call(exception, |_| storage.double(field_id))
    }

    unsafe fn struct_storage_get_pointer(
        &self,
        storage: *const c_void,
        field_id: i32,
        exception: ExceptionOut,
    ) -> *mut c_void {
        let storage = &*(storage as *const FakeStorage);
        self.api_call(exception, |_| Ok(storage.pointer(field_id))) as RawHandle
    }
}

impl ServiceApi for FakeEngine {
    unsafe fn facerec_service_constructor3(
        &self,
        _ae_ptr: *mut c_void,
        _conf_dir: *const c_char,
        _license_dir: *const c_char,
        _dll_path: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| Ok(s.alloc())) as RawHandle
    }

    unsafe fn facerec_service_constructor5(
        &self,
        _ae_ptr: *mut c_void,
        _conf_dir: *const c_char,
        license: *const c_char,
        _dll_path: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle {
        let license = c_string(license);
        self.api_call(exception, |s| {
            if license.is_empty() {
                return Err(fail("empty license"));
            }
            Ok(s.alloc())
        }) as RawHandle
    }

    unsafe fn facerec_service_toggle_algorithms_cache_kepp(
        &self,
        _cache_keep_enabled: i32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |_| Ok(()))
    }

    unsafe fn facerec_service_force_online_license_update(
        &self,
        _service: RawHandle,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |_| Err(fail("online license is not enabled")))
    }

    unsafe fn facerec_service_create_capturer_e(
        &self,
        _service: RawHandle,
        config: &RawConfigArgs,
        exception: ExceptionOut,
    ) -> RawHandle {
        let recorded = RecordedConfig::read(config);
        self.api_call(exception, |s| {
            s.configs.push(recorded);
            Ok(s.alloc())
        }) as RawHandle
    }

    unsafe fn facerec_service_create_recognizer2(
        &self,
        _service: RawHandle,
        ini_file: *const c_char,
        _processing: i32,
        _matching: i32,
        _processing_less_memory_consumption: i32,
        exception: ExceptionOut,
    ) -> RawHandle {
        let ini_file = c_string(ini_file);
        self.api_call(exception, |s| {
            if !ini_file.ends_with(".xml") {
                return Err(fail(format!("cannot open '{ini_file}'")));
            }
            Ok(s.alloc())
        }) as RawHandle
    }

    unsafe fn facerec_service_create_video_worker_sti_age_gender_emotions(
        &self,
        _service: RawHandle,
        args: &RawVideoWorkerArgs,
        exception: ExceptionOut,
    ) -> RawHandle {
        let worker_config = RecordedConfig::read(&args.video_worker_config);
        let recognizer_config = RecordedConfig::read(&args.recognizer_config);
        self.api_call(exception, |s| {
            s.take_failure(Fail::CreateVideoWorker)?;
            let handle = s.alloc();
            s.configs.push(worker_config);
            s.configs.push(recognizer_config);
            s.worker = Some(worker::Worker::new(handle, args));
            Ok(handle)
        }) as RawHandle
    }

    unsafe fn facerec_service_load_raw_sample(
        &self,
        _service: RawHandle,
        stream: *mut c_void,
        read_func: BinaryStreamReadFunc,
        exception: ExceptionOut,
    ) -> RawHandle {
        let blob: [u8; 12] = read_bytes(stream, read_func);
        self.api_call(exception, |s| {
            if &blob[..4] != SAMPLE_MAGIC {
                return Err(fail("not a serialized sample"));
            }
            let id = i32::from_le_bytes([blob[4], blob[5], blob[6], blob[7]]);
            let frame_id = i32::from_le_bytes([blob[8], blob[9], blob[10], blob[11]]);
            Ok(s.alloc_sample(id, frame_id))
        }) as RawHandle
    }

    unsafe fn facerec_service_create_camera_calibrator(
        &self,
        _service: RawHandle,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| Ok(s.alloc())) as RawHandle
    }

    unsafe fn facerec_service_create_dynamic_template_index_2(
        &self,
        _service: RawHandle,
        config: *const c_void,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| {
            let config = config as usize;
            for key in ["modification", "version"] {
                if s.contexts.child(config, key).is_none() {
                    return Err(fail(format!("dynamic index config lacks '{key}'")));
                }
            }
            let capacity = s
                .contexts
                .child(config, "max_license_count")
                .and_then(|node| s.contexts.long(node))
                .unwrap_or(1000);
            let handle = s.alloc();
            s.dynamic_indexes.insert(
                handle,
                DynamicIndex {
                    uuids: Vec::new(),
                    capacity: capacity.max(0) as usize,
                },
            );
            Ok(handle)
        }) as RawHandle
    }

    unsafe fn facerec_service_processing_block_create_processing_block(
        &self,
        _service: RawHandle,
        context: RawHandle,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| {
            let unit_type = s
                .contexts
                .child(context as usize, "unit_type")
                .and_then(|node| s.contexts.string(node))
                .ok_or_else(|| fail("processing block config lacks 'unit_type'"))?;
            let handle = s.alloc();
            s.blocks.insert(handle, unit_type);
            Ok(handle)
        }) as RawHandle
    }
}

impl CapturerApi for FakeEngine {
    unsafe fn capturer_capture_raw_image_with_crop(
        &self,
        _capturer: RawHandle,
        _image: &RawImageArgs,
        result_pointers_vector: *mut c_void,
        assign_func: AssignPointersVectorFunc,
        exception: ExceptionOut,
    ) {
        self.capture(result_pointers_vector, assign_func, exception)
    }

    unsafe fn capturer_capture_encoded_image(
        &self,
        _capturer: RawHandle,
        _data: *const c_void,
        _data_size: i32,
        result_pointers_vector: *mut c_void,
        assign_func: AssignPointersVectorFunc,
        exception: ExceptionOut,
    ) {
        self.capture(result_pointers_vector, assign_func, exception)
    }

    unsafe fn capturer_reset_history(&self, _capturer: RawHandle, exception: ExceptionOut) {
        self.api_call(exception, |_| Ok(()))
    }

    unsafe fn capturer_get_type(&self, _capturer: RawHandle, exception: ExceptionOut) -> i32 {
        self.api_call(exception, |_| Ok(0))
    }

    unsafe fn capturer_set_parameter(
        &self,
        _capturer: RawHandle,
        name: *const c_char,
        _value: f64,
        exception: ExceptionOut,
    ) {
        let name = c_string(name);
        self.api_call(exception, |_| {
            if name.is_empty() {
                return Err(fail("empty parameter name"));
            }
            Ok(())
        })
    }
}

impl FakeEngine {
    unsafe fn capture(
        &self,
        vector: *mut c_void,
        assign: AssignPointersVectorFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.stats.captures += 1;
            s.take_failure(Fail::Capture)?;
            let pointers: Vec<*mut c_void> = (0..s.capture_count)
                .map(|i| s.alloc_sample(i as i32, 0) as RawHandle)
                .collect();
            assign(vector, pointers.as_ptr(), pointers.len() as i32);
            Ok(())
        })
    }
}

impl RawSampleApi for FakeEngine {
    unsafe fn raw_sample_get_rectangle(
        &self,
        sample: RawHandle,
        x: *mut i32,
        y: *mut i32,
        width: *mut i32,
        height: *mut i32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.sample(sample)?;
            *x = 10;
            *y = 20;
            *width = 30;
            *height = 40;
            Ok(())
        })
    }

    unsafe fn raw_sample_get_landmarks(
        &self,
        sample: RawHandle,
        floats_vector: *mut c_void,
        assign_func: AssignFloatsVectorFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.sample(sample)?;
            assign_func(floats_vector, s.landmarks.as_ptr(), s.landmarks.len() as i32);
            Ok(())
        })
    }

    unsafe fn raw_sample_get_left_eye(
        &self,
        sample: RawHandle,
        x: *mut f32,
        y: *mut f32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.sample(sample)?;
            *x = 15.0;
            *y = 25.0;
            Ok(())
        })
    }

    unsafe fn raw_sample_get_right_eye(
        &self,
        sample: RawHandle,
        x: *mut f32,
        y: *mut f32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.sample(sample)?;
            *x = 35.0;
            *y = 25.0;
            Ok(())
        })
    }

    unsafe fn raw_sample_get_angles(
        &self,
        sample: RawHandle,
        yaw: *mut f32,
        pitch: *mut f32,
        roll: *mut f32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.sample(sample)?;
            *yaw = 1.0;
            *pitch = 2.0;
            *roll = 3.0;
            Ok(())
        })
    }

    unsafe fn raw_sample_get_id(&self, sample: RawHandle, exception: ExceptionOut) -> i32 {
        self.api_call(exception, |s| s.sample(sample).map(|info| info.id))
    }

    unsafe fn raw_sample_get_type(&self, sample: RawHandle, exception: ExceptionOut) -> i32 {
        self.api_call(exception, |s| s.sample(sample).map(|_| 0))
    }

    unsafe fn raw_sample_get_frame_id(&self, sample: RawHandle, exception: ExceptionOut) -> i32 {
        self.api_call(exception, |s| s.sample(sample).map(|info| info.frame_id))
    }

    unsafe fn raw_sample_has_original_image(
        &self,
        sample: RawHandle,
        exception: ExceptionOut,
    ) -> i32 {
        self.api_call(exception, |s| s.sample(sample).map(|_| 1))
    }

    unsafe fn raw_sample_save(
        &self,
        sample: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        _format: i32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            let info = s.sample(sample)?;
            let mut blob = SAMPLE_MAGIC.to_vec();
            blob.extend_from_slice(&info.id.to_le_bytes());
            blob.extend_from_slice(&info.frame_id.to_le_bytes());
            write_bytes(stream, write_func, &blob);
            Ok(())
        })
    }
}

impl TemplateApi for FakeEngine {
    unsafe fn template_get_method_name(
        &self,
        _templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.write_name(stream, write_func, exception)
    }

    unsafe fn template_save(
        &self,
        templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |_| {
            let mut blob = TEMPLATE_MAGIC.to_vec();
            blob.extend_from_slice(&(templ as usize as u32).to_le_bytes());
            write_bytes(stream, write_func, &blob);
            Ok(())
        })
    }

    unsafe fn templates_index_get_method_name(
        &self,
        _index: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.write_name(stream, write_func, exception)
    }

    unsafe fn templates_index_size(&self, index: RawHandle, exception: ExceptionOut) -> i64 {
        self.api_call(exception, |s| {
            s.templates_indexes
                .get(&(index as usize))
                .copied()
                .ok_or_else(|| fail("unknown templates index"))
        })
    }

    unsafe fn templates_index_at(
        &self,
        index: RawHandle,
        position: i64,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| {
            let size = s.templates_indexes.get(&(index as usize)).copied().unwrap_or(0);
            if position < 0 || position >= size {
                return Err(fail(format!("position {position} out of range")));
            }
            Ok(s.alloc())
        }) as RawHandle
    }

    unsafe fn templates_index_reserve_search_memory(
        &self,
        _index: RawHandle,
        _queries_count: i64,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |_| Ok(()))
    }

    unsafe fn context_template_get_method_name(
        &self,
        _templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.write_name(stream, write_func, exception)
    }

    unsafe fn context_template_save(
        &self,
        templ: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            let uuid = s
                .context_templates
                .get(&(templ as usize))
                .ok_or_else(|| fail("unknown context template"))?;
            write_bytes(stream, write_func, uuid.as_bytes());
            Ok(())
        })
    }

    unsafe fn context_template_size(&self, templ: RawHandle, exception: ExceptionOut) -> i32 {
        self.api_call(exception, |s| {
            s.context_templates
                .get(&(templ as usize))
                .map(|uuid| uuid.len() as i32)
                .ok_or_else(|| fail("unknown context template"))
        })
    }

    unsafe fn context_template_destructor(&self, templ: RawHandle) {
        let mut state = self.state.lock();
        state.context_templates.remove(&(templ as usize));
        state.stats.context_templates_destroyed += 1;
    }

    unsafe fn dynamic_template_index_get_method_name(
        &self,
        _index: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.write_name(stream, write_func, exception)
    }

    unsafe fn dynamic_template_index_size(&self, index: RawHandle, exception: ExceptionOut) -> u64 {
        self.api_call(exception, |s| Ok(s.dynamic_index(index)?.uuids.len() as u64))
    }

    unsafe fn dynamic_template_index_capacity(
        &self,
        index: RawHandle,
        exception: ExceptionOut,
    ) -> u64 {
        self.api_call(exception, |s| Ok(s.dynamic_index(index)?.capacity as u64))
    }

    unsafe fn dynamic_template_index_add_1(
        &self,
        index: RawHandle,
        _templ: *const c_void,
        uuid: *const c_char,
        exception: ExceptionOut,
    ) {
        let uuid = c_string(uuid);
        self.api_call(exception, |s| s.dynamic_index(index)?.add(uuid))
    }

    unsafe fn dynamic_template_index_add_3(
        &self,
        index: RawHandle,
        _context_template: *const c_void,
        uuid: *const c_char,
        exception: ExceptionOut,
    ) {
        let uuid = c_string(uuid);
        self.api_call(exception, |s| s.dynamic_index(index)?.add(uuid))
    }

    unsafe fn dynamic_template_index_remove_1(
        &self,
        index: RawHandle,
        uuid: *const c_char,
        exception: ExceptionOut,
    ) {
        let uuid = c_string(uuid);
        self.api_call(exception, |s| s.dynamic_index(index)?.remove(&uuid))
    }

    unsafe fn dynamic_template_index_remove_2(
        &self,
        index: RawHandle,
        uuids: *const *const c_char,
        size: u64,
        exception: ExceptionOut,
    ) {
        let uuids: Vec<String> = if size == 0 {
            Vec::new()
        } else {
            slice::from_raw_parts(uuids, size as usize)
                .iter()
                .map(|&u| c_string(u))
                .collect()
        };
        self.api_call(exception, |s| {
            let index = s.dynamic_index(index)?;
            uuids.iter().try_for_each(|uuid| index.remove(uuid))
        })
    }

    unsafe fn dynamic_template_index_concatenate(
        &self,
        index: RawHandle,
        other: RawHandle,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            let moved = std::mem::take(&mut s.dynamic_index(other)?.uuids);
            let target = s.dynamic_index(index)?;
            moved.into_iter().try_for_each(|uuid| target.add(uuid))
        })
    }

    unsafe fn dynamic_template_index_clear(&self, index: RawHandle, exception: ExceptionOut) {
        self.api_call(exception, |s| {
            s.dynamic_index(index)?.uuids.clear();
            Ok(())
        })
    }

    unsafe fn dynamic_template_index_at_by_index(
        &self,
        index: RawHandle,
        position: i64,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            let uuid = s.dynamic_index(index)?.uuid_at(position)?;
            write_bytes(stream, write_func, uuid.as_bytes());
            Ok(())
        })
    }

    unsafe fn dynamic_template_index_at_by_uuid(
        &self,
        index: RawHandle,
        uuid: *const c_char,
        exception: ExceptionOut,
    ) -> RawHandle {
        let uuid = c_string(uuid);
        self.api_call(exception, |s| {
            if !s.dynamic_index(index)?.uuids.contains(&uuid) {
                return Err(fail(format!("uuid '{uuid}' not found")));
            }
            let handle = s.alloc();
            s.context_templates.insert(handle, uuid);
            Ok(handle)
        }) as RawHandle
    }

    unsafe fn dynamic_template_index_get(
        &self,
        index: RawHandle,
        position: i64,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| {
            let uuid = s.dynamic_index(index)?.uuid_at(position)?;
            let handle = s.alloc();
            s.context_templates.insert(handle, uuid);
            Ok(handle)
        }) as RawHandle
    }

    unsafe fn dynamic_template_index_destructor(&self, index: RawHandle) {
        let mut state = self.state.lock();
        state.dynamic_indexes.remove(&(index as usize));
        state.stats.dynamic_indexes_destroyed += 1;
    }
}

impl DynamicIndex {
    fn add(&mut self, uuid: String) -> Result<(), Failure> {
        if self.uuids.contains(&uuid) {
            return Err(fail(format!("uuid '{uuid}' already present")));
        }
        if self.uuids.len() >= self.capacity {
            return Err(fail("dynamic index is full"));
        }
        self.uuids.push(uuid);
        Ok(())
    }

    fn remove(&mut self, uuid: &str) -> Result<(), Failure> {
        let position = self
            .uuids
            .iter()
            .position(|u| u == uuid)
            .ok_or_else(|| fail(format!("uuid '{uuid}' not found")))?;
        self.uuids.remove(position);
        Ok(())
    }

    fn uuid_at(&self, position: i64) -> Result<String, Failure> {
        usize::try_from(position)
            .ok()
            .and_then(|p| self.uuids.get(p))
            .cloned()
            .ok_or_else(|| fail(format!("position {position} out of range")))
    }
}

impl FakeEngine {
    unsafe fn roc_point(&self, result: &mut RawMatchResult, exception: ExceptionOut) {
        self.api_call(exception, |_| {
            let m = Self::MATCH_RESULT;
            *result = RawMatchResult {
                distance: m.distance,
                fa_r: m.fa_r,
                fr_r: m.fr_r,
                score: m.score,
            };
            Ok(())
        })
    }
}

impl RecognizerApi for FakeEngine {
    unsafe fn recognizer_get_method_name(
        &self,
        _recognizer: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.write_name(stream, write_func, exception)
    }

    unsafe fn recognizer_processing(
        &self,
        _recognizer: RawHandle,
        sample: *const c_void,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| {
            s.sample(sample as RawHandle)?;
            Ok(s.alloc())
        }) as RawHandle
    }

    unsafe fn recognizer_load_template(
        &self,
        _recognizer: RawHandle,
        stream: *mut c_void,
        read_func: BinaryStreamReadFunc,
        exception: ExceptionOut,
    ) -> RawHandle {
        let blob: [u8; 8] = read_bytes(stream, read_func);
        self.api_call(exception, |s| {
            if &blob[..4] != TEMPLATE_MAGIC {
                return Err(fail("not a serialized template"));
            }
            Ok(s.alloc())
        }) as RawHandle
    }

    unsafe fn recognizer_verify_match_v2(
        &self,
        _recognizer: RawHandle,
        _template1: *const c_void,
        _template2: *const c_void,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    ) {
        self.roc_point(result, exception)
    }

    unsafe fn recognizer_create_index(
        &self,
        _recognizer: RawHandle,
        templates_count: i64,
        _templates: *const *const c_void,
        _search_threads_count: i32,
        exception: ExceptionOut,
    ) -> RawHandle {
        self.api_call(exception, |s| {
            let handle = s.alloc();
            s.templates_indexes.insert(handle, templates_count);
            Ok(handle)
        }) as RawHandle
    }

    unsafe fn recognizer_search_v2(
        &self,
        _recognizer: RawHandle,
        _acceleration: i32,
        queries_count: i32,
        _query_templates: *const *const c_void,
        _templates_index: *const c_void,
        k: i64,
        result_i: *mut i64,
        result_distance: *mut f32,
        result_far: *mut f32,
        result_frr: *mut f32,
        result_score: *mut f32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            s.stats.searches += 1;
            let k = k as usize;
            let total = queries_count as usize * k;
            let ids = slice::from_raw_parts_mut(result_i, total);
            let distance = slice::from_raw_parts_mut(result_distance, total);
            let far = slice::from_raw_parts_mut(result_far, total);
            let frr = slice::from_raw_parts_mut(result_frr, total);
            let score = slice::from_raw_parts_mut(result_score, total);
            for slot in 0..total {
                let rank = slot % k;
                if rank < s.search_hits {
                    ids[slot] = rank as i64;
                    distance[slot] = 0.1 * (rank + 1) as f32;
                    far[slot] = 1e-6;
                    frr[slot] = 0.01;
                    score[slot] = 1.0 - distance[slot];
                } else {
                    ids[slot] = -1;
                }
            }
            Ok(())
        })
    }

    unsafe fn recognizer_get_roc_curve_point_by_distance_threshold_v2(
        &self,
        _recognizer: RawHandle,
        _distance_threshold: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    ) {
        self.roc_point(result, exception)
    }

    unsafe fn recognizer_get_roc_curve_point_by_far_v2(
        &self,
        _recognizer: RawHandle,
        _desired_far: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    ) {
        self.roc_point(result, exception)
    }

    unsafe fn recognizer_get_roc_curve_point_by_frr_v2(
        &self,
        _recognizer: RawHandle,
        _desired_frr: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    ) {
        self.roc_point(result, exception)
    }

    unsafe fn recognizer_get_roc_curve_point_by_score_threshold(
        &self,
        _recognizer: RawHandle,
        _score_threshold: f64,
        result: &mut RawMatchResult,
        exception: ExceptionOut,
    ) {
        self.roc_point(result, exception)
    }
}

impl CalibratorApi for FakeEngine {
    unsafe fn camera_calibrator_init_calibration(
        &self,
        _calibrator: RawHandle,
        settings: &RawCalibrationArgs,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            if settings.pattern_width <= 0 || settings.pattern_height <= 0 {
                return Err(fail("empty calibration pattern"));
            }
            s.pattern_points = (settings.pattern_width * settings.pattern_height) as usize;
            Ok(())
        })
    }

    unsafe fn camera_calibrator_add_image_with_crop(
        &self,
        _calibrator: RawHandle,
        _image: &RawImageArgs,
        pattern_found: *mut i32,
        pattern_accepted: *mut i32,
        pattern_out: *mut f32,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            let found = s.pattern_points > 0;
            *pattern_found = found as i32;
            *pattern_accepted = found as i32;
            if found && !pattern_out.is_null() {
                fill_pattern(pattern_out, s.pattern_points);
            }
            Ok(())
        })
    }

    unsafe fn camera_calibrator_get_pattern_space_cover_progress(
        &self,
        _calibrator: RawHandle,
        exception: ExceptionOut,
    ) -> f32 {
        self.api_call(exception, |_| Ok(0.25))
    }

    unsafe fn camera_calibrator_get_tip(
        &self,
        _calibrator: RawHandle,
        pattern_out: *mut f32,
        exception: ExceptionOut,
    ) -> i32 {
        self.api_call(exception, |s| {
            if s.pattern_points == 0 || pattern_out.is_null() {
                return Ok(0);
            }
            fill_pattern(pattern_out, s.pattern_points);
            Ok(1)
        })
    }

    unsafe fn camera_calibrator_calibrate(
        &self,
        _calibrator: RawHandle,
        _max_used_patterns_count: i32,
        exception: ExceptionOut,
    ) -> f32 {
        self.api_call(exception, |s| Ok(s.reprojection_error))
    }

    unsafe fn camera_calibrator_save_camera_parameters(
        &self,
        _calibrator: RawHandle,
        stream: *mut c_void,
        write_func: BinaryStreamWriteFunc,
        exception: ExceptionOut,
    ) {
        self.api_call(exception, |s| {
            let mut blob = CAMERA_MAGIC.to_vec();
            blob.extend_from_slice(&s.reprojection_error.to_le_bytes());
            write_bytes(stream, write_func, &blob);
            Ok(())
        })
    }

    unsafe fn camera_calibrator_load_camera_parameters(
        &self,
        _calibrator: RawHandle,
        stream: *mut c_void,
        read_func: BinaryStreamReadFunc,
        exception: ExceptionOut,
    ) {
        let blob: [u8; 8] = read_bytes(stream, read_func);
        self.api_call(exception, |s| {
            if &blob[..4] != CAMERA_MAGIC {
                return Err(fail("not a camera parameters file"));
            }
            s.reprojection_error = f32::from_le_bytes([blob[4], blob[5], blob[6], blob[7]]);
            Ok(())
        })
    }
}

unsafe fn fill_pattern(out: *mut f32, points: usize) {
    let coords = slice::from_raw_parts_mut(out, points * 2);
    for (i, c) in coords.iter_mut().enumerate() {
        *c = i as f32;
    }
}
