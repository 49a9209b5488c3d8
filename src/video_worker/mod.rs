//! Multi-stream face tracking, template creation and database matching.
//!
//! A [`VideoWorker`] accepts frames from several video streams and reports
//! what it finds through callbacks running on engine threads:
//!
//! - tracking: faces found on a frame, with per-face checks and estimations;
//! - template created: a template was built for a tracked face;
//! - match found: a template was matched against the database;
//! - tracking lost: a track ended, with its best sample;
//! - STI person outdated: a short-time identification group expired.
//!
//! Every callback style of the engine is available: the struct style
//! (`*_u`), the extended match-found style and the positional style. For one
//! event they run in that order, each in registration order.
//!
//! # Ordering
//!
//! For a given stream, tracking callbacks see strictly increasing frame
//! ids, and once a track was reported lost no later callback mentions it.
//! Events that would break either rule are held back or dropped (see
//! [`VideoWorkerParams::reorder_window`]).
//!
//! # Example
//!
//! ```no_run
//! use facerec::{Config, FacerecService, ServiceConfig, VideoWorkerParams};
//!
//! let service = FacerecService::create_service(ServiceConfig::new("/opt/face_sdk/conf/facerec"))?;
//! let worker = service.create_video_worker(
//!     &VideoWorkerParams::new(Config::new("video_worker_fdatracker.xml"))
//!         .recognizer_ini_file("method12v30_recognizer.xml")
//!         .streams_count(1)
//!         .processing_threads_count(1)
//!         .matching_threads_count(1),
//! )?;
//! worker.add_tracking_callback_u(|data| {
//!     println!("frame {}: {} faces", data.frame_id, data.samples.len());
//!     Ok(())
//! })?;
//! # Ok::<(), facerec::FacerecError>(())
//! ```
//!
//! Callbacks must not keep the worker alive by capturing a clone of it, and
//! must not drop the last clone: the native destructor waits for the thread
//! the callback runs on.

pub(crate) mod events;
mod gate;
mod registry;
mod storage;
mod trampoline;

pub use events::{
    CallbackResult, DatabaseElement, MatchFoundCallbackData, SearchResult,
    StiPersonOutdatedCallbackData, TemplateCreatedCallbackData, TrackingCallbackData,
    TrackingLostCallbackData,
};

use crate::config::VideoWorkerParams;
use crate::error::{FacerecError, Result, CALLBACK_FAILED_ERROR_CODE};
use crate::exception::call;
use crate::ffi::adapters::collect_string;
use crate::ffi::{
    ExceptionOut, FacerecApi, RawHandle, RawVideoWorkerArgs, VIDEO_WORKER_AGE_GENDER_DISABLE,
    VIDEO_WORKER_AGE_GENDER_ENABLE, VIDEO_WORKER_EMOTIONS_DISABLE, VIDEO_WORKER_EMOTIONS_ENABLE,
    VIDEO_WORKER_PROCESSING_DISABLE, VIDEO_WORKER_PROCESSING_ENABLE,
};
use crate::handle::{create_object, NativeObject, ObjectKind};
use crate::raw_sample::RawSample;
use crate::service::FacerecService;
use crate::template::Template;
use crate::types::{DepthMap, MatchResult, RawImage, SearchAccelerationType};
use gate::{Envelope, StreamGate};
use parking_lot::{Condvar, Mutex};
use registry::{CallbackKind, Handler, Registry};
use std::collections::{HashMap, VecDeque};
use std::ffi::{c_void, CString};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, error, info};

/// Events of one stream on their way to the callbacks.
struct Channel {
    gate: StreamGate,
    queue: VecDeque<Envelope>,
    /// Set while some thread delivers this stream's queue
    draining: bool,
    /// Bumped by `reset_stream`; deliveries of older generations stop
    generation: u64,
    /// Thread running callbacks for an event, with that event's generation
    in_flight: Option<(ThreadId, u64)>,
}

struct Stream {
    channel: Mutex<Channel>,
    idle: Condvar,
}

/// Clears the draining state even if dispatch unwinds.
struct DrainGuard<'a> {
    stream: &'a Stream,
    armed: bool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut channel = self.stream.channel.lock();
            channel.draining = false;
            channel.in_flight = None;
            self.stream.idle.notify_all();
        }
    }
}

/// State reachable from the trampolines through the engine's `this_vw`.
pub(crate) struct WorkerShared {
    api: Arc<dyn FacerecApi>,
    reorder_window: usize,
    registry: Mutex<Registry>,
    streams: Mutex<HashMap<i32, Arc<Stream>>>,
    /// First callback failure that had no engine error stream to go to
    failure: Mutex<Option<String>>,
}

impl WorkerShared {
    fn new(api: Arc<dyn FacerecApi>, reorder_window: usize) -> Self {
        Self {
            api,
            reorder_window,
            registry: Mutex::new(Registry::default()),
            streams: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
        }
    }

    fn stream(&self, stream_id: i32) -> Arc<Stream> {
        self.streams
            .lock()
            .entry(stream_id)
            .or_insert_with(|| {
                Arc::new(Stream {
                    channel: Mutex::new(Channel {
                        gate: StreamGate::new(stream_id, self.reorder_window),
                        queue: VecDeque::new(),
                        draining: false,
                        generation: 0,
                        in_flight: None,
                    }),
                    idle: Condvar::new(),
                })
            })
            .clone()
    }

    /// Passes an event through its stream's gate; returns the stream id.
    fn enqueue(&self, envelope: Envelope) -> i32 {
        let stream_id = envelope.event.stream_id();
        let stream = self.stream(stream_id);
        let mut channel = stream.channel.lock();
        let mut ready = Vec::new();
        channel.gate.accept(envelope, &mut ready);
        channel.queue.extend(ready);
        stream_id
    }

    fn frame_submitted(&self, stream_id: i32, frame_id: i32) {
        self.stream(stream_id).channel.lock().gate.frame_submitted(frame_id);
    }

    fn reset_tracker(&self, stream_id: i32) {
        let stream = self.stream(stream_id);
        let mut channel = stream.channel.lock();
        let mut ready = Vec::new();
        channel.gate.reset_tracker(&mut ready);
        channel.queue.extend(ready);
    }

    /// Drops everything queued or held for the stream and waits for
    /// callbacks already running for it on other threads.
    fn reset_stream(&self, stream_id: i32, threshold: i32) {
        let stream = self.stream(stream_id);
        let mut channel = stream.channel.lock();
        channel.gate.reset_stream(threshold);
        let dropped = channel.queue.len();
        channel.queue.clear();
        channel.generation += 1;
        if dropped > 0 {
            debug!("Dropped {} queued events of stream {}", dropped, stream_id);
        }

        let current = thread::current().id();
        let generation = channel.generation;
        while channel
            .in_flight
            .is_some_and(|(thread, g)| thread != current && g < generation)
        {
            stream.idle.wait(&mut channel);
        }
    }

    /// Delivers the stream's queued events until the queue is empty.
    ///
    /// Only one thread drains a stream at a time; others return at once and
    /// leave their events to it. No lock is held while callbacks run.
    fn drain(&self, stream_id: i32, report: &dyn Fn(&str)) {
        let stream = self.stream(stream_id);
        {
            let mut channel = stream.channel.lock();
            if channel.draining {
                return;
            }
            channel.draining = true;
        }
        let mut guard = DrainGuard {
            stream: &*stream,
            armed: true,
        };
        let current = thread::current().id();
        loop {
            let (envelope, generation) = {
                let mut channel = stream.channel.lock();
                channel.in_flight = None;
                stream.idle.notify_all();
                match channel.queue.pop_front() {
                    Some(envelope) => {
                        let generation = channel.generation;
                        channel.in_flight = Some((current, generation));
                        (envelope, generation)
                    }
                    None => {
                        channel.draining = false;
                        guard.armed = false;
                        return;
                    }
                }
            };
            let handlers = self.registry.lock().handlers(&envelope.targets);
            for handler in handlers {
                if stream.channel.lock().generation != generation {
                    break;
                }
                let outcome = catch_unwind(AssertUnwindSafe(|| handler.invoke(&envelope.event)));
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        report(&format!("VideoWorker {} failed: '{}'.", handler.name(), err))
                    }
                    Err(panic) => report(&format!(
                        "VideoWorker {} panicked: '{}'.",
                        handler.name(),
                        trampoline::panic_message(panic.as_ref())
                    )),
                }
            }
        }
    }

    /// Keeps the first failure for `VideoWorker::check_exceptions`.
    fn record_failure(&self, message: &str) {
        error!("{}", message);
        self.failure.lock().get_or_insert_with(|| message.to_string());
    }

    fn take_failure(&self) -> Option<String> {
        self.failure.lock().take()
    }
}

/// Tracking and recognition worker created with
/// [`FacerecService::create_video_worker`].
///
/// Clones share the native worker. All methods may be called from any
/// thread, including from inside the worker's own callbacks.
#[derive(Clone)]
pub struct VideoWorker {
    // Declared first: the native worker stops its threads before the state
    // they call into is released.
    object: Arc<NativeObject>,
    shared: Arc<WorkerShared>,
}

impl fmt::Debug for VideoWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoWorker")
            .field("object", &self.object)
            .field("callbacks", &self.shared.registry.lock().len())
            .finish()
    }
}

impl VideoWorker {
    pub(crate) fn create(service: &FacerecService, params: &VideoWorkerParams) -> Result<Self> {
        let (worker_config, recognizer_config) = params.prepare(service.conf_dir())?;
        let api = service.api_arc().clone();
        let shared = Arc::new(WorkerShared::new(api.clone(), params.reorder_window));

        let args = RawVideoWorkerArgs {
            tracking_callback: trampoline::tracking,
            template_created_callback: trampoline::template_created,
            match_found_callback: trampoline::match_found,
            tracking_lost_callback: trampoline::tracking_lost,
            sti_person_outdated_callback: trampoline::sti_person_outdated,
            video_worker_config: worker_config.as_args(),
            recognizer_config: recognizer_config.as_args(),
            streams_count: params.streams_count,
            processing_threads_count: params.processing_threads_count,
            matching_threads_count: params.matching_threads_count,
            short_time_identification_enabled: params.short_time_identification_enabled as u32,
            short_time_identification_distance_threshold: params
                .short_time_identification_distance_threshold,
            short_time_identification_outdate_time_seconds: params
                .short_time_identification_outdate_time_seconds,
            age_gender_threads_count: params.age_gender_estimation_threads_count,
            emotions_threads_count: params.emotions_estimation_threads_count,
        };

        let object = create_object(&api, ObjectKind::Api("VideoWorker"), |e| unsafe {
            api.facerec_service_create_video_worker_sti_age_gender_emotions(
                service.raw_handle(),
                &args,
                e,
            )
        })?;
        call(api.as_ref(), |e| unsafe {
            api.video_worker_set_this_vw(object.raw(), Arc::as_ptr(&shared) as *mut c_void, e)
        })?;

        info!(
            "Created video worker with {} streams, reorder window {}",
            params.streams_count, params.reorder_window
        );
        Ok(Self { object, shared })
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    pub fn method_name(&self) -> Result<String> {
        let api = self.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.video_worker_get_method_name(self.raw(), stream, write, e)
            })
        })
    }

    pub fn streams_count(&self) -> Result<i32> {
        let api = self.api();
        call(api, |e| unsafe { api.video_worker_get_streams_count(self.raw(), e) })
    }

    /// Number of frames of `stream_id` the tracker is still working on.
    pub fn tracking_conveyor_size(&self, stream_id: i32) -> Result<i32> {
        let api = self.api();
        call(api, |e| unsafe {
            api.video_worker_get_tracking_conveyor_size(self.raw(), stream_id, e)
        })
    }

    /// Replaces the database matched against on every stream.
    pub fn set_database(
        &self,
        elements: &[DatabaseElement],
        acceleration: SearchAccelerationType,
    ) -> Result<()> {
        let element_ids: Vec<u64> = elements.iter().map(|e| e.element_id).collect();
        let person_ids: Vec<u64> = elements.iter().map(|e| e.person_id).collect();
        let templates: Vec<*const c_void> = elements
            .iter()
            .map(|e| e.templ.raw() as *const c_void)
            .collect();
        let thresholds: Vec<f32> = elements.iter().map(|e| e.distance_threshold).collect();

        let api = self.api();
        call(api, |e| unsafe {
            api.video_worker_set_database(
                self.raw(),
                acceleration as i32,
                elements.len() as i32,
                element_ids.as_ptr(),
                person_ids.as_ptr(),
                templates.as_ptr(),
                thresholds.as_ptr(),
                e,
            )
        })?;
        debug!("Video worker database set to {} elements", elements.len());
        Ok(())
    }

    /// Queues a frame for processing and returns its frame id.
    ///
    /// Without a timestamp the engine stamps the frame itself.
    pub fn add_video_frame(
        &self,
        image: &RawImage<'_>,
        stream_id: i32,
        timestamp_microsec: Option<u64>,
    ) -> Result<i32> {
        let args = image.to_args()?;
        let api = self.api();
        let frame_id = call(api, |e| unsafe {
            api.video_worker_add_video_frame_with_timestamp_with_crop(
                self.raw(),
                &args,
                stream_id,
                timestamp_microsec.unwrap_or(u64::MAX),
                e,
            )
        })?;
        self.shared.frame_submitted(stream_id, frame_id);
        Ok(frame_id)
    }

    /// Adds a depth frame used for depth liveness on `stream_id`.
    pub fn add_depth_frame(
        &self,
        depth_map: &DepthMap<'_>,
        stream_id: i32,
        timestamp_microsec: u64,
    ) -> Result<()> {
        let args = depth_map.to_args()?;
        let api = self.api();
        call(api, |e| unsafe {
            api.video_worker_add_depth_frame(self.raw(), &args, stream_id, timestamp_microsec, e)
        })
    }

    /// Restarts tracking on `stream_id`; every current track gets lost.
    ///
    /// Frames still held back for ordering are discarded. Tracking-lost
    /// events waiting behind them are delivered, on this thread unless
    /// another one is already delivering the stream's events.
    pub fn reset_tracker_on_stream(&self, stream_id: i32) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe {
            api.video_worker_reset_tracker_on_stream(self.raw(), stream_id, e)
        })?;
        self.shared.reset_tracker(stream_id);
        self.shared
            .drain(stream_id, &|message: &str| self.shared.record_failure(message));
        Ok(())
    }

    /// Resets `stream_id` entirely.
    ///
    /// Returns the threshold track id: tracks below it will not be reported
    /// again and resources kept for them may be released. Waits for callbacks
    /// of this stream running on other threads; once it returns, no callback
    /// about earlier frames or tracks of the stream is invoked. Do not call it
    /// while holding a lock those callbacks need.
    pub fn reset_stream(&self, stream_id: i32) -> Result<i32> {
        let api = self.api();
        let threshold = call(api, |e| unsafe {
            api.video_worker_reset_stream(self.raw(), stream_id, e)
        })?;
        self.shared.reset_stream(stream_id, threshold);
        debug!("Stream {} reset, threshold track id {}", stream_id, threshold);
        Ok(threshold)
    }

    /// Returns the first failure recorded on the worker's threads, including
    /// errors and panics of callbacks.
    pub fn check_exceptions(&self) -> Result<()> {
        if let Some(message) = self.shared.take_failure() {
            return Err(FacerecError::assertion(CALLBACK_FAILED_ERROR_CODE, message));
        }
        let api = self.api();
        call(api, |e| unsafe { api.video_worker_check_exceptions(self.raw(), e) })
    }

    pub fn set_parameter(&self, parameter: &str, value: f64) -> Result<()> {
        let parameter = CString::new(parameter)?;
        let api = self.api();
        call(api, |e| unsafe {
            api.video_worker_set_parameter(self.raw(), parameter.as_ptr(), value, e)
        })
    }

    fn toggle(&self, stream_id: i32, something: i32) -> Result<()> {
        let api = self.api();
        call(api, |e| unsafe {
            api.video_worker_toggle_something(self.raw(), stream_id, something, e)
        })
    }

    pub fn enable_processing_on_stream(&self, stream_id: i32) -> Result<()> {
        self.toggle(stream_id, VIDEO_WORKER_PROCESSING_ENABLE)
    }

    pub fn disable_processing_on_stream(&self, stream_id: i32) -> Result<()> {
        self.toggle(stream_id, VIDEO_WORKER_PROCESSING_DISABLE)
    }

    pub fn enable_age_gender_estimation_on_stream(&self, stream_id: i32) -> Result<()> {
        self.toggle(stream_id, VIDEO_WORKER_AGE_GENDER_ENABLE)
    }

    pub fn disable_age_gender_estimation_on_stream(&self, stream_id: i32) -> Result<()> {
        self.toggle(stream_id, VIDEO_WORKER_AGE_GENDER_DISABLE)
    }

    pub fn enable_emotions_estimation_on_stream(&self, stream_id: i32) -> Result<()> {
        self.toggle(stream_id, VIDEO_WORKER_EMOTIONS_ENABLE)
    }

    pub fn disable_emotions_estimation_on_stream(&self, stream_id: i32) -> Result<()> {
        self.toggle(stream_id, VIDEO_WORKER_EMOTIONS_DISABLE)
    }

    fn register(
        &self,
        handler: Handler,
        add: impl FnOnce(*mut c_void, *mut c_void, ExceptionOut) -> i32,
    ) -> Result<i32> {
        let name = handler.name();
        let token = self.shared.registry.lock().reserve(handler);
        let owner = Arc::as_ptr(&self.shared) as *mut c_void;
        match call(self.api(), |e| add(owner, token as usize as *mut c_void, e)) {
            Ok(id) => {
                self.shared.registry.lock().bind(token, id);
                debug!("Registered {} with id {}", name, id);
                Ok(id)
            }
            Err(err) => {
                self.shared.registry.lock().discard(token);
                Err(err)
            }
        }
    }

    fn unregister(
        &self,
        kind: CallbackKind,
        callback_id: i32,
        remove: impl FnOnce(ExceptionOut),
    ) -> Result<()> {
        call(self.api(), remove)?;
        self.shared.registry.lock().remove(kind, callback_id);
        debug!("Removed {:?} callback {}", kind, callback_id);
        Ok(())
    }

    pub fn add_tracking_callback_u<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(&TrackingCallbackData) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(Handler::TrackingU(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_tracking_callback_u(self.raw(), func, userdata, e)
        })
    }

    /// Positional tracking callback: stream id, frame id, samples, weak
    /// flags and qualities.
    pub fn add_tracking_callback<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(i32, i32, &[RawSample], &[bool], &[f32]) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(Handler::Tracking(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_tracking_callback(self.raw(), func, userdata, e)
        })
    }

    /// Removes a tracking callback of either style.
    pub fn remove_tracking_callback(&self, callback_id: i32) -> Result<()> {
        let api = self.api();
        self.unregister(CallbackKind::Tracking, callback_id, |e| unsafe {
            api.video_worker_remove_tracking_callback(self.raw(), callback_id, e)
        })
    }

    pub fn add_template_created_callback_u<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(&TemplateCreatedCallbackData) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(Handler::TemplateCreatedU(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_template_created_callback_u(self.raw(), func, userdata, e)
        })
    }

    /// Positional template-created callback: stream id, frame id, sample,
    /// quality and template.
    pub fn add_template_created_callback<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(i32, i32, &RawSample, f32, &Template) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(Handler::TemplateCreated(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_template_created_callback(self.raw(), func, userdata, e)
        })
    }

    pub fn remove_template_created_callback(&self, callback_id: i32) -> Result<()> {
        let api = self.api();
        self.unregister(CallbackKind::TemplateCreated, callback_id, |e| unsafe {
            api.video_worker_remove_template_created_callback(self.raw(), callback_id, e)
        })
    }

    pub fn add_match_found_callback_u<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(&MatchFoundCallbackData) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(Handler::MatchFoundU(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_match_found_callback_u(self.raw(), func, userdata, e)
        })
    }

    /// Match-found callback receiving every candidate: stream id, frame id,
    /// sample, quality, template and search results.
    pub fn add_match_found_callback_ext<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(i32, i32, &RawSample, f32, &Template, &[SearchResult]) -> CallbackResult
            + Send
            + Sync
            + 'static,
    {
        let api = self.api();
        self.register(Handler::MatchFoundExt(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_match_found_callback_ext(self.raw(), func, userdata, e)
        })
    }

    /// Positional match-found callback for the best candidate: stream id,
    /// frame id, person id, element id, sample, quality, template and match
    /// result. Not called for events without candidates.
    pub fn add_match_found_callback<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(i32, i32, u64, u64, &RawSample, f32, &Template, &MatchResult) -> CallbackResult
            + Send
            + Sync
            + 'static,
    {
        let api = self.api();
        self.register(Handler::MatchFound(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_match_found_callback(self.raw(), func, userdata, e)
        })
    }

    pub fn remove_match_found_callback(&self, callback_id: i32) -> Result<()> {
        let api = self.api();
        self.unregister(CallbackKind::MatchFound, callback_id, |e| unsafe {
            api.video_worker_remove_match_found_callback(self.raw(), callback_id, e)
        })
    }

    pub fn add_tracking_lost_callback_u<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(&TrackingLostCallbackData) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(Handler::TrackingLostU(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_tracking_lost_callback_u(self.raw(), func, userdata, e)
        })
    }

    /// Positional tracking-lost callback: stream id, first frame id, last
    /// frame id, best quality, best quality frame id, best sample and its
    /// template.
    pub fn add_tracking_lost_callback<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(i32, i32, i32, f32, i32, Option<&RawSample>, Option<&Template>) -> CallbackResult
            + Send
            + Sync
            + 'static,
    {
        let api = self.api();
        self.register(Handler::TrackingLost(Arc::new(callback)), |func, userdata, e| unsafe {
            api.video_worker_add_tracking_lost_callback(self.raw(), func, userdata, e)
        })
    }

    pub fn remove_tracking_lost_callback(&self, callback_id: i32) -> Result<()> {
        let api = self.api();
        self.unregister(CallbackKind::TrackingLost, callback_id, |e| unsafe {
            api.video_worker_remove_tracking_lost_callback(self.raw(), callback_id, e)
        })
    }

    pub fn add_sti_person_outdated_callback_u<F>(&self, callback: F) -> Result<i32>
    where
        F: Fn(&StiPersonOutdatedCallbackData) -> CallbackResult + Send + Sync + 'static,
    {
        let api = self.api();
        self.register(
            Handler::StiPersonOutdatedU(Arc::new(callback)),
            |func, userdata, e| unsafe {
                api.video_worker_add_sti_person_outdated_callback_u(self.raw(), func, userdata, e)
            },
        )
    }

    pub fn remove_sti_person_outdated_callback(&self, callback_id: i32) -> Result<()> {
        let api = self.api();
        self.unregister(CallbackKind::StiPersonOutdated, callback_id, |e| unsafe {
            api.video_worker_remove_sti_person_outdated_callback(self.raw(), callback_id, e)
        })
    }
}
