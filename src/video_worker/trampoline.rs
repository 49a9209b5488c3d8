//! `extern "C"` entry points the engine calls for video worker events.
//!
//! Each trampoline decodes the event, passes it through the stream gate and
//! drains whatever became deliverable on that stream. Failures are written
//! to the engine's error stream, or kept on the worker when the engine gave
//! none; `VideoWorker::check_exceptions` returns either. No panic crosses
//! back into the engine.

#![allow(clippy::too_many_arguments)]

use super::events::Event;
use super::gate::Envelope;
use super::storage::StructStorage;
use super::WorkerShared;
use crate::error::Result;
use std::any::Any;
use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::slice;
use tracing::error;

/// The engine's per-call error stream.
pub(super) struct ErrStream<'a> {
    shared: &'a WorkerShared,
    stream: *mut c_void,
}

impl ErrStream<'_> {
    pub(super) fn report(&self, message: &str) {
        if self.stream.is_null() {
            return self.shared.record_failure(message);
        }
        error!("{}", message);
        unsafe {
            self.shared.api.video_worker_err_stream_write_func(
                self.stream,
                message.as_ptr() as *const c_void,
                message.len() as u64,
            )
        }
    }
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "..."
    }
}

unsafe fn tokens(count: i32, userdata: *const *mut c_void) -> Vec<u64> {
    if count <= 0 || userdata.is_null() {
        return Vec::new();
    }
    slice::from_raw_parts(userdata, count as usize)
        .iter()
        .map(|&p| p as usize as u64)
        .collect()
}

unsafe fn run(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    name: &str,
    targets: Vec<u64>,
    decode: impl FnOnce(&StructStorage<'_>) -> Result<Event>,
) {
    if this_vw.is_null() {
        error!("VideoWorker {} arrived before the worker was attached", name);
        return;
    }
    let shared = &*(this_vw as *const WorkerShared);
    let err = ErrStream {
        shared,
        stream: err_stream,
    };

    let decoded = catch_unwind(AssertUnwindSafe(|| -> Result<i32> {
        let storage = StructStorage::new(&shared.api, callback_data);
        let event = decode(&storage)?;
        Ok(shared.enqueue(Envelope { event, targets }))
    }));
    let stream_id = match decoded {
        Ok(Ok(stream_id)) => stream_id,
        Ok(Err(e)) => return err.report(&format!("VideoWorker {name} failed: '{e}'.")),
        Err(panic) => {
            return err.report(&format!(
                "VideoWorker {name} panicked: '{}'.",
                panic_message(panic.as_ref())
            ))
        }
    };

    let dispatch = AssertUnwindSafe(|| shared.drain(stream_id, &|m: &str| err.report(m)));
    if catch_unwind(dispatch).is_err() {
        err.report(&format!("VideoWorker {name} panicked while dispatching."));
    }
}

pub(super) unsafe extern "C" fn tracking(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    _callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
    u_callbacks_count: i32,
    _u_callbacks_func: *const *mut c_void,
    u_callbacks_userdata: *const *mut c_void,
) {
    let mut targets = tokens(u_callbacks_count, u_callbacks_userdata);
    targets.extend(tokens(callbacks_count, callbacks_userdata));
    run(err_stream, this_vw, callback_data, "TrackingCallback", targets, |s| {
        s.tracking().map(Event::Tracking)
    });
}

pub(super) unsafe extern "C" fn template_created(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    _callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
    u_callbacks_count: i32,
    _u_callbacks_func: *const *mut c_void,
    u_callbacks_userdata: *const *mut c_void,
) {
    let mut targets = tokens(u_callbacks_count, u_callbacks_userdata);
    targets.extend(tokens(callbacks_count, callbacks_userdata));
    run(err_stream, this_vw, callback_data, "TemplateCreatedCallback", targets, |s| {
        let data = s.template_created()?;
        let track_id = data.sample.id()?;
        Ok(Event::TemplateCreated { data, track_id })
    });
}

pub(super) unsafe extern "C" fn match_found(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    _callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
    ext_callbacks_count: i32,
    _ext_callbacks_func: *const *mut c_void,
    ext_callbacks_userdata: *const *mut c_void,
    u_callbacks_count: i32,
    _u_callbacks_func: *const *mut c_void,
    u_callbacks_userdata: *const *mut c_void,
) {
    let mut targets = tokens(u_callbacks_count, u_callbacks_userdata);
    targets.extend(tokens(ext_callbacks_count, ext_callbacks_userdata));
    targets.extend(tokens(callbacks_count, callbacks_userdata));
    run(err_stream, this_vw, callback_data, "MatchFoundCallback", targets, |s| {
        let data = s.match_found()?;
        let track_id = data.sample.id()?;
        Ok(Event::MatchFound { data, track_id })
    });
}

pub(super) unsafe extern "C" fn tracking_lost(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    _callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
    u_callbacks_count: i32,
    _u_callbacks_func: *const *mut c_void,
    u_callbacks_userdata: *const *mut c_void,
) {
    let mut targets = tokens(u_callbacks_count, u_callbacks_userdata);
    targets.extend(tokens(callbacks_count, callbacks_userdata));
    run(err_stream, this_vw, callback_data, "TrackingLostCallback", targets, |s| {
        s.tracking_lost().map(Event::TrackingLost)
    });
}

pub(super) unsafe extern "C" fn sti_person_outdated(
    err_stream: *mut c_void,
    this_vw: *mut c_void,
    callback_data: *const c_void,
    callbacks_count: i32,
    _callbacks_func: *const *mut c_void,
    callbacks_userdata: *const *mut c_void,
) {
    let targets = tokens(callbacks_count, callbacks_userdata);
    run(err_stream, this_vw, callback_data, "StiPersonOutdatedCallback", targets, |s| {
        s.sti_person_outdated().map(Event::StiPersonOutdated)
    });
}
