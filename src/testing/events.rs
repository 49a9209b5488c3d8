//! Ready-made decoded events for gate tests.

use super::FakeEngine;
use crate::ffi::FacerecApi;
use crate::raw_sample::RawSample;
use crate::template::Template;
use crate::types::{Liveness, MatchResult, Verdict};
use crate::video_worker::events::{
    Event, MatchFoundCallbackData, SearchResult, TemplateCreatedCallbackData,
    TrackingCallbackData, TrackingLostCallbackData,
};
use std::sync::Arc;

fn api(engine: &Arc<FakeEngine>) -> Arc<dyn FacerecApi> {
    engine.clone()
}

fn sample(engine: &Arc<FakeEngine>, track_id: i32, frame_id: i32) -> RawSample {
    RawSample::from_raw(&api(engine), engine.alloc_sample(track_id, frame_id)).unwrap()
}

fn templ(engine: &Arc<FakeEngine>) -> Template {
    Template::from_raw(&api(engine), engine.alloc_object()).unwrap()
}

pub(crate) fn tracking(
    engine: &Arc<FakeEngine>,
    stream_id: i32,
    frame_id: i32,
    track_ids: &[i32],
) -> Event {
    let n = track_ids.len();
    Event::Tracking(TrackingCallbackData {
        stream_id,
        frame_id,
        samples: track_ids.iter().map(|&t| sample(engine, t, frame_id)).collect(),
        samples_track_id: track_ids.to_vec(),
        samples_weak: vec![false; n],
        samples_quality: vec![0.9; n],
        samples_good_light_and_blur: vec![Verdict::Passed; n],
        samples_good_angles: vec![Verdict::Passed; n],
        samples_good_face_size: vec![Verdict::Passed; n],
        samples_detector_confirmed: vec![Verdict::Passed; n],
        samples_depth_liveness_confirmed: vec![Liveness::NotComputed; n],
        samples_track_age_gender_set: vec![false; n],
        samples_track_age_gender: vec![None; n],
        samples_track_emotions_set: vec![false; n],
        samples_track_emotions: vec![Vec::new(); n],
    })
}

pub(crate) fn template_created(
    engine: &Arc<FakeEngine>,
    stream_id: i32,
    frame_id: i32,
    track_id: i32,
) -> Event {
    Event::TemplateCreated {
        data: TemplateCreatedCallbackData {
            stream_id,
            frame_id,
            quality: 0.8,
            sample: sample(engine, track_id, frame_id),
            templ: templ(engine),
        },
        track_id,
    }
}

pub(crate) fn match_found(
    engine: &Arc<FakeEngine>,
    stream_id: i32,
    frame_id: i32,
    track_id: i32,
) -> Event {
    Event::MatchFound {
        data: MatchFoundCallbackData {
            stream_id,
            frame_id,
            quality: 0.8,
            sample: sample(engine, track_id, frame_id),
            templ: templ(engine),
            search_results: vec![SearchResult {
                person_id: 1,
                element_id: 1,
                match_result: MatchResult::default(),
            }],
        },
        track_id,
    }
}

pub(crate) fn tracking_lost(_engine: &Arc<FakeEngine>, stream_id: i32, track_id: i32) -> Event {
    Event::TrackingLost(TrackingLostCallbackData {
        stream_id,
        first_frame_id: 0,
        last_frame_id: 0,
        best_quality: 0.0,
        best_quality_frame_id: 0,
        best_quality_sample: None,
        best_quality_templ: None,
        track_id,
        sti_person_id_set: false,
        sti_person_id: 0,
    })
}
