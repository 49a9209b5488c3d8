//! Typed event data delivered to video worker callbacks.

use crate::raw_sample::RawSample;
use crate::template::Template;
use crate::types::{AgeGender, EmotionConfidence, Liveness, MatchResult, Verdict};
use std::error::Error;
use std::sync::Arc;

/// Return type of every video worker callback.
///
/// An `Err` is reported on the worker's error stream and logged; the
/// remaining callbacks for the event still run.
pub type CallbackResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;

/// Faces tracked on one frame of one stream.
///
/// All `samples_*` vectors run parallel to `samples`, except
/// `samples_track_emotions`, which holds one list per sample.
#[derive(Debug, Clone)]
pub struct TrackingCallbackData {
    pub stream_id: i32,
    pub frame_id: i32,
    pub samples: Vec<RawSample>,
    pub samples_track_id: Vec<i32>,
    pub samples_weak: Vec<bool>,
    pub samples_quality: Vec<f32>,
    pub samples_good_light_and_blur: Vec<Verdict>,
    pub samples_good_angles: Vec<Verdict>,
    pub samples_good_face_size: Vec<Verdict>,
    pub samples_detector_confirmed: Vec<Verdict>,
    pub samples_depth_liveness_confirmed: Vec<Liveness>,
    pub samples_track_age_gender_set: Vec<bool>,
    /// `None` where `samples_track_age_gender_set` is false
    pub samples_track_age_gender: Vec<Option<AgeGender>>,
    pub samples_track_emotions_set: Vec<bool>,
    pub samples_track_emotions: Vec<Vec<EmotionConfidence>>,
}

impl TrackingCallbackData {
    /// Keeps only the samples for which `keep` returns true, across every
    /// parallel vector.
    pub(crate) fn retain_samples(&mut self, mut keep: impl FnMut(i32) -> bool) {
        let mask: Vec<bool> = self.samples_track_id.iter().map(|&id| keep(id)).collect();
        if mask.iter().all(|&k| k) {
            return;
        }
        fn filter<T>(values: &mut Vec<T>, mask: &[bool]) {
            let mut i = 0;
            values.retain(|_| {
                let keep = mask.get(i).copied().unwrap_or(true);
                i += 1;
                keep
            });
        }
        filter(&mut self.samples, &mask);
        filter(&mut self.samples_track_id, &mask);
        filter(&mut self.samples_weak, &mask);
        filter(&mut self.samples_quality, &mask);
        filter(&mut self.samples_good_light_and_blur, &mask);
        filter(&mut self.samples_good_angles, &mask);
        filter(&mut self.samples_good_face_size, &mask);
        filter(&mut self.samples_detector_confirmed, &mask);
        filter(&mut self.samples_depth_liveness_confirmed, &mask);
        filter(&mut self.samples_track_age_gender_set, &mask);
        filter(&mut self.samples_track_age_gender, &mask);
        filter(&mut self.samples_track_emotions_set, &mask);
        filter(&mut self.samples_track_emotions, &mask);
    }
}

/// A template was built for a tracked face.
#[derive(Debug, Clone)]
pub struct TemplateCreatedCallbackData {
    pub stream_id: i32,
    pub frame_id: i32,
    pub quality: f32,
    pub sample: RawSample,
    pub templ: Template,
}

/// One database candidate for a [`MatchFoundCallbackData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// [`crate::MATCH_NOT_FOUND_ID`] when nobody in the database matched
    pub person_id: u64,
    pub element_id: u64,
    pub match_result: MatchResult,
}

/// A tracked face was matched against the database.
#[derive(Debug, Clone)]
pub struct MatchFoundCallbackData {
    pub stream_id: i32,
    pub frame_id: i32,
    pub quality: f32,
    pub sample: RawSample,
    pub templ: Template,
    /// Best candidates first
    pub search_results: Vec<SearchResult>,
}

/// A track ended. No later event on the stream refers to `track_id`.
#[derive(Debug, Clone)]
pub struct TrackingLostCallbackData {
    pub stream_id: i32,
    pub first_frame_id: i32,
    pub last_frame_id: i32,
    pub best_quality: f32,
    pub best_quality_frame_id: i32,
    /// Absent when the track never produced a usable sample
    pub best_quality_sample: Option<RawSample>,
    pub best_quality_templ: Option<Template>,
    pub track_id: i32,
    pub sti_person_id_set: bool,
    pub sti_person_id: i32,
}

/// A short-time identification person expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StiPersonOutdatedCallbackData {
    pub stream_id: i32,
    pub sti_person_id: i32,
}

/// One entry of the database passed to [`super::VideoWorker::set_database`].
#[derive(Debug, Clone)]
pub struct DatabaseElement {
    pub element_id: u64,
    pub person_id: u64,
    pub templ: Template,
    /// Largest distance still reported as a match
    pub distance_threshold: f32,
}

pub(crate) type TrackingCallbackU =
    Arc<dyn Fn(&TrackingCallbackData) -> CallbackResult + Send + Sync>;
pub(crate) type TrackingCallback =
    Arc<dyn Fn(i32, i32, &[RawSample], &[bool], &[f32]) -> CallbackResult + Send + Sync>;
pub(crate) type TemplateCreatedCallbackU =
    Arc<dyn Fn(&TemplateCreatedCallbackData) -> CallbackResult + Send + Sync>;
pub(crate) type TemplateCreatedCallback =
    Arc<dyn Fn(i32, i32, &RawSample, f32, &Template) -> CallbackResult + Send + Sync>;
pub(crate) type MatchFoundCallbackU =
    Arc<dyn Fn(&MatchFoundCallbackData) -> CallbackResult + Send + Sync>;
pub(crate) type MatchFoundCallbackExt = Arc<
    dyn Fn(i32, i32, &RawSample, f32, &Template, &[SearchResult]) -> CallbackResult + Send + Sync,
>;
pub(crate) type MatchFoundCallback = Arc<
    dyn Fn(i32, i32, u64, u64, &RawSample, f32, &Template, &MatchResult) -> CallbackResult
        + Send
        + Sync,
>;
pub(crate) type TrackingLostCallbackU =
    Arc<dyn Fn(&TrackingLostCallbackData) -> CallbackResult + Send + Sync>;
pub(crate) type TrackingLostCallback = Arc<
    dyn Fn(i32, i32, i32, f32, i32, Option<&RawSample>, Option<&Template>) -> CallbackResult
        + Send
        + Sync,
>;
pub(crate) type StiPersonOutdatedCallbackU =
    Arc<dyn Fn(&StiPersonOutdatedCallbackData) -> CallbackResult + Send + Sync>;

/// A decoded event on its way through the per-stream gate.
#[derive(Debug, Clone)]
pub(crate) enum Event {
    Tracking(TrackingCallbackData),
    TemplateCreated {
        data: TemplateCreatedCallbackData,
        track_id: i32,
    },
    MatchFound {
        data: MatchFoundCallbackData,
        track_id: i32,
    },
    TrackingLost(TrackingLostCallbackData),
    StiPersonOutdated(StiPersonOutdatedCallbackData),
}

impl Event {
    pub(crate) fn stream_id(&self) -> i32 {
        match self {
            Event::Tracking(data) => data.stream_id,
            Event::TemplateCreated { data, .. } => data.stream_id,
            Event::MatchFound { data, .. } => data.stream_id,
            Event::TrackingLost(data) => data.stream_id,
            Event::StiPersonOutdated(data) => data.stream_id,
        }
    }

    /// Track the event refers to, for events other than tracking.
    pub(crate) fn track_id(&self) -> Option<i32> {
        match self {
            Event::TemplateCreated { track_id, .. } | Event::MatchFound { track_id, .. } => {
                Some(*track_id)
            }
            Event::TrackingLost(data) => Some(data.track_id),
            Event::Tracking(_) | Event::StiPersonOutdated(_) => None,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Event::Tracking(_) => "Tracking",
            Event::TemplateCreated { .. } => "TemplateCreated",
            Event::MatchFound { .. } => "MatchFound",
            Event::TrackingLost(_) => "TrackingLost",
            Event::StiPersonOutdated(_) => "StiPersonOutdated",
        }
    }
}
