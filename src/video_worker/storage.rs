//! Decoding of the `StructStorage` tables the engine hands to callbacks.

use super::events::{
    MatchFoundCallbackData, SearchResult, StiPersonOutdatedCallbackData, TemplateCreatedCallbackData,
    TrackingCallbackData, TrackingLostCallbackData,
};
use crate::error::{FacerecError, Result, MALFORMED_CALLBACK_DATA_ERROR_CODE};
use crate::exception::call;
use crate::ffi::fields::*;
use crate::ffi::FacerecApi;
use crate::raw_sample::{wrap_samples, RawSample};
use crate::template::Template;
use crate::types::{AgeGender, Emotion, EmotionConfidence, Liveness, MatchResult, Verdict};
use std::ffi::c_void;
use std::slice;
use std::sync::Arc;

/// Field reader over one callback's data.
pub(crate) struct StructStorage<'a> {
    api: &'a Arc<dyn FacerecApi>,
    data: *const c_void,
}

fn malformed(field: i32, what: &str) -> FacerecError {
    FacerecError::assertion(
        MALFORMED_CALLBACK_DATA_ERROR_CODE,
        format!("malformed callback data: field {field} {what}"),
    )
}

impl<'a> StructStorage<'a> {
    /// # Safety
    ///
    /// `data` must be the callback data pointer of a running trampoline.
    pub(crate) unsafe fn new(api: &'a Arc<dyn FacerecApi>, data: *const c_void) -> Self {
        Self { api, data }
    }

    fn int64(&self, field: i32) -> Result<i64> {
        let api = self.api.as_ref();
        call(api, |e| unsafe { api.struct_storage_get_int64(self.data, field, e) })
    }

    fn int32(&self, field: i32) -> Result<i32> {
        let value = self.int64(field)?;
        i32::try_from(value).map_err(|_| malformed(field, "is out of range"))
    }

    fn double(&self, field: i32) -> Result<f64> {
        let api = self.api.as_ref();
        call(api, |e| unsafe { api.struct_storage_get_double(self.data, field, e) })
    }

    fn pointer(&self, field: i32) -> Result<*mut c_void> {
        let api = self.api.as_ref();
        call(api, |e| unsafe { api.struct_storage_get_pointer(self.data, field, e) })
    }

    fn count(&self, field: i32) -> Result<usize> {
        let value = self.int64(field)?;
        usize::try_from(value).map_err(|_| malformed(field, "is negative"))
    }

    /// Copies `count` elements of the array stored in `field`.
    fn array<T: Copy>(&self, field: i32, count: usize) -> Result<Vec<T>> {
        let ptr = self.pointer(field)? as *const T;
        if count == 0 {
            return Ok(Vec::new());
        }
        if ptr.is_null() {
            return Err(malformed(field, "is null"));
        }
        Ok(unsafe { slice::from_raw_parts(ptr, count) }.to_vec())
    }

    fn sample(&self, field: i32) -> Result<Option<RawSample>> {
        let raw = self.pointer(field)?;
        if raw.is_null() {
            return Ok(None);
        }
        RawSample::from_raw(self.api, raw).map(Some)
    }

    fn template(&self, field: i32) -> Result<Option<Template>> {
        let raw = self.pointer(field)?;
        if raw.is_null() {
            return Ok(None);
        }
        Template::from_raw(self.api, raw).map(Some)
    }

    fn verdicts(&self, field: i32, count: usize) -> Result<Vec<Verdict>> {
        self.array::<i32>(field, count)?
            .into_iter()
            .map(|v| Verdict::from_raw(v as i64))
            .collect()
    }

    pub(crate) fn tracking(&self) -> Result<TrackingCallbackData> {
        let stream_id = self.int32(STREAM_ID)?;
        let frame_id = self.int32(FRAME_ID)?;
        let count = self.count(SAMPLES_COUNT)?;

        // Take ownership of the samples before anything else can fail.
        let samples = wrap_samples(self.api, self.array::<*mut c_void>(SAMPLES, count)?)?;
        let samples_track_id = samples.iter().map(|s| s.id()).collect::<Result<Vec<_>>>()?;

        let samples_weak = self
            .array::<i32>(WEAK_SAMPLES, count)?
            .into_iter()
            .map(|w| w != 0)
            .collect();
        let samples_quality = self.array::<f32>(SAMPLES_QUALITY, count)?;

        let samples_good_light_and_blur = self.verdicts(GOOD_LIGHT_AND_BLUR_SAMPLES, count)?;
        let samples_good_angles = self.verdicts(GOOD_ANGLES_SAMPLES, count)?;
        let samples_good_face_size = self.verdicts(GOOD_FACE_SIZE_SAMPLES, count)?;
        let samples_detector_confirmed = self.verdicts(DETECTOR_CONFIRMED_SAMPLES, count)?;
        let samples_depth_liveness_confirmed = self
            .array::<i32>(DEPTH_LIVENESS_CONFIRMED_SAMPLES, count)?
            .into_iter()
            .map(|v| Liveness::from_raw(v as i64))
            .collect::<Result<Vec<_>>>()?;

        let age_gender_set: Vec<bool> = self
            .array::<i32>(SAMPLES_TRACK_AGE_GENDER_SET, count)?
            .into_iter()
            .map(|v| v != 0)
            .collect();
        let gender = self.array::<i32>(SAMPLES_TRACK_GENDER, count)?;
        let age = self.array::<i32>(SAMPLES_TRACK_AGE, count)?;
        let age_years = self.array::<f32>(SAMPLES_TRACK_AGE_YEARS, count)?;
        let samples_track_age_gender = (0..count)
            .map(|i| {
                age_gender_set[i]
                    .then(|| AgeGender::from_raw(gender[i] as i64, age[i] as i64, age_years[i]))
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        let emotions_set: Vec<bool> = self
            .array::<i32>(SAMPLES_TRACK_EMOTIONS_SET, count)?
            .into_iter()
            .map(|v| v != 0)
            .collect();
        let emotions_count = self.array::<i32>(SAMPLES_TRACK_EMOTIONS_COUNT, count)?;
        let per_sample = emotions_count
            .iter()
            .map(|&n| usize::try_from(n).map_err(|_| malformed(SAMPLES_TRACK_EMOTIONS_COUNT, "is negative")))
            .collect::<Result<Vec<_>>>()?;
        let total: usize = per_sample.iter().sum();
        let confidence = self.array::<f32>(SAMPLES_TRACK_EMOTIONS_CONFIDENCE, total)?;
        let emotion = self.array::<i32>(SAMPLES_TRACK_EMOTIONS_EMOTION, total)?;
        let mut offset = 0;
        let mut samples_track_emotions = Vec::with_capacity(count);
        for n in per_sample {
            let list = (offset..offset + n)
                .map(|j| {
                    Ok(EmotionConfidence {
                        emotion: Emotion::from_raw(emotion[j] as i64)?,
                        confidence: confidence[j],
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            samples_track_emotions.push(list);
            offset += n;
        }

        Ok(TrackingCallbackData {
            stream_id,
            frame_id,
            samples,
            samples_track_id,
            samples_weak,
            samples_quality,
            samples_good_light_and_blur,
            samples_good_angles,
            samples_good_face_size,
            samples_detector_confirmed,
            samples_depth_liveness_confirmed,
            samples_track_age_gender_set: age_gender_set,
            samples_track_age_gender,
            samples_track_emotions_set: emotions_set,
            samples_track_emotions,
        })
    }

    /// Reads the sample and template of a template-created or match-found
    /// event. Both are taken over before either is checked.
    fn sample_and_template(&self) -> Result<(RawSample, Template)> {
        let sample = self.sample(SAMPLES);
        let templ = self.template(TEMPL);
        let sample = sample?.ok_or_else(|| malformed(SAMPLES, "is null"))?;
        let templ = templ?.ok_or_else(|| malformed(TEMPL, "is null"))?;
        Ok((sample, templ))
    }

    pub(crate) fn template_created(&self) -> Result<TemplateCreatedCallbackData> {
        let stream_id = self.int32(STREAM_ID)?;
        let frame_id = self.int32(FRAME_ID)?;
        let quality = self.double(QUALITY)? as f32;
        let (sample, templ) = self.sample_and_template()?;
        Ok(TemplateCreatedCallbackData {
            stream_id,
            frame_id,
            quality,
            sample,
            templ,
        })
    }

    pub(crate) fn match_found(&self) -> Result<MatchFoundCallbackData> {
        let stream_id = self.int32(STREAM_ID)?;
        let frame_id = self.int32(FRAME_ID)?;
        let quality = self.double(QUALITY)? as f32;
        let (sample, templ) = self.sample_and_template()?;

        let size = self.count(SEARCH_RESULT_SIZE)?;
        let person_ids = self.array::<u64>(SEARCH_RESULT_PERSON_IDS, size)?;
        let element_ids = self.array::<u64>(SEARCH_RESULT_ELEMENT_IDS, size)?;
        let distance = self.array::<f32>(SEARCH_RESULT_DISTANCE, size)?;
        let far = self.array::<f32>(SEARCH_RESULT_FA_R, size)?;
        let frr = self.array::<f32>(SEARCH_RESULT_FR_R, size)?;
        let score = self.array::<f32>(SEARCH_RESULT_SCORE, size)?;
        let search_results = (0..size)
            .map(|i| SearchResult {
                person_id: person_ids[i],
                element_id: element_ids[i],
                match_result: MatchResult {
                    distance: distance[i] as f64,
                    fa_r: far[i] as f64,
                    fr_r: frr[i] as f64,
                    score: score[i] as f64,
                },
            })
            .collect();

        Ok(MatchFoundCallbackData {
            stream_id,
            frame_id,
            quality,
            sample,
            templ,
            search_results,
        })
    }

    pub(crate) fn tracking_lost(&self) -> Result<TrackingLostCallbackData> {
        let stream_id = self.int32(STREAM_ID)?;
        let first_frame_id = self.int32(FIRST_FRAME_ID)?;
        let last_frame_id = self.int32(LAST_FRAME_ID)?;
        let best_quality = self.double(BEST_QUALITY)? as f32;
        let best_quality_frame_id = self.int32(BEST_QUALITY_FRAME_ID)?;
        let best_quality_sample = self.sample(SAMPLES);
        let best_quality_templ = self.template(TEMPL);
        Ok(TrackingLostCallbackData {
            stream_id,
            first_frame_id,
            last_frame_id,
            best_quality,
            best_quality_frame_id,
            best_quality_sample: best_quality_sample?,
            best_quality_templ: best_quality_templ?,
            track_id: self.int32(TRACK_ID)?,
            sti_person_id: self.int32(STI_PERSON_ID)?,
            sti_person_id_set: self.int64(STI_PERSON_ID_SET)? != 0,
        })
    }

    pub(crate) fn sti_person_outdated(&self) -> Result<StiPersonOutdatedCallbackData> {
        Ok(StiPersonOutdatedCallbackData {
            stream_id: self.int32(STREAM_ID)?,
            sti_person_id: self.int32(STI_PERSON_ID)?,
        })
    }
}
