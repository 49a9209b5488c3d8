//! Template creation, comparison and search.

use crate::error::{FacerecError, Result};
use crate::exception::call;
use crate::ffi::adapters::{collect_string, ReadAdapter};
use crate::ffi::{ExceptionOut, FacerecApi, RawHandle, RawMatchResult};
use crate::handle::{create_object, NativeObject, ObjectKind};
use crate::raw_sample::RawSample;
use crate::template::{Template, TemplatesIndex};
use crate::types::{MatchResult, RecognizerSearchResult, SearchAccelerationType};
use std::ffi::c_void;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Recognition method created with [`crate::FacerecService::create_recognizer`].
#[derive(Debug, Clone)]
pub struct Recognizer {
    object: Arc<NativeObject>,
}

impl Recognizer {
    pub(crate) fn new(object: Arc<NativeObject>) -> Self {
        Self { object }
    }

    fn api(&self) -> &dyn FacerecApi {
        self.object.api()
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.object.raw()
    }

    pub fn method_name(&self) -> Result<String> {
        let api = self.api();
        collect_string(|stream, write| {
            call(api, |e| unsafe {
                api.recognizer_get_method_name(self.raw(), stream, write, e)
            })
        })
    }

    /// Creates a template from a captured sample.
    pub fn processing(&self, sample: &RawSample) -> Result<Template> {
        let api = self.api();
        let object = create_object(self.object.api_arc(), ObjectKind::Api("Template"), |e| unsafe {
            api.recognizer_processing(self.raw(), sample.raw() as *const c_void, e)
        })?;
        Ok(Template::new(object))
    }

    /// Reads a template written by [`Template::save`].
    pub fn load_template(&self, reader: &mut impl Read) -> Result<Template> {
        let api = self.api();
        let mut adapter = ReadAdapter::new(reader);
        let stream = adapter.as_stream();
        let result = create_object(self.object.api_arc(), ObjectKind::Api("Template"), |e| unsafe {
            api.recognizer_load_template(self.raw(), stream, ReadAdapter::READ_FUNC, e)
        });
        adapter.finish()?;
        result.map(Template::new)
    }

    /// Compares two templates of this method.
    pub fn verify_match(&self, first: &Template, second: &Template) -> Result<MatchResult> {
        let api = self.api();
        self.match_query(|result, e| unsafe {
            api.recognizer_verify_match_v2(
                self.raw(),
                first.raw() as *const c_void,
                second.raw() as *const c_void,
                result,
                e,
            )
        })
    }

    /// Builds a search index; the templates are shared, not copied.
    pub fn create_index(
        &self,
        templates: &[Template],
        search_threads_count: usize,
    ) -> Result<TemplatesIndex> {
        let pointers: Vec<*const c_void> = templates
            .iter()
            .map(|t| t.raw() as *const c_void)
            .collect();
        let api = self.api();
        let object = create_object(
            self.object.api_arc(),
            ObjectKind::Api("TemplatesIndex"),
            |e| unsafe {
                api.recognizer_create_index(
                    self.raw(),
                    pointers.len() as i64,
                    pointers.as_ptr(),
                    search_threads_count as i32,
                    e,
                )
            },
        )?;
        debug!("Created templates index with {} templates", pointers.len());
        Ok(TemplatesIndex::new(object))
    }

    /// Finds the `k` nearest templates in `index` for every query.
    ///
    /// The outer vector has one entry per query, each sorted by distance. An
    /// entry is shorter than `k` when the index has fewer templates.
    pub fn search(
        &self,
        queries: &[Template],
        index: &TemplatesIndex,
        k: usize,
        acceleration: SearchAccelerationType,
    ) -> Result<Vec<Vec<RecognizerSearchResult>>> {
        if queries.is_empty() || k == 0 {
            return Ok(vec![Vec::new(); queries.len()]);
        }
        let query_ptrs: Vec<*const c_void> =
            queries.iter().map(|t| t.raw() as *const c_void).collect();
        let total = queries.len().checked_mul(k).ok_or_else(|| {
            FacerecError::InvalidOperation(format!("search for {k} neighbours is too large"))
        })?;

        let mut result_i = vec![-1i64; total];
        let mut distance = vec![0f32; total];
        let mut far = vec![0f32; total];
        let mut frr = vec![0f32; total];
        let mut score = vec![0f32; total];

        let api = self.api();
        call(api, |e| unsafe {
            api.recognizer_search_v2(
                self.raw(),
                acceleration as i32,
                query_ptrs.len() as i32,
                query_ptrs.as_ptr(),
                index.raw() as *const c_void,
                k as i64,
                result_i.as_mut_ptr(),
                distance.as_mut_ptr(),
                far.as_mut_ptr(),
                frr.as_mut_ptr(),
                score.as_mut_ptr(),
                e,
            )
        })?;

        Ok((0..queries.len())
            .map(|q| {
                (q * k..(q + 1) * k)
                    .take_while(|&h| result_i[h] >= 0)
                    .map(|h| RecognizerSearchResult {
                        index: result_i[h],
                        match_result: MatchResult {
                            distance: distance[h] as f64,
                            fa_r: far[h] as f64,
                            fr_r: frr[h] as f64,
                            score: score[h] as f64,
                        },
                    })
                    .collect()
            })
            .collect())
    }

    /// ROC curve point at a given distance threshold.
    pub fn roc_point_by_distance_threshold(&self, distance_threshold: f64) -> Result<MatchResult> {
        let api = self.api();
        self.match_query(|result, e| unsafe {
            api.recognizer_get_roc_curve_point_by_distance_threshold_v2(
                self.raw(),
                distance_threshold,
                result,
                e,
            )
        })
    }

    /// ROC curve point with the given false acceptance rate.
    pub fn roc_point_by_far(&self, desired_far: f64) -> Result<MatchResult> {
        let api = self.api();
        self.match_query(|result, e| unsafe {
            api.recognizer_get_roc_curve_point_by_far_v2(self.raw(), desired_far, result, e)
        })
    }

    /// ROC curve point with the given false rejection rate.
    pub fn roc_point_by_frr(&self, desired_frr: f64) -> Result<MatchResult> {
        let api = self.api();
        self.match_query(|result, e| unsafe {
            api.recognizer_get_roc_curve_point_by_frr_v2(self.raw(), desired_frr, result, e)
        })
    }

    pub fn roc_point_by_score_threshold(&self, score_threshold: f64) -> Result<MatchResult> {
        let api = self.api();
        self.match_query(|result, e| unsafe {
            api.recognizer_get_roc_curve_point_by_score_threshold(
                self.raw(),
                score_threshold,
                result,
                e,
            )
        })
    }

    fn match_query(
        &self,
        query: impl FnOnce(&mut RawMatchResult, ExceptionOut),
    ) -> Result<MatchResult> {
        let mut result = RawMatchResult::default();
        call(self.api(), |e| query(&mut result, e))?;
        Ok(result.into())
    }
}
