//! Rust-side storage for registered callbacks.
//!
//! The engine keeps its own list of `(callback, userdata)` pairs per event
//! kind and hands them back to the trampolines. The bindings register a
//! numeric token as `userdata`; the closure it stands for lives here.

use super::events::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CallbackKind {
    Tracking,
    TemplateCreated,
    MatchFound,
    TrackingLost,
    StiPersonOutdated,
}

#[derive(Clone)]
pub(crate) enum Handler {
    TrackingU(TrackingCallbackU),
    Tracking(TrackingCallback),
    TemplateCreatedU(TemplateCreatedCallbackU),
    TemplateCreated(TemplateCreatedCallback),
    MatchFoundU(MatchFoundCallbackU),
    MatchFoundExt(MatchFoundCallbackExt),
    MatchFound(MatchFoundCallback),
    TrackingLostU(TrackingLostCallbackU),
    TrackingLost(TrackingLostCallback),
    StiPersonOutdatedU(StiPersonOutdatedCallbackU),
}

impl Handler {
    pub(crate) fn kind(&self) -> CallbackKind {
        match self {
            Handler::TrackingU(_) | Handler::Tracking(_) => CallbackKind::Tracking,
            Handler::TemplateCreatedU(_) | Handler::TemplateCreated(_) => {
                CallbackKind::TemplateCreated
            }
            Handler::MatchFoundU(_) | Handler::MatchFoundExt(_) | Handler::MatchFound(_) => {
                CallbackKind::MatchFound
            }
            Handler::TrackingLostU(_) | Handler::TrackingLost(_) => CallbackKind::TrackingLost,
            Handler::StiPersonOutdatedU(_) => CallbackKind::StiPersonOutdated,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Handler::TrackingU(_) => "TrackingCallbackU",
            Handler::Tracking(_) => "TrackingCallback",
            Handler::TemplateCreatedU(_) => "TemplateCreatedCallbackU",
            Handler::TemplateCreated(_) => "TemplateCreatedCallback",
            Handler::MatchFoundU(_) => "MatchFoundCallbackU",
            Handler::MatchFoundExt(_) => "MatchFoundCallbackExt",
            Handler::MatchFound(_) => "MatchFoundCallback",
            Handler::TrackingLostU(_) => "TrackingLostCallbackU",
            Handler::TrackingLost(_) => "TrackingLostCallback",
            Handler::StiPersonOutdatedU(_) => "StiPersonOutdatedCallbackU",
        }
    }

    /// Runs the handler if `event` is of its kind.
    pub(crate) fn invoke(&self, event: &Event) -> CallbackResult {
        match (self, event) {
            (Handler::TrackingU(f), Event::Tracking(d)) => f(d),
            (Handler::Tracking(f), Event::Tracking(d)) => f(
                d.stream_id,
                d.frame_id,
                &d.samples,
                &d.samples_weak,
                &d.samples_quality,
            ),
            (Handler::TemplateCreatedU(f), Event::TemplateCreated { data, .. }) => f(data),
            (Handler::TemplateCreated(f), Event::TemplateCreated { data: d, .. }) => {
                f(d.stream_id, d.frame_id, &d.sample, d.quality, &d.templ)
            }
            (Handler::MatchFoundU(f), Event::MatchFound { data, .. }) => f(data),
            (Handler::MatchFoundExt(f), Event::MatchFound { data: d, .. }) => f(
                d.stream_id,
                d.frame_id,
                &d.sample,
                d.quality,
                &d.templ,
                &d.search_results,
            ),
            (Handler::MatchFound(f), Event::MatchFound { data: d, .. }) => {
                match d.search_results.first() {
                    Some(best) => f(
                        d.stream_id,
                        d.frame_id,
                        best.person_id,
                        best.element_id,
                        &d.sample,
                        d.quality,
                        &d.templ,
                        &best.match_result,
                    ),
                    None => Ok(()),
                }
            }
            (Handler::TrackingLostU(f), Event::TrackingLost(d)) => f(d),
            (Handler::TrackingLost(f), Event::TrackingLost(d)) => f(
                d.stream_id,
                d.first_frame_id,
                d.last_frame_id,
                d.best_quality,
                d.best_quality_frame_id,
                d.best_quality_sample.as_ref(),
                d.best_quality_templ.as_ref(),
            ),
            (Handler::StiPersonOutdatedU(f), Event::StiPersonOutdated(d)) => f(d),
            _ => Ok(()),
        }
    }
}

struct Entry {
    handler: Handler,
    native_id: Option<i32>,
}

#[derive(Default)]
pub(crate) struct Registry {
    next_token: u64,
    entries: HashMap<u64, Entry>,
}

impl Registry {
    /// Stores `handler` before the engine learns about it, so an event that
    /// races the registration still finds it.
    pub(crate) fn reserve(&mut self, handler: Handler) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.entries.insert(
            token,
            Entry {
                handler,
                native_id: None,
            },
        );
        token
    }

    pub(crate) fn bind(&mut self, token: u64, native_id: i32) {
        if let Some(entry) = self.entries.get_mut(&token) {
            entry.native_id = Some(native_id);
        }
    }

    pub(crate) fn discard(&mut self, token: u64) {
        self.entries.remove(&token);
    }

    /// Forgets the registration the engine knows as `native_id`.
    pub(crate) fn remove(&mut self, kind: CallbackKind, native_id: i32) -> Option<u64> {
        let token = self
            .entries
            .iter()
            .find(|(_, e)| e.native_id == Some(native_id) && e.handler.kind() == kind)
            .map(|(&token, _)| token)?;
        self.entries.remove(&token);
        Some(token)
    }

    /// Handlers still registered for `tokens`, in the same order.
    pub(crate) fn handlers(&self, tokens: &[u64]) -> Vec<Handler> {
        tokens
            .iter()
            .filter_map(|t| self.entries.get(t).map(|e| e.handler.clone()))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
