//! Per-stream sequencing of decoded events.
//!
//! The engine runs its pipeline on several threads, so callbacks for one
//! stream may arrive out of frame order. A [`StreamGate`] restores the order
//! of tracking events and keeps the tracking-lost guarantees:
//!
//! - tracking events leave the gate in strictly increasing frame order;
//! - nothing after a track's tracking-lost event mentions that track.

use super::events::Event;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, warn};

/// An event together with the callback tokens it is addressed to.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) event: Event,
    pub(crate) targets: Vec<u64>,
}

#[derive(Debug)]
struct HeldFrame {
    tracking: Envelope,
    followers: Vec<Envelope>,
}

impl HeldFrame {
    fn names(&self, track_id: i32) -> bool {
        match &self.tracking.event {
            Event::Tracking(data) => data.samples_track_id.contains(&track_id),
            _ => false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct StreamGate {
    stream_id: i32,
    window: usize,
    /// Frames handed to the engine whose tracking event has not arrived
    pending: BTreeSet<i32>,
    held: BTreeMap<i32, HeldFrame>,
    /// Highest frame delivered or discarded
    last_delivered: Option<i32>,
    /// Tracks below this id belong to before the last stream reset
    track_threshold: i32,
    lost: HashSet<i32>,
    templated: HashSet<i32>,
}

impl StreamGate {
    pub(crate) fn new(stream_id: i32, window: usize) -> Self {
        Self {
            stream_id,
            window,
            pending: BTreeSet::new(),
            held: BTreeMap::new(),
            last_delivered: None,
            track_threshold: i32::MIN,
            lost: HashSet::new(),
            templated: HashSet::new(),
        }
    }

    fn is_stale(&self, frame_id: i32) -> bool {
        self.last_delivered.is_some_and(|last| frame_id <= last)
    }

    /// Records a frame returned by `add_video_frame`.
    ///
    /// Only the newest `window` frames are waited for.
    pub(crate) fn frame_submitted(&mut self, frame_id: i32) {
        if self.is_stale(frame_id) || self.held.contains_key(&frame_id) {
            return;
        }
        self.pending.insert(frame_id);
        while self.pending.len() > self.window.max(1) {
            self.pending.pop_first();
        }
    }

    /// Takes one event; whatever became deliverable is appended to `out`.
    pub(crate) fn accept(&mut self, envelope: Envelope, out: &mut Vec<Envelope>) {
        let frame_id = match &envelope.event {
            Event::Tracking(data) => Some(data.frame_id),
            _ => None,
        };
        let Some(frame_id) = frame_id else {
            return self.accept_other(envelope, out);
        };

        self.pending.remove(&frame_id);
        if self.is_stale(frame_id) {
            warn!(
                "Dropping tracking event for frame {} on stream {}: frame {} already delivered or discarded",
                frame_id,
                self.stream_id,
                self.last_delivered.unwrap_or_default()
            );
            return;
        }
        if self.held.contains_key(&frame_id) {
            warn!(
                "Dropping duplicate tracking event for frame {} on stream {}",
                frame_id, self.stream_id
            );
            return;
        }
        self.held.insert(
            frame_id,
            HeldFrame {
                tracking: envelope,
                followers: Vec::new(),
            },
        );
        self.release_ready(out);
    }

    /// Events naming a track of a held frame wait behind the latest such frame.
    fn accept_other(&mut self, envelope: Envelope, out: &mut Vec<Envelope>) {
        if let Some(track_id) = envelope.event.track_id() {
            if let Some(held) = self.held.values_mut().rev().find(|h| h.names(track_id)) {
                held.followers.push(envelope);
                return;
            }
        }
        self.deliver(envelope, out);
    }

    /// Forgets pending frames and discards held ones; their frame ids become
    /// stale. Returns the tracking-lost events found among the followers.
    fn discard_held(&mut self) -> Vec<Envelope> {
        let newest = [
            self.last_delivered,
            self.held.last_key_value().map(|(&frame, _)| frame),
            self.pending.last().copied(),
        ];
        self.last_delivered = newest.into_iter().flatten().max();
        self.pending.clear();

        let discarded = self.held.len();
        let mut lost = Vec::new();
        for (_, held) in std::mem::take(&mut self.held) {
            lost.extend(
                held.followers
                    .into_iter()
                    .filter(|f| matches!(f.event, Event::TrackingLost(_))),
            );
        }
        if discarded > 0 {
            debug!("Discarded {} held frames on stream {}", discarded, self.stream_id);
        }
        lost
    }

    /// Tracker restart: held frames are discarded, but tracking-lost events
    /// waiting behind them still go out.
    pub(crate) fn reset_tracker(&mut self, out: &mut Vec<Envelope>) {
        for envelope in self.discard_held() {
            self.deliver(envelope, out);
        }
    }

    /// Stream restart: everything held is discarded and tracks below
    /// `threshold` are never reported again.
    pub(crate) fn reset_stream(&mut self, threshold: i32) {
        self.discard_held();
        self.track_threshold = self.track_threshold.max(threshold);
        let threshold = self.track_threshold;
        self.lost.retain(|&track| track >= threshold);
        self.templated.retain(|&track| track >= threshold);
    }

    #[cfg(test)]
    pub(crate) fn held_count(&self) -> usize {
        self.held.len()
    }

    #[cfg(test)]
    pub(crate) fn remembered_tracks(&self) -> usize {
        self.lost.len() + self.templated.len()
    }

    fn release_ready(&mut self, out: &mut Vec<Envelope>) {
        while let Some((&first, _)) = self.held.first_key_value() {
            let waiting = self.pending.range(..first).next().is_some();
            if waiting {
                if self.held.len() <= self.window {
                    break;
                }
                debug!(
                    "Reorder window of stream {} exceeded, giving up on frames before {}",
                    self.stream_id, first
                );
            }
            self.pending.retain(|&frame| frame > first);
            if let Some((_, held)) = self.held.pop_first() {
                self.release(held, out);
            }
        }
    }

    fn release(&mut self, held: HeldFrame, out: &mut Vec<Envelope>) {
        self.deliver(held.tracking, out);
        for follower in held.followers {
            self.deliver(follower, out);
        }
    }

    fn finished(&self, track_id: i32) -> bool {
        track_id < self.track_threshold || self.lost.contains(&track_id)
    }

    /// Applies the tracking-lost and reset rules and hands the event out.
    fn deliver(&mut self, mut envelope: Envelope, out: &mut Vec<Envelope>) {
        let keep = match &mut envelope.event {
            Event::Tracking(data) => {
                self.last_delivered = Some(data.frame_id);
                let (threshold, lost) = (self.track_threshold, &self.lost);
                data.retain_samples(|track_id| track_id >= threshold && !lost.contains(&track_id));
                true
            }
            Event::TemplateCreated { track_id, .. } => {
                !self.finished(*track_id) && self.templated.insert(*track_id)
            }
            Event::MatchFound { track_id, .. } => !self.finished(*track_id),
            Event::TrackingLost(data) => {
                self.templated.remove(&data.track_id);
                data.track_id >= self.track_threshold && self.lost.insert(data.track_id)
            }
            Event::StiPersonOutdated(_) => true,
        };
        if keep {
            out.push(envelope);
        } else {
            debug!(
                "Dropping {} event on stream {} for an already finished track",
                envelope.event.name(),
                self.stream_id
            );
        }
    }
}
