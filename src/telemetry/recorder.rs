use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};
use crate::ambiance::event::AmbianceEvent;

const MAX_EVENTS: usize = 10_000;

/// Attention reported to the debrief when the exercise produced no samples.
pub const NEUTRAL_ATTENTION: f32 = 0.5;

#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn observe(&mut self, event: &AmbianceEvent) {
        self.record(TelemetryEvent::from(event));
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Mean of every attention notification seen, 0.5 if none.
    pub fn audience_attention_avg(&self) -> f32 {
        self.snapshot().attention_stats.average_or(NEUTRAL_ATTENTION)
    }

    /// Called once the exercise is over.
    pub fn aggregate_session(&self, duration_secs: f32) -> TelemetryEvent {
        let snap = self.snapshot();
        TelemetryEvent::SessionSummary {
            duration_secs,
            reactions: snap.reaction_stats.total,
            average_attention: snap.attention_stats.average_or(NEUTRAL_ATTENTION),
        }
    }
}
