use std::collections::{HashMap, VecDeque};

use super::event::TelemetryEvent;
use crate::ambiance::trigger::TriggerKind;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub reaction_stats: ReactionStats,
    pub attention_stats: AttentionStats,
}

#[derive(Debug, Clone, Default)]
pub struct ReactionStats {
    pub total: u64,
    pub by_trigger: HashMap<TriggerKind, u64>,
    pub avg_intensity: f32,
}

impl ReactionStats {
    pub fn count(&self, trigger: TriggerKind) -> u64 {
        self.by_trigger.get(&trigger).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttentionStats {
    pub samples: u64,
    pub average: f32,
    pub min: f32,
    pub max: f32,
    pub last: Option<f32>,
}

impl AttentionStats {
    /// Average attention, or `fallback` when nothing was recorded.
    pub fn average_or(&self, fallback: f32) -> f32 {
        if self.samples == 0 {
            fallback
        } else {
            self.average
        }
    }
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    let mut intensity_sum = 0.0;
    let mut attention_sum = 0.0;
    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for event in events {
        match event {
            TelemetryEvent::ReactionFired { trigger, intensity, .. } => {
                snap.reaction_stats.total += 1;
                *snap.reaction_stats.by_trigger.entry(*trigger).or_insert(0) += 1;
                intensity_sum += intensity;
            }
            TelemetryEvent::AttentionChanged { level } => {
                snap.attention_stats.samples += 1;
                attention_sum += level;
                min = min.min(*level);
                max = max.max(*level);
                snap.attention_stats.last = Some(*level);
            }
            TelemetryEvent::SessionSummary { .. } => {}
        }
    }

    if snap.reaction_stats.total > 0 {
        snap.reaction_stats.avg_intensity = intensity_sum / snap.reaction_stats.total as f32;
    }

    if snap.attention_stats.samples > 0 {
        snap.attention_stats.average = attention_sum / snap.attention_stats.samples as f32;
        snap.attention_stats.min = min;
        snap.attention_stats.max = max;
    }

    snap
}
