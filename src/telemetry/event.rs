use serde::{Deserialize, Serialize};

use crate::ambiance::event::AmbianceEvent;
use crate::ambiance::profile::AmbianceSound;
use crate::ambiance::trigger::TriggerKind;

// Allowed: trigger kinds, sound categories, levels, durations.
// Forbidden: transcription text, raw audio.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    ReactionFired {
        trigger: TriggerKind,
        sound: AmbianceSound,
        intensity: f32,
    },

    AttentionChanged {
        level: f32,
    },

    SessionSummary {
        duration_secs: f32,
        reactions: u64,
        average_attention: f32,
    },
}

impl From<&AmbianceEvent> for TelemetryEvent {
    fn from(event: &AmbianceEvent) -> Self {
        match event {
            AmbianceEvent::Reaction { reaction, trigger } => TelemetryEvent::ReactionFired {
                trigger: *trigger,
                sound: reaction.sound,
                intensity: reaction.intensity,
            },
            AmbianceEvent::AttentionChanged(level) => TelemetryEvent::AttentionChanged { level: *level },
        }
    }
}
