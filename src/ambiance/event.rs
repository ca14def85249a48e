use serde::{Deserialize, Serialize};

use super::profile::{AmbianceSound, ReactionTemplate};
use super::trigger::TriggerKind;

/// A reaction as handed to the host, intensity already scaled by the
/// profile's reactivity and the audience's current attention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmittedReaction {
    pub sound: AmbianceSound,
    /// Adjusted intensity, never above `base_intensity`.
    pub intensity: f32,
    pub base_intensity: f32,
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
}

impl EmittedReaction {
    pub fn from_template(template: &ReactionTemplate, reactivity: f32, attention: f32) -> Self {
        let base = template.intensity.clamp(0.0, 1.0);
        let scale = reactivity.clamp(0.0, 1.0) * attention.clamp(0.0, 1.0);
        Self {
            sound: template.sound,
            intensity: (base * scale).clamp(0.0, base),
            base_intensity: base,
            duration_ms: template.duration_ms,
            delay_ms: template.delay_ms,
            fade_in_ms: template.fade_in_ms,
            fade_out_ms: template.fade_out_ms,
        }
    }
}

/// Notifications produced by the engine, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AmbianceEvent {
    Reaction {
        reaction: EmittedReaction,
        trigger: TriggerKind,
    },
    AttentionChanged(f32),
}

impl AmbianceEvent {
    pub fn as_reaction(&self) -> Option<(&EmittedReaction, TriggerKind)> {
        match self {
            AmbianceEvent::Reaction { reaction, trigger } => Some((reaction, *trigger)),
            AmbianceEvent::AttentionChanged(_) => None,
        }
    }

    pub fn as_attention(&self) -> Option<f32> {
        match self {
            AmbianceEvent::AttentionChanged(level) => Some(*level),
            AmbianceEvent::Reaction { .. } => None,
        }
    }
}
