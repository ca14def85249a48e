use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::trigger::TriggerKind;
use crate::error::CoachError;

/// Audience archetypes the host can put in front of the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudienceProfile {
    #[default]
    Neutral,
    ColdJury,
    Enthusiastic,
    Hostile,
    Distracted,
    Friendly,
}

impl AudienceProfile {
    pub const ALL: [AudienceProfile; 6] = [
        AudienceProfile::Neutral,
        AudienceProfile::ColdJury,
        AudienceProfile::Enthusiastic,
        AudienceProfile::Hostile,
        AudienceProfile::Distracted,
        AudienceProfile::Friendly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceProfile::Neutral => "neutral",
            AudienceProfile::ColdJury => "cold_jury",
            AudienceProfile::Enthusiastic => "enthusiastic",
            AudienceProfile::Hostile => "hostile",
            AudienceProfile::Distracted => "distracted",
            AudienceProfile::Friendly => "friendly",
        }
    }

    /// The static tuning and reaction table for this archetype.
    pub fn config(&self) -> &'static AudienceProfileConfig {
        match self {
            AudienceProfile::Neutral => &NEUTRAL,
            AudienceProfile::ColdJury => &COLD_JURY,
            AudienceProfile::Enthusiastic => &ENTHUSIASTIC,
            AudienceProfile::Hostile => &HOSTILE,
            AudienceProfile::Distracted => &DISTRACTED,
            AudienceProfile::Friendly => &FRIENDLY,
        }
    }
}

impl fmt::Display for AudienceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudienceProfile {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        AudienceProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| CoachError::UnknownProfile(s.to_string()))
    }
}

/// Ambient sound categories the host knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbianceSound {
    /// Dense silence, full attention.
    AttentiveSilence,
    /// Light collective breathing.
    CalmBreath,
    LightMurmur,
    /// Chairs, shuffling.
    Restlessness,
    /// Distraction noises: the room is drifting away.
    Disengagement,
    /// A soft approving "hmm".
    MicroApproval,
    /// Tense silence.
    Tension,
    LightApplause,
    WarmApplause,
}

/// A timed reaction as authored in a profile table. Durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionTemplate {
    pub sound: AmbianceSound,
    pub intensity: f32,
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
}

const fn reaction(
    sound: AmbianceSound,
    intensity: f32,
    duration_ms: u64,
    delay_ms: u64,
    fade_in_ms: u64,
    fade_out_ms: u64,
) -> Option<ReactionTemplate> {
    Some(ReactionTemplate {
        sound,
        intensity,
        duration_ms,
        delay_ms,
        fade_in_ms,
        fade_out_ms,
    })
}

/// One optional template per trigger kind. `None` means the profile
/// ignores that trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionTable {
    pub user_slowing: Option<ReactionTemplate>,
    pub user_rushing: Option<ReactionTemplate>,
    pub good_silence: Option<ReactionTemplate>,
    pub hesitations: Option<ReactionTemplate>,
    pub strong_phrase: Option<ReactionTemplate>,
    pub filler_words: Option<ReactionTemplate>,
    pub energy_peak: Option<ReactionTemplate>,
    pub energy_drop: Option<ReactionTemplate>,
    pub monotone: Option<ReactionTemplate>,
    pub session_start: Option<ReactionTemplate>,
    pub session_end: Option<ReactionTemplate>,
}

impl ReactionTable {
    pub fn get(&self, trigger: TriggerKind) -> Option<&ReactionTemplate> {
        match trigger {
            TriggerKind::UserSlowing => self.user_slowing.as_ref(),
            TriggerKind::UserRushing => self.user_rushing.as_ref(),
            TriggerKind::GoodSilence => self.good_silence.as_ref(),
            TriggerKind::Hesitations => self.hesitations.as_ref(),
            TriggerKind::StrongPhrase => self.strong_phrase.as_ref(),
            TriggerKind::FillerWords => self.filler_words.as_ref(),
            TriggerKind::EnergyPeak => self.energy_peak.as_ref(),
            TriggerKind::EnergyDrop => self.energy_drop.as_ref(),
            TriggerKind::Monotone => self.monotone.as_ref(),
            TriggerKind::SessionStart => self.session_start.as_ref(),
            TriggerKind::SessionEnd => self.session_end.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudienceProfileConfig {
    pub name: &'static str,
    pub description: &'static str,
    /// Attention the audience walks in with (0-1).
    pub base_attention: f32,
    /// Subtracted from attention on every decay tick.
    pub attention_decay_rate: f32,
    /// Scales every recovery event.
    pub attention_recovery_rate: f32,
    /// Scales every emitted reaction's intensity (0-1).
    pub reactivity_level: f32,
    pub reactions: ReactionTable,
}

use AmbianceSound::*;

pub static NEUTRAL: AudienceProfileConfig = AudienceProfileConfig {
    name: "Neutral audience",
    description: "A standard room, neither warm nor cold",
    base_attention: 0.6,
    attention_decay_rate: 0.02,
    attention_recovery_rate: 0.05,
    reactivity_level: 0.5,
    reactions: ReactionTable {
        user_slowing: reaction(AttentiveSilence, 0.6, 3000, 500, 800, 1200),
        user_rushing: reaction(Restlessness, 0.3, 2000, 1000, 600, 800),
        good_silence: reaction(AttentiveSilence, 0.8, 2500, 200, 400, 600),
        hesitations: reaction(LightMurmur, 0.2, 1500, 800, 500, 700),
        strong_phrase: reaction(MicroApproval, 0.5, 1200, 300, 200, 500),
        filler_words: None,
        energy_peak: reaction(AttentiveSilence, 0.7, 2000, 400, 300, 800),
        energy_drop: reaction(CalmBreath, 0.3, 2500, 600, 800, 1000),
        monotone: reaction(Restlessness, 0.2, 1800, 2000, 700, 900),
        session_start: reaction(CalmBreath, 0.4, 4000, 0, 1500, 2000),
        session_end: reaction(LightApplause, 0.6, 3500, 500, 400, 1500),
    },
};

pub static COLD_JURY: AudienceProfileConfig = AudienceProfileConfig {
    name: "Cold jury",
    description: "Demanding evaluators who give little away",
    base_attention: 0.8,
    attention_decay_rate: 0.04,
    attention_recovery_rate: 0.02,
    reactivity_level: 0.3,
    reactions: ReactionTable {
        user_slowing: reaction(Tension, 0.5, 2500, 300, 600, 800),
        user_rushing: reaction(Tension, 0.6, 2000, 500, 400, 600),
        good_silence: reaction(AttentiveSilence, 0.9, 3000, 100, 200, 400),
        hesitations: reaction(Restlessness, 0.4, 1800, 500, 400, 600),
        strong_phrase: reaction(AttentiveSilence, 0.7, 1500, 200, 150, 400),
        filler_words: reaction(Tension, 0.3, 1200, 600, 300, 500),
        energy_peak: reaction(AttentiveSilence, 0.8, 2200, 300, 200, 600),
        energy_drop: reaction(Restlessness, 0.3, 2000, 800, 600, 800),
        monotone: reaction(Disengagement, 0.5, 2500, 1500, 800, 1000),
        session_start: reaction(Tension, 0.4, 3000, 0, 1000, 1500),
        // A jury does not applaud on its own.
        session_end: None,
    },
};

pub static ENTHUSIASTIC: AudienceProfileConfig = AudienceProfileConfig {
    name: "Enthusiastic team",
    description: "Supportive colleagues who react readily",
    base_attention: 0.7,
    attention_decay_rate: 0.01,
    attention_recovery_rate: 0.08,
    reactivity_level: 0.8,
    reactions: ReactionTable {
        user_slowing: reaction(AttentiveSilence, 0.7, 2500, 300, 500, 800),
        user_rushing: reaction(CalmBreath, 0.3, 1500, 600, 400, 600),
        good_silence: reaction(AttentiveSilence, 0.85, 2800, 150, 300, 500),
        hesitations: None,
        strong_phrase: reaction(MicroApproval, 0.7, 1500, 200, 150, 600),
        filler_words: None,
        energy_peak: reaction(MicroApproval, 0.8, 1800, 250, 200, 700),
        energy_drop: reaction(CalmBreath, 0.2, 2000, 500, 600, 800),
        monotone: reaction(CalmBreath, 0.25, 2200, 3000, 900, 1100),
        session_start: reaction(CalmBreath, 0.5, 3500, 0, 1200, 1800),
        session_end: reaction(WarmApplause, 0.8, 4500, 300, 300, 2000),
    },
};

pub static HOSTILE: AudienceProfileConfig = AudienceProfileConfig {
    name: "Hostile client",
    description: "A sceptical, impatient counterpart",
    base_attention: 0.4,
    attention_decay_rate: 0.06,
    attention_recovery_rate: 0.03,
    reactivity_level: 0.7,
    reactions: ReactionTable {
        user_slowing: reaction(Tension, 0.6, 2000, 400, 500, 700),
        user_rushing: reaction(Restlessness, 0.5, 2200, 600, 400, 800),
        good_silence: reaction(Tension, 0.5, 1800, 300, 300, 500),
        hesitations: reaction(Restlessness, 0.6, 2000, 400, 350, 650),
        strong_phrase: reaction(AttentiveSilence, 0.6, 1800, 350, 250, 550),
        filler_words: reaction(Restlessness, 0.4, 1500, 500, 300, 500),
        energy_peak: reaction(AttentiveSilence, 0.65, 2000, 400, 300, 700),
        energy_drop: reaction(Disengagement, 0.5, 2500, 700, 600, 900),
        monotone: reaction(Disengagement, 0.7, 3000, 1000, 700, 1200),
        session_start: reaction(Tension, 0.5, 2500, 0, 800, 1200),
        session_end: None,
    },
};

pub static DISTRACTED: AudienceProfileConfig = AudienceProfileConfig {
    name: "Distracted audience",
    description: "A room that drifts off easily",
    base_attention: 0.35,
    attention_decay_rate: 0.08,
    attention_recovery_rate: 0.04,
    reactivity_level: 0.6,
    reactions: ReactionTable {
        user_slowing: reaction(Disengagement, 0.3, 2000, 1500, 800, 1000),
        user_rushing: reaction(Restlessness, 0.4, 2200, 800, 600, 900),
        good_silence: reaction(AttentiveSilence, 0.5, 1500, 500, 400, 600),
        hesitations: reaction(Disengagement, 0.5, 2500, 600, 600, 900),
        strong_phrase: reaction(AttentiveSilence, 0.7, 2000, 300, 300, 700),
        filler_words: reaction(Disengagement, 0.35, 1800, 700, 500, 700),
        energy_peak: reaction(AttentiveSilence, 0.75, 2200, 350, 250, 800),
        energy_drop: reaction(Disengagement, 0.6, 3000, 500, 700, 1100),
        monotone: reaction(Disengagement, 0.8, 3500, 800, 800, 1400),
        session_start: reaction(LightMurmur, 0.4, 3000, 0, 1000, 1500),
        session_end: reaction(LightApplause, 0.4, 2500, 800, 400, 1200),
    },
};

pub static FRIENDLY: AudienceProfileConfig = AudienceProfileConfig {
    name: "Friendly ally",
    description: "Someone close who supports you unconditionally",
    base_attention: 0.9,
    attention_decay_rate: 0.005,
    attention_recovery_rate: 0.1,
    reactivity_level: 0.7,
    reactions: ReactionTable {
        user_slowing: reaction(AttentiveSilence, 0.8, 3000, 200, 600, 1000),
        user_rushing: reaction(CalmBreath, 0.2, 1500, 800, 500, 700),
        good_silence: reaction(AttentiveSilence, 0.9, 3200, 100, 200, 400),
        hesitations: None,
        strong_phrase: reaction(MicroApproval, 0.75, 1600, 200, 150, 650),
        filler_words: None,
        energy_peak: reaction(MicroApproval, 0.85, 1800, 200, 150, 750),
        energy_drop: reaction(CalmBreath, 0.15, 2000, 600, 700, 900),
        monotone: None,
        session_start: reaction(CalmBreath, 0.6, 4000, 0, 1500, 2000),
        session_end: reaction(WarmApplause, 0.9, 5000, 200, 250, 2500),
    },
};
