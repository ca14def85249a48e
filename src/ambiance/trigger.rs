use serde::{Deserialize, Serialize};
use std::fmt;

/// Named delivery conditions an audience may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    UserSlowing,
    UserRushing,
    GoodSilence,
    Hesitations,
    /// Never detected from metrics; injected by the host.
    StrongPhrase,
    FillerWords,
    EnergyPeak,
    EnergyDrop,
    Monotone,
    SessionStart,
    SessionEnd,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::UserSlowing => "user_slowing",
            TriggerKind::UserRushing => "user_rushing",
            TriggerKind::GoodSilence => "good_silence",
            TriggerKind::Hesitations => "hesitations",
            TriggerKind::StrongPhrase => "strong_phrase",
            TriggerKind::FillerWords => "filler_words",
            TriggerKind::EnergyPeak => "energy_peak",
            TriggerKind::EnergyDrop => "energy_drop",
            TriggerKind::Monotone => "monotone",
            TriggerKind::SessionStart => "session_start",
            TriggerKind::SessionEnd => "session_end",
        }
    }

    /// Triggers whose successful firing wins back some attention.
    pub fn recovers_attention(&self) -> bool {
        matches!(
            self,
            TriggerKind::GoodSilence | TriggerKind::StrongPhrase | TriggerKind::EnergyPeak
        )
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tick of live speech metrics. The `previous_*` fields are part of the
/// sample: the caller carries them forward, the engine keeps no history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechMetricsSample {
    pub words_per_minute: f32,
    pub previous_wpm: f32,
    /// Length of the ongoing silence, in milliseconds.
    pub silence_duration_ms: u64,
    pub is_currently_silent: bool,
    pub hesitation_count: u32,
    pub filler_word_count: u32,
    /// 0-1
    pub energy_level: f32,
    pub previous_energy_level: f32,
    /// 0-1
    pub melodic_variation: f32,
}

impl Default for SpeechMetricsSample {
    fn default() -> Self {
        Self {
            words_per_minute: 120.0,
            previous_wpm: 120.0,
            silence_duration_ms: 0,
            is_currently_silent: false,
            hesitation_count: 0,
            filler_word_count: 0,
            energy_level: 0.5,
            previous_energy_level: 0.5,
            melodic_variation: 0.3,
        }
    }
}

const SLOWING_RATIO: f32 = -0.20;
const RUSHING_RATIO: f32 = 0.25;
const GOOD_SILENCE_MIN_MS: u64 = 800;
const GOOD_SILENCE_MAX_MS: u64 = 2500;
const HESITATION_THRESHOLD: u32 = 3;
const FILLER_THRESHOLD: u32 = 4;
const ENERGY_JUMP: f32 = 0.2;
const MONOTONE_VARIATION: f32 = 0.15;
/// Below this rate the speaker is mostly silent, not monotone.
const MONOTONE_MIN_WPM: f32 = 60.0;

/// Pure detection: every condition that holds is returned, in a fixed order.
pub fn detect_triggers(sample: &SpeechMetricsSample) -> Vec<TriggerKind> {
    let mut triggers = Vec::new();

    if sample.previous_wpm > 0.0 {
        let change = (sample.words_per_minute - sample.previous_wpm) / sample.previous_wpm;
        if change < SLOWING_RATIO {
            triggers.push(TriggerKind::UserSlowing);
        } else if change > RUSHING_RATIO {
            triggers.push(TriggerKind::UserRushing);
        }
    }

    if sample.is_currently_silent
        && (GOOD_SILENCE_MIN_MS..=GOOD_SILENCE_MAX_MS).contains(&sample.silence_duration_ms)
    {
        triggers.push(TriggerKind::GoodSilence);
    }

    if sample.hesitation_count >= HESITATION_THRESHOLD {
        triggers.push(TriggerKind::Hesitations);
    }

    if sample.filler_word_count >= FILLER_THRESHOLD {
        triggers.push(TriggerKind::FillerWords);
    }

    if sample.energy_level > 0.7 && sample.energy_level - sample.previous_energy_level > ENERGY_JUMP {
        triggers.push(TriggerKind::EnergyPeak);
    }

    if sample.energy_level < 0.3 && sample.previous_energy_level - sample.energy_level > ENERGY_JUMP {
        triggers.push(TriggerKind::EnergyDrop);
    }

    if sample.melodic_variation < MONOTONE_VARIATION && sample.words_per_minute > MONOTONE_MIN_WPM {
        triggers.push(TriggerKind::Monotone);
    }

    triggers
}
