use serde::{Deserialize, Serialize};

/// End-of-exercise aggregate produced by the audio analysis collaborator.
/// Read-only input to the debrief.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioAnalysis {
    pub rhythm: RhythmStats,
    pub silences: SilenceStats,
    pub energy: EnergyStats,
    pub clarity: ClarityStats,
    pub prosody: ProsodyStats,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RhythmStats {
    pub words_per_minute: f32,
    /// Variation coefficient of the speaking rate.
    pub variation: f32,
    pub is_monotone: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SilenceStats {
    pub count: u32,
    pub average_duration_ms: f32,
    pub well_placed: u32,
}

impl SilenceStats {
    /// Share of silences that landed well. Can exceed 1.0 if the analyzer
    /// over-reports `well_placed`.
    pub fn well_placed_ratio(&self) -> f32 {
        self.well_placed as f32 / self.count.max(1) as f32
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyStats {
    /// 0-1
    pub level: f32,
    pub consistency: f32,
    /// Seconds from the start of the exercise.
    pub peak_timestamps: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClarityStats {
    /// 0-1
    pub articulation: f32,
    pub hesitations: Vec<String>,
    pub filler_words: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProsodyStats {
    pub melodic_variation: f32,
    pub end_of_sentence_drops: u32,
}
