use serde::{Deserialize, Serialize};

use super::analysis::AudioAnalysis;
use super::peaks::PeakMoment;

/// Score returned when no analysis is available.
pub const NEUTRAL_SCORE: f32 = 0.5;

const ATTENTION_WEIGHT: f32 = 0.5;
const PEAK_WEIGHT: f32 = 0.3;
const FILLER_PENALTY_PER_WORD: f32 = 0.02;
const MAX_FILLER_PENALTY: f32 = 0.2;

/// Blended 0-1 quality of an exercise. Not shown to the speaker; drives
/// the feedback tier and progression increments.
///
/// Each factor adds its contribution to the numerator and its weight to the
/// divisor. The peak factor is omitted entirely when there are no peaks.
/// The filler penalty comes off the numerator before normalization.
pub fn internal_score(analysis: Option<&AudioAnalysis>, attention_avg: f32, peaks: &[PeakMoment]) -> f32 {
    let Some(analysis) = analysis else {
        return NEUTRAL_SCORE;
    };

    let mut score = 0.0;
    let mut weights = 0.0;

    score += rhythm_factor(analysis.rhythm.words_per_minute);
    weights += 1.0;

    score += analysis.silences.well_placed_ratio() * 0.9;
    weights += 1.0;

    score += analysis.energy.level * 0.8;
    weights += 1.0;

    score += analysis.clarity.articulation * 0.9;
    weights += 1.0;

    score += analysis.prosody.melodic_variation * 0.7;
    weights += 1.0;

    score += attention_avg * ATTENTION_WEIGHT;
    weights += ATTENTION_WEIGHT;

    if !peaks.is_empty() {
        let mean = peaks.iter().map(|p| p.score).sum::<f32>() / peaks.len() as f32;
        score += mean * PEAK_WEIGHT;
        weights += PEAK_WEIGHT;
    }

    score -= (analysis.clarity.filler_words as f32 * FILLER_PENALTY_PER_WORD).min(MAX_FILLER_PENALTY);

    (score / weights).clamp(0.0, 1.0)
}

/// Optimal band 120-150 WPM, acceptable band 100-170.
fn rhythm_factor(wpm: f32) -> f32 {
    if (120.0..=150.0).contains(&wpm) {
        0.8
    } else if (100.0..=170.0).contains(&wpm) {
        0.6
    } else {
        0.3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Excellent,
    Good,
    Progress,
}

impl FeedbackTier {
    pub fn from_score(score: f32) -> Self {
        if score > 0.75 {
            FeedbackTier::Excellent
        } else if score > 0.55 {
            FeedbackTier::Good
        } else {
            FeedbackTier::Progress
        }
    }
}
