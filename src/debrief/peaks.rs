use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::analysis::AudioAnalysis;

pub const MAX_PEAK_MOMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakKind {
    Energy,
    Silence,
    Clarity,
    Impact,
}

/// A standout instant of a finished exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakMoment {
    /// Seconds from the start of the exercise.
    pub timestamp: f32,
    pub kind: PeakKind,
    /// Quality of the moment. Silence and impact moments can score above 1.0.
    pub score: f32,
    pub description: String,
}

/// Extracts the best moments of an exercise, highest score first, at most
/// [`MAX_PEAK_MOMENTS`]. Energy peaks get a random score in [0.7, 1.0).
pub fn detect_peak_moments<R: Rng + ?Sized>(
    analysis: Option<&AudioAnalysis>,
    duration_secs: f32,
    rng: &mut R,
) -> Vec<PeakMoment> {
    let Some(analysis) = analysis else {
        return Vec::new();
    };
    let duration = duration_secs.max(0.0);
    let mut moments = Vec::new();

    for &timestamp in &analysis.energy.peak_timestamps {
        moments.push(PeakMoment {
            timestamp,
            kind: PeakKind::Energy,
            score: 0.7 + rng.random_range(0.0f32..0.3),
            description: "Remarkable surge of energy".to_string(),
        });
    }

    let well_placed = analysis.silences.well_placed;
    if well_placed >= 2 {
        moments.push(PeakMoment {
            timestamp: duration / 2.0,
            kind: PeakKind::Silence,
            score: 0.6 + well_placed as f32 * 0.1,
            description: "Powerful, controlled silence".to_string(),
        });
    }

    let articulation = analysis.clarity.articulation;
    if articulation > 0.85 {
        moments.push(PeakMoment {
            timestamp: duration * 0.7,
            kind: PeakKind::Clarity,
            score: articulation,
            description: "Crystal-clear delivery".to_string(),
        });
    }

    let variation = analysis.prosody.melodic_variation;
    if variation > 0.5 {
        moments.push(PeakMoment {
            timestamp: duration * 0.6,
            kind: PeakKind::Impact,
            score: variation + 0.3,
            description: "Moment of emotional impact".to_string(),
        });
    }

    // Stable sort: equal scores keep detection order.
    moments.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    moments.truncate(MAX_PEAK_MOMENTS);
    moments
}
