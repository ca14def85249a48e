use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::analysis::AudioAnalysis;
use super::cards::{AdviceCard, AdviceCatalog, ProgressAxis};
use super::peaks::{detect_peak_moments, PeakMoment};
use super::score::{internal_score, FeedbackTier};
use super::templates::{anchor_phrases, openers, DetailNote, Strength};

/// Peak moments above this score are worth replaying to the speaker.
const WOW_THRESHOLD: f32 = 0.8;
const MAX_STRENGTHS: usize = 2;

/// Everything the host aggregated for one finished exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub duration_secs: f32,
    pub analysis: Option<AudioAnalysis>,
    pub transcription: String,
    /// 0-1 average of the simulated audience's attention.
    pub audience_attention_avg: f32,
    /// Already sorted, best first (see [`detect_peak_moments`]).
    pub peak_moments: Vec<PeakMoment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebriefResult {
    pub main_feedback: String,
    pub tier: FeedbackTier,
    /// At most two.
    pub strengths: Vec<Strength>,
    pub suggested_axis: ProgressAxis,
    pub advice_card: AdviceCard,
    pub wow_moment: Option<PeakMoment>,
    /// 0-1, drives progression, never displayed.
    pub internal_score: f32,
    pub anchor_phrase: String,
}

/// Builds the debrief for one exercise. `session_card_id` pins the advice
/// card when the exercise has one of its own; an id missing from the
/// catalog falls back to axis-based selection.
pub fn generate_debrief<R: Rng + ?Sized>(
    metrics: &SessionMetrics,
    session_card_id: Option<&str>,
    catalog: &AdviceCatalog,
    rng: &mut R,
) -> DebriefResult {
    let analysis = metrics.analysis.as_ref();
    let attention = metrics.audience_attention_avg.clamp(0.0, 1.0);

    let score = internal_score(analysis, attention, &metrics.peak_moments);
    let tier = FeedbackTier::from_score(score);
    let main_feedback = main_feedback(tier, analysis, rng);
    let strengths = identify_strengths(analysis, attention);
    let suggested_axis = weakest_axis(analysis);
    let advice_card = select_advice_card(catalog, suggested_axis, session_card_id, rng).clone();
    let wow_moment = select_wow_moment(&metrics.peak_moments);
    let anchor_phrase = anchor_phrase(suggested_axis, rng).to_string();

    info!(
        score,
        ?tier,
        axis = %suggested_axis,
        card = %advice_card.id,
        wow = wow_moment.is_some(),
        "Debrief generated"
    );

    DebriefResult {
        main_feedback,
        tier,
        strengths,
        suggested_axis,
        advice_card,
        wow_moment,
        internal_score: score,
        anchor_phrase,
    }
}

/// A tier opener, optionally followed by one secondary detail as a second
/// paragraph.
pub fn main_feedback<R: Rng + ?Sized>(tier: FeedbackTier, analysis: Option<&AudioAnalysis>, rng: &mut R) -> String {
    let pool = openers(tier);
    let opener = pool[rng.random_range(0..pool.len())];

    let notes = analysis.map(detail_notes).unwrap_or_default();
    match notes.choose(rng) {
        Some(note) => format!("{}\n\n{}", opener, note.text()),
        None => opener.to_string(),
    }
}

/// Candidate secondary details. At most one rhythm note and one silence note.
pub fn detail_notes(analysis: &AudioAnalysis) -> Vec<DetailNote> {
    let mut notes = Vec::new();

    if analysis.rhythm.words_per_minute > 160.0 {
        notes.push(DetailNote::RhythmTooFast);
    } else if analysis.rhythm.variation > 0.3 {
        notes.push(DetailNote::RhythmVaried);
    }

    if analysis.silences.well_placed >= 3 {
        notes.push(DetailNote::SilencesWellUsed);
    } else if analysis.silences.count < 2 {
        notes.push(DetailNote::SilencesLacking);
    }

    notes
}

/// First two matches in priority order.
pub fn identify_strengths(analysis: Option<&AudioAnalysis>, attention_avg: f32) -> Vec<Strength> {
    let Some(analysis) = analysis else {
        return if attention_avg > 0.6 {
            vec![Strength::HeldAttention]
        } else {
            Vec::new()
        };
    };

    let checks = [
        (analysis.energy.consistency > 0.7, Strength::ConsistentEnergy),
        (analysis.silences.well_placed >= 2, Strength::WellPlacedSilences),
        (analysis.clarity.articulation > 0.8, Strength::ClearArticulation),
        (analysis.prosody.melodic_variation > 0.4, Strength::LivelyVoice),
        (
            analysis.rhythm.variation > 0.3 && !analysis.rhythm.is_monotone,
            Strength::TexturedRhythm,
        ),
        (attention_avg > 0.7, Strength::CapturingPresence),
    ];

    checks
        .into_iter()
        .filter_map(|(holds, strength)| holds.then_some(strength))
        .take(MAX_STRENGTHS)
        .collect()
}

/// The axis whose proxy measure is lowest. Scanning starts from
/// `Presence` at 1.0 and only a strictly lower value wins, so ties keep
/// the earlier axis.
pub fn weakest_axis(analysis: Option<&AudioAnalysis>) -> ProgressAxis {
    let Some(analysis) = analysis else {
        return ProgressAxis::Presence;
    };

    let proxies = [
        (ProgressAxis::Presence, analysis.energy.level),
        (ProgressAxis::Clarity, analysis.clarity.articulation),
        (ProgressAxis::Stability, analysis.energy.consistency),
        (ProgressAxis::Impact, analysis.prosody.melodic_variation),
        (ProgressAxis::Leadership, analysis.silences.well_placed_ratio()),
    ];

    let mut weakest = ProgressAxis::Presence;
    let mut lowest = 1.0;
    for (axis, value) in proxies {
        if value < lowest {
            lowest = value;
            weakest = axis;
        }
    }
    weakest
}

pub fn select_advice_card<'a, R: Rng + ?Sized>(
    catalog: &'a AdviceCatalog,
    axis: ProgressAxis,
    session_card_id: Option<&str>,
    rng: &mut R,
) -> &'a AdviceCard {
    if let Some(id) = session_card_id {
        match catalog.get(id) {
            Some(card) => return card,
            None => debug!(card = id, "Session card not in catalog, selecting by axis"),
        }
    }

    if let Some(&card) = catalog.by_category(axis).choose(rng) {
        return card;
    }

    // A catalog is never empty.
    let cards = catalog.cards();
    &cards[rng.random_range(0..cards.len())]
}

pub fn select_wow_moment(peaks: &[PeakMoment]) -> Option<PeakMoment> {
    peaks.iter().find(|p| p.score > WOW_THRESHOLD).cloned()
}

pub fn anchor_phrase<R: Rng + ?Sized>(axis: ProgressAxis, rng: &mut R) -> &'static str {
    let pool = anchor_phrases(axis);
    pool[rng.random_range(0..pool.len())]
}

/// Catalog plus an owned random source, so a seeded engine produces the
/// same debrief for the same inputs.
pub struct DebriefEngine<R: Rng = StdRng> {
    catalog: AdviceCatalog,
    rng: R,
}

impl DebriefEngine<StdRng> {
    pub fn new(catalog: AdviceCatalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    pub fn with_seed(catalog: AdviceCatalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DebriefEngine<R> {
    pub fn with_rng(catalog: AdviceCatalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    pub fn catalog(&self) -> &AdviceCatalog {
        &self.catalog
    }

    pub fn detect_peak_moments(&mut self, analysis: Option<&AudioAnalysis>, duration_secs: f32) -> Vec<PeakMoment> {
        detect_peak_moments(analysis, duration_secs, &mut self.rng)
    }

    pub fn generate(&mut self, metrics: &SessionMetrics, session_card_id: Option<&str>) -> DebriefResult {
        generate_debrief(metrics, session_card_id, &self.catalog, &mut self.rng)
    }
}
