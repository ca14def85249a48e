use rand::rngs::StdRng;
use rand::SeedableRng;
use stagecraft::debrief::engine::{
    detail_notes, identify_strengths, main_feedback, select_advice_card, select_wow_moment, weakest_axis,
};
use stagecraft::debrief::templates::{anchor_phrases, openers};
use stagecraft::debrief::{
    generate_debrief, internal_score, AdviceCard, AdviceCatalog, AudioAnalysis, ClarityStats, DebriefEngine,
    DetailNote, EnergyStats, FeedbackTier, PeakKind, PeakMoment, ProgressAxis, ProsodyStats, RhythmStats,
    SessionMetrics, SilenceStats, Strength,
};
use stagecraft::error::CoachError;

fn strong_analysis() -> AudioAnalysis {
    AudioAnalysis {
        rhythm: RhythmStats {
            words_per_minute: 130.0,
            variation: 0.2,
            is_monotone: false,
        },
        silences: SilenceStats {
            count: 4,
            average_duration_ms: 1200.0,
            well_placed: 4,
        },
        energy: EnergyStats {
            level: 0.9,
            consistency: 0.9,
            peak_timestamps: vec![],
        },
        clarity: ClarityStats {
            articulation: 0.9,
            hesitations: vec![],
            filler_words: 0,
        },
        prosody: ProsodyStats {
            melodic_variation: 0.9,
            end_of_sentence_drops: 0,
        },
    }
}

fn peak(score: f32) -> PeakMoment {
    PeakMoment {
        timestamp: 12.0,
        kind: PeakKind::Energy,
        score,
        description: "Remarkable surge of energy".to_string(),
    }
}

fn metrics(analysis: Option<AudioAnalysis>, attention: f32, peaks: Vec<PeakMoment>) -> SessionMetrics {
    SessionMetrics {
        duration_secs: 60.0,
        analysis,
        transcription: String::new(),
        audience_attention_avg: attention,
        peak_moments: peaks,
    }
}

fn card(id: &str, category: ProgressAxis) -> AdviceCard {
    AdviceCard {
        id: id.to_string(),
        title: format!("Card {}", id),
        principle: String::new(),
        application: String::new(),
        anchor_phrase: String::new(),
        category,
    }
}

#[test]
fn test_missing_analysis_gives_neutral_debrief() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = generate_debrief(&metrics(None, 0.5, vec![]), None, &AdviceCatalog::builtin(), &mut rng);

    assert_eq!(result.internal_score, 0.5);
    assert_eq!(result.tier, FeedbackTier::Progress);
    assert_eq!(result.suggested_axis, ProgressAxis::Presence);
    assert!(!result.main_feedback.is_empty());
    assert!(openers(FeedbackTier::Progress).contains(&result.main_feedback.as_str()));
    assert!(result.strengths.is_empty());
    assert_eq!(result.advice_card.category, ProgressAxis::Presence);
    assert!(anchor_phrases(ProgressAxis::Presence).contains(&result.anchor_phrase.as_str()));
}

#[test]
fn test_missing_analysis_strength_fallback() {
    assert_eq!(identify_strengths(None, 0.7), vec![Strength::HeldAttention]);
    assert!(identify_strengths(None, 0.6).is_empty());
}

#[test]
fn test_strong_session_is_excellent() {
    let mut rng = StdRng::seed_from_u64(7);
    let m = metrics(Some(strong_analysis()), 0.9, vec![peak(0.9)]);
    let result = generate_debrief(&m, None, &AdviceCatalog::builtin(), &mut rng);

    assert!(result.internal_score > 0.75, "score {}", result.internal_score);
    assert_eq!(result.tier, FeedbackTier::Excellent);
    assert_eq!(result.strengths, vec![Strength::ConsistentEnergy, Strength::WellPlacedSilences]);
    assert_eq!(result.wow_moment, Some(peak(0.9)));
    // Every proxy is 0.9 except leadership (1.0): the first one wins.
    assert_eq!(result.suggested_axis, ProgressAxis::Presence);
}

#[test]
fn test_score_weights() {
    let analysis = strong_analysis();
    // (0.8 + 0.9 + 0.72 + 0.81 + 0.63 + 0.45) / 5.5
    let without_peaks = internal_score(Some(&analysis), 0.9, &[]);
    assert!((without_peaks - 4.31 / 5.5).abs() < 1e-4);

    let with_peak = internal_score(Some(&analysis), 0.9, &[peak(0.9)]);
    assert!((with_peak - 4.58 / 5.8).abs() < 1e-4);

    let chatty = AudioAnalysis {
        clarity: ClarityStats {
            filler_words: 50,
            ..analysis.clarity.clone()
        },
        ..analysis.clone()
    };
    let penalized = internal_score(Some(&chatty), 0.9, &[]);
    assert!((without_peaks - penalized - 0.2 / 5.5).abs() < 1e-4);
}

#[test]
fn test_score_rhythm_bands() {
    let with_wpm = |wpm: f32| {
        let analysis = AudioAnalysis {
            rhythm: RhythmStats {
                words_per_minute: wpm,
                ..RhythmStats::default()
            },
            ..AudioAnalysis::default()
        };
        internal_score(Some(&analysis), 0.0, &[]) * 5.5
    };

    assert!((with_wpm(135.0) - 0.8).abs() < 1e-4);
    assert!((with_wpm(165.0) - 0.6).abs() < 1e-4);
    assert!((with_wpm(200.0) - 0.3).abs() < 1e-4);
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(FeedbackTier::from_score(0.76), FeedbackTier::Excellent);
    assert_eq!(FeedbackTier::from_score(0.75), FeedbackTier::Good);
    assert_eq!(FeedbackTier::from_score(0.56), FeedbackTier::Good);
    assert_eq!(FeedbackTier::from_score(0.55), FeedbackTier::Progress);
}

#[test]
fn test_detail_notes_one_per_pair() {
    let mut analysis = strong_analysis();
    analysis.rhythm.words_per_minute = 170.0;
    analysis.rhythm.variation = 0.5;
    analysis.silences.well_placed = 3;
    analysis.silences.count = 1;
    assert_eq!(
        detail_notes(&analysis),
        vec![DetailNote::RhythmTooFast, DetailNote::SilencesWellUsed]
    );

    analysis.rhythm.words_per_minute = 130.0;
    analysis.silences.well_placed = 0;
    assert_eq!(
        detail_notes(&analysis),
        vec![DetailNote::RhythmVaried, DetailNote::SilencesLacking]
    );

    analysis.rhythm.variation = 0.1;
    analysis.silences.count = 2;
    assert!(detail_notes(&analysis).is_empty());
}

#[test]
fn test_main_feedback_paragraphs() {
    let mut rng = StdRng::seed_from_u64(3);

    let mut quiet = strong_analysis();
    quiet.rhythm.variation = 0.1;
    quiet.silences.well_placed = 1;
    quiet.silences.count = 2;
    let text = main_feedback(FeedbackTier::Good, Some(&quiet), &mut rng);
    assert!(openers(FeedbackTier::Good).contains(&text.as_str()));

    let mut fast = quiet.clone();
    fast.rhythm.words_per_minute = 180.0;
    let text = main_feedback(FeedbackTier::Good, Some(&fast), &mut rng);
    let (opener, detail) = text.split_once("\n\n").unwrap();
    assert!(openers(FeedbackTier::Good).contains(&opener));
    assert_eq!(detail, DetailNote::RhythmTooFast.text());
}

#[test]
fn test_strengths_priority_and_limit() {
    let mut analysis = strong_analysis();
    analysis.rhythm.variation = 0.5;
    analysis.prosody.melodic_variation = 0.5;
    assert_eq!(
        identify_strengths(Some(&analysis), 0.9),
        vec![Strength::ConsistentEnergy, Strength::WellPlacedSilences]
    );

    analysis.energy.consistency = 0.5;
    analysis.silences.well_placed = 1;
    analysis.clarity.articulation = 0.5;
    assert_eq!(
        identify_strengths(Some(&analysis), 0.9),
        vec![Strength::LivelyVoice, Strength::TexturedRhythm]
    );

    analysis.rhythm.is_monotone = true;
    analysis.prosody.melodic_variation = 0.2;
    assert_eq!(identify_strengths(Some(&analysis), 0.9), vec![Strength::CapturingPresence]);
    assert!(identify_strengths(Some(&analysis), 0.7).is_empty());
}

#[test]
fn test_weakest_axis() {
    let mut analysis = strong_analysis();
    analysis.clarity.articulation = 0.4;
    assert_eq!(weakest_axis(Some(&analysis)), ProgressAxis::Clarity);

    analysis.silences.well_placed = 1;
    assert_eq!(weakest_axis(Some(&analysis)), ProgressAxis::Leadership);

    // Tie between stability and impact: enumeration order wins.
    let mut tied = strong_analysis();
    tied.energy.consistency = 0.3;
    tied.prosody.melodic_variation = 0.3;
    assert_eq!(weakest_axis(Some(&tied)), ProgressAxis::Stability);

    // Nothing below 1.0.
    let mut perfect = strong_analysis();
    perfect.energy.level = 1.0;
    perfect.clarity.articulation = 1.0;
    perfect.energy.consistency = 1.0;
    perfect.prosody.melodic_variation = 1.0;
    assert_eq!(weakest_axis(Some(&perfect)), ProgressAxis::Presence);

    assert_eq!(weakest_axis(None), ProgressAxis::Presence);
}

#[test]
fn test_advice_card_selection() {
    let catalog = AdviceCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(11);

    let pinned = select_advice_card(&catalog, ProgressAxis::Stability, Some("card-7"), &mut rng);
    assert_eq!(pinned.id, "card-7");

    // Unknown id falls through to the axis; card-11 is the only stability card.
    let fallback = select_advice_card(&catalog, ProgressAxis::Stability, Some("card-99"), &mut rng);
    assert_eq!(fallback.id, "card-11");

    for _ in 0..20 {
        let picked = select_advice_card(&catalog, ProgressAxis::Leadership, None, &mut rng);
        assert_eq!(picked.category, ProgressAxis::Leadership);
    }

    let small = AdviceCatalog::new(vec![card("a", ProgressAxis::Presence)]).unwrap();
    let any = select_advice_card(&small, ProgressAxis::Impact, None, &mut rng);
    assert_eq!(any.id, "a");
}

#[test]
fn test_pinned_card_in_debrief() {
    let mut rng = StdRng::seed_from_u64(5);
    let result = generate_debrief(
        &metrics(Some(strong_analysis()), 0.8, vec![]),
        Some("card-12"),
        &AdviceCatalog::builtin(),
        &mut rng,
    );
    assert_eq!(result.advice_card.id, "card-12");
    assert_eq!(result.advice_card.category, ProgressAxis::Leadership);
    // The anchor phrase follows the weakest axis, not the card.
    assert!(anchor_phrases(result.suggested_axis).contains(&result.anchor_phrase.as_str()));
}

#[test]
fn test_catalog_validation() {
    assert!(matches!(AdviceCatalog::new(vec![]), Err(CoachError::EmptyCatalog)));

    let dup = AdviceCatalog::new(vec![card("x", ProgressAxis::Impact), card("x", ProgressAxis::Clarity)]);
    match dup {
        Err(CoachError::DuplicateCard(id)) => assert_eq!(id, "x"),
        other => panic!("unexpected: {:?}", other.map(|c| c.len())),
    }

    let builtin = AdviceCatalog::builtin();
    assert_eq!(builtin.len(), 14);
    for axis in ProgressAxis::ALL {
        assert!(!builtin.by_category(axis).is_empty(), "no card for {}", axis);
    }
}

#[test]
fn test_wow_moment_threshold() {
    assert_eq!(select_wow_moment(&[peak(0.8), peak(0.7)]), None);
    assert_eq!(select_wow_moment(&[peak(0.95), peak(0.85)]), Some(peak(0.95)));
    assert_eq!(select_wow_moment(&[peak(0.5), peak(0.81)]), Some(peak(0.81)));
    assert_eq!(select_wow_moment(&[]), None);
}

#[test]
fn test_seeded_engines_agree() {
    let m = metrics(Some(strong_analysis()), 0.65, vec![peak(0.85)]);

    let mut a = DebriefEngine::with_seed(AdviceCatalog::builtin(), 42);
    let mut b = DebriefEngine::with_seed(AdviceCatalog::builtin(), 42);
    assert_eq!(a.generate(&m, None), b.generate(&m, None));

    let analysis = strong_analysis();
    assert_eq!(
        a.detect_peak_moments(Some(&analysis), 30.0),
        b.detect_peak_moments(Some(&analysis), 30.0)
    );
}

#[test]
fn test_axis_names_parse() {
    assert_eq!("impact".parse::<ProgressAxis>().unwrap(), ProgressAxis::Impact);
    assert_eq!("Leadership".parse::<ProgressAxis>().unwrap(), ProgressAxis::Leadership);
    assert!(matches!("charm".parse::<ProgressAxis>(), Err(CoachError::UnknownAxis(_))));
    assert_eq!(ProgressAxis::Stability.to_string(), "Stability");
}
