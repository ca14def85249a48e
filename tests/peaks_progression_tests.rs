use rand::rngs::StdRng;
use rand::SeedableRng;
use stagecraft::debrief::peaks::MAX_PEAK_MOMENTS;
use stagecraft::debrief::progression::{AXIS_MAX, AXIS_START};
use stagecraft::debrief::{
    detect_peak_moments, progress_increment, AudioAnalysis, PeakKind, ProgressAxes, ProgressAxis,
};

fn rich_analysis() -> AudioAnalysis {
    let mut analysis = AudioAnalysis::default();
    analysis.energy.peak_timestamps = vec![5.0, 17.5, 40.0];
    analysis.silences.count = 4;
    analysis.silences.well_placed = 3;
    analysis.clarity.articulation = 0.9;
    analysis.prosody.melodic_variation = 0.6;
    analysis
}

#[test]
fn test_peaks_capped_and_sorted() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let peaks = detect_peak_moments(Some(&rich_analysis()), 60.0, &mut rng);

        assert_eq!(peaks.len(), MAX_PEAK_MOMENTS);
        assert!(peaks.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn test_energy_peak_scores_in_range() {
    let mut analysis = AudioAnalysis::default();
    analysis.energy.peak_timestamps = vec![3.0, 9.0];

    let mut rng = StdRng::seed_from_u64(9);
    let peaks = detect_peak_moments(Some(&analysis), 20.0, &mut rng);
    assert_eq!(peaks.len(), 2);
    for p in &peaks {
        assert_eq!(p.kind, PeakKind::Energy);
        assert!(p.score >= 0.7 && p.score < 1.0);
        assert!(p.timestamp == 3.0 || p.timestamp == 9.0);
    }
}

#[test]
fn test_derived_peak_positions() {
    let mut analysis = AudioAnalysis::default();
    analysis.silences.well_placed = 2;
    analysis.clarity.articulation = 0.86;
    analysis.prosody.melodic_variation = 0.55;

    let mut rng = StdRng::seed_from_u64(0);
    let peaks = detect_peak_moments(Some(&analysis), 100.0, &mut rng);
    assert_eq!(peaks.len(), 3);

    // impact 0.85, clarity 0.86, silence 0.8
    assert_eq!(peaks[0].kind, PeakKind::Clarity);
    assert!((peaks[0].timestamp - 70.0).abs() < 1e-4);
    assert_eq!(peaks[1].kind, PeakKind::Impact);
    assert!((peaks[1].timestamp - 60.0).abs() < 1e-4);
    assert_eq!(peaks[2].kind, PeakKind::Silence);
    assert!((peaks[2].timestamp - 50.0).abs() < 1e-4);
    assert!((peaks[2].score - 0.8).abs() < 1e-4);
}

#[test]
fn test_no_peaks_without_analysis() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(detect_peak_moments(None, 60.0, &mut rng).is_empty());
    assert!(detect_peak_moments(Some(&AudioAnalysis::default()), 60.0, &mut rng).is_empty());
}

#[test]
fn test_progress_increment() {
    assert_eq!(progress_increment(0.0), 0);
    assert_eq!(progress_increment(0.5), 3);
    assert_eq!(progress_increment(0.79), 4);
    assert_eq!(progress_increment(1.0), 5);
    assert_eq!(progress_increment(4.0), 5);
}

#[test]
fn test_axes_start_and_cap() {
    let mut axes = ProgressAxes::default();
    for axis in ProgressAxis::ALL {
        assert_eq!(axes.get(axis), AXIS_START);
    }

    assert_eq!(axes.record_session(ProgressAxis::Impact, 0.8), 24);
    assert_eq!(axes.get(ProgressAxis::Clarity), AXIS_START);

    // One session never moves an axis by more than five.
    assert_eq!(axes.apply(ProgressAxis::Clarity, 40), 25);

    axes.leadership = 98;
    assert_eq!(axes.apply(ProgressAxis::Leadership, 5), AXIS_MAX);
    assert_eq!(axes.apply(ProgressAxis::Leadership, 5), AXIS_MAX);
}

#[test]
fn test_axes_serde() {
    let axes: ProgressAxes = serde_json::from_str(
        r#"{"presence":40,"clarity":21,"stability":20,"impact":33,"leadership":100}"#,
    )
    .unwrap();
    assert_eq!(axes.get(ProgressAxis::Presence), 40);
    assert_eq!(axes.get(ProgressAxis::Leadership), 100);
}
