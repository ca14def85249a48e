use rand::rngs::StdRng;
use rand::SeedableRng;
use stagecraft::ambiance::MetricsSampler;
use stagecraft::config::AmbianceConfig;
use stagecraft::error::CoachError;

#[test]
fn test_defaults() {
    let config = AmbianceConfig::default();
    assert_eq!(config.cooldown_ms, 3000);
    assert_eq!(config.decay_interval_ms, 1000);
    assert_eq!(config.stop_grace_ms, 500);
    assert_eq!(config.attention_floor, 0.1);
    assert_eq!(config.event_buffer, 100);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = AmbianceConfig::from_json_str(r#"{ "cooldown_ms": 1500, "event_buffer": 0 }"#).unwrap();
    assert_eq!(config.cooldown_ms, 1500);
    assert_eq!(config.decay_interval_ms, 1000);
    assert_eq!(config.event_buffer, 1);

    let config = AmbianceConfig::from_json_str(r#"{ "attention_floor": 3.0 }"#).unwrap();
    assert_eq!(config.attention_floor, 1.0);
}

#[test]
fn test_config_errors() {
    assert!(matches!(
        AmbianceConfig::from_json_str("{ cooldown_ms: }"),
        Err(CoachError::ConfigParse(_))
    ));

    let missing = std::env::temp_dir().join("stagecraft-no-such-config.json");
    match AmbianceConfig::from_json_file(&missing) {
        Err(CoachError::ConfigRead { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_config_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("stagecraft-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "stop_grace_ms": 250 }"#).unwrap();

    let config = AmbianceConfig::from_json_file(&path).unwrap();
    assert_eq!(config.stop_grace_ms, 250);
    assert_eq!(config.cooldown_ms, 3000);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_sampler_carries_history() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut sampler = MetricsSampler::new(250);

    let first = sampler.next(0.05, &mut rng);
    assert!(first.is_currently_silent);
    assert_eq!(first.silence_duration_ms, 250);
    assert_eq!(first.previous_wpm, 120.0);
    assert!(first.words_per_minute >= 104.0 && first.words_per_minute < 124.0);

    let second = sampler.next(0.0, &mut rng);
    assert_eq!(second.silence_duration_ms, 500);
    assert_eq!(second.previous_wpm, first.words_per_minute);
    assert_eq!(second.previous_energy_level, 0.05);

    let voiced = sampler.next(0.9, &mut rng);
    assert!(!voiced.is_currently_silent);
    assert_eq!(voiced.silence_duration_ms, 0);
    assert!(voiced.hesitation_count < 3);
    assert!(voiced.filler_word_count < 2);
    assert!(voiced.melodic_variation >= 0.2 && voiced.melodic_variation < 0.6);
    assert_eq!(sampler.previous(), &voiced);
}
