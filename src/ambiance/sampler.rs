use rand::Rng;

use super::trigger::SpeechMetricsSample;

/// Below this input level the speaker counts as silent.
const SILENCE_LEVEL: f32 = 0.1;

/// Turns a live input level into consecutive [`SpeechMetricsSample`]s,
/// carrying the previous WPM, energy and silence length forward so the
/// engine can stay history-free.
///
/// Rate, hesitation and melody figures are rough estimates jittered by
/// `rng` until a real analyzer feeds the host.
#[derive(Debug, Clone)]
pub struct MetricsSampler {
    previous: SpeechMetricsSample,
    tick_ms: u64,
}

impl MetricsSampler {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            previous: SpeechMetricsSample::default(),
            tick_ms,
        }
    }

    pub fn previous(&self) -> &SpeechMetricsSample {
        &self.previous
    }

    pub fn next<R: Rng + ?Sized>(&mut self, audio_level: f32, rng: &mut R) -> SpeechMetricsSample {
        let level = audio_level.clamp(0.0, 1.0);
        let silent = level < SILENCE_LEVEL;

        let sample = SpeechMetricsSample {
            words_per_minute: 100.0 + level * 80.0 + rng.random_range(0.0f32..20.0),
            previous_wpm: self.previous.words_per_minute,
            silence_duration_ms: if silent {
                self.previous.silence_duration_ms + self.tick_ms
            } else {
                0
            },
            is_currently_silent: silent,
            hesitation_count: rng.random_range(0..3),
            filler_word_count: rng.random_range(0..2),
            energy_level: level,
            previous_energy_level: self.previous.energy_level,
            melodic_variation: 0.2 + rng.random_range(0.0f32..0.4),
        };

        self.previous = sample;
        sample
    }
}
