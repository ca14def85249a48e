use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use stagecraft::ambiance::{
    AmbianceEngine, AmbianceEvent, AmbianceRuntime, AudienceProfile, MetricsSampler, MonotonicClock,
    SpeechMetricsSample, TriggerKind,
};
use stagecraft::config::AmbianceConfig;
use stagecraft::debrief::{
    AdviceCatalog, AudioAnalysis, ClarityStats, DebriefEngine, DebriefResult, EnergyStats, ProgressAxes,
    ProsodyStats, RhythmStats, SessionMetrics, SilenceStats,
};
use stagecraft::telemetry::recorder::TelemetryRecorder;

/// Runs one simulated speaking exercise in front of a virtual audience and
/// prints the debrief.
#[derive(Parser, Debug)]
#[command(name = "stagecraft", version, about)]
struct Args {
    /// Audience archetype (neutral, cold_jury, enthusiastic, hostile, distracted, friendly)
    #[arg(short, long, default_value = "neutral")]
    profile: AudienceProfile,

    /// Exercise length in seconds
    #[arg(short, long, default_value_t = 12)]
    duration: u64,

    /// Metrics sampling period in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Seed for the simulated speaker and the debrief wording
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the engine tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Advice card attached to the exercise
    #[arg(long)]
    card: Option<String>,

    /// JSON file holding progression levels, updated after the debrief
    #[arg(long)]
    progress: Option<PathBuf>,

    /// Print the debrief as JSON
    #[arg(long)]
    json: bool,
}

/// One metrics sample and when it was taken, in seconds.
type Timeline = Vec<(f32, SpeechMetricsSample)>;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AmbianceConfig::from_json_file(path)?,
        None => AmbianceConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(profile = %args.profile, duration = args.duration, seed, "Stagecraft exercise starting");

    let (timeline, recorder) = run_exercise(&args, config, seed).await?;

    let duration_secs = args.duration as f32;
    let analysis = summarize(&timeline, duration_secs);
    let mut debrief = DebriefEngine::with_seed(AdviceCatalog::builtin(), seed);
    let peak_moments = debrief.detect_peak_moments(Some(&analysis), duration_secs);

    let snapshot = recorder.snapshot();
    let metrics = SessionMetrics {
        duration_secs,
        analysis: Some(analysis),
        transcription: String::new(),
        audience_attention_avg: recorder.audience_attention_avg(),
        peak_moments,
    };
    let result = debrief.generate(&metrics, args.card.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_debrief(&result);
        println!(
            "Audience: {} reactions, attention avg {:.2} (min {:.2}, max {:.2})",
            snapshot.reaction_stats.total,
            metrics.audience_attention_avg,
            snapshot.attention_stats.min,
            snapshot.attention_stats.max,
        );
    }

    if let Some(path) = &args.progress {
        update_progress(path, &result)?;
    }

    Ok(())
}

async fn run_exercise(args: &Args, config: AmbianceConfig, seed: u64) -> Result<(Timeline, TelemetryRecorder)> {
    let grace = Duration::from_millis(config.stop_grace_ms);
    let engine = AmbianceEngine::with_clock(args.profile, config, MonotonicClock::new());
    let (handle, mut events) = AmbianceRuntime::spawn(engine);

    let collector = tokio::spawn(async move {
        let mut recorder = TelemetryRecorder::new();
        while let Some(event) = events.recv().await {
            if let AmbianceEvent::Reaction { reaction, trigger } = &event {
                println!(
                    "[AUDIENCE] {:<14} {:?} (intensity {:.2})",
                    trigger.as_str(),
                    reaction.sound,
                    reaction.intensity
                );
            }
            recorder.observe(&event);
        }
        recorder
    });

    handle.start(args.profile).await?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut sampler = MetricsSampler::new(args.tick_ms);
    let mut cadence = interval(Duration::from_millis(args.tick_ms.max(1)));
    cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ticks = args.duration * 1000 / args.tick_ms.max(1);
    let mut timeline = Vec::with_capacity(ticks as usize);
    let mut was_emphatic = false;

    for tick in 0..ticks {
        cadence.tick().await;
        let t = (tick * args.tick_ms) as f32 / 1000.0;
        let level = speaker_level(t, &mut rng);
        let sample = sampler.next(level, &mut rng);
        debug!(t, level, wpm = sample.words_per_minute, "Sample");

        handle.process_metrics(sample).await?;
        let emphatic = level > 0.85;
        if emphatic && !was_emphatic {
            handle.fire(TriggerKind::StrongPhrase).await?;
        }
        was_emphatic = emphatic;
        timeline.push((t, sample));
    }

    handle.stop().await?;
    sleep(grace + Duration::from_millis(50)).await;
    handle.shutdown().await;

    let recorder = collector.await.context("telemetry collector failed")?;
    info!(events = recorder.len(), "Exercise finished");
    Ok((timeline, recorder))
}

/// Phrases of about four seconds separated by short pauses.
fn speaker_level<R: Rng>(t: f32, rng: &mut R) -> f32 {
    if t % 5.2 > 4.0 {
        return 0.02;
    }
    (0.45 + 0.35 * (t * 1.7).sin() + rng.random_range(0.0f32..0.15)).clamp(0.0, 1.0)
}

/// Rough whole-exercise analysis built from the live samples.
fn summarize(timeline: &Timeline, duration_secs: f32) -> AudioAnalysis {
    if timeline.is_empty() {
        return AudioAnalysis::default();
    }
    let n = timeline.len() as f32;

    let voiced: Vec<f32> = timeline
        .iter()
        .filter(|(_, s)| !s.is_currently_silent)
        .map(|(_, s)| s.words_per_minute)
        .collect();
    let (wpm, wpm_dev) = mean_and_deviation(&voiced);
    let variation = if wpm > 0.0 { (wpm_dev / wpm * 4.0).clamp(0.0, 1.0) } else { 0.0 };

    let mut runs = Vec::new();
    let mut drops = 0;
    for window in timeline.windows(2) {
        let (prev, cur) = (&window[0].1, &window[1].1);
        if prev.is_currently_silent && !cur.is_currently_silent {
            runs.push(prev.silence_duration_ms);
        }
        if !prev.is_currently_silent && cur.is_currently_silent && prev.energy_level < 0.3 {
            drops += 1;
        }
    }
    let average_silence = if runs.is_empty() {
        0.0
    } else {
        runs.iter().sum::<u64>() as f32 / runs.len() as f32
    };
    let well_placed = runs.iter().filter(|&&ms| (800..=2500).contains(&ms)).count() as u32;

    let levels: Vec<f32> = timeline.iter().map(|(_, s)| s.energy_level).collect();
    let (level, level_dev) = mean_and_deviation(&levels);
    let peak_timestamps = timeline
        .windows(2)
        .filter(|w| w[1].1.energy_level > 0.85 && w[0].1.energy_level <= 0.85)
        .map(|w| w[1].0)
        .collect();

    let hesitation_mean = timeline.iter().map(|(_, s)| s.hesitation_count as f32).sum::<f32>() / n;
    let hesitations = timeline
        .iter()
        .filter(|(_, s)| s.hesitation_count >= 2)
        .map(|(t, _)| format!("hesitation at {:.1}s", t))
        .collect();
    let filler_mean = timeline.iter().map(|(_, s)| s.filler_word_count as f32).sum::<f32>() / n;
    // Counts are estimates over a ten-second window.
    let filler_words = (filler_mean * duration_secs / 10.0).round() as u32;
    let melodic = timeline.iter().map(|(_, s)| s.melodic_variation).sum::<f32>() / n;

    AudioAnalysis {
        rhythm: RhythmStats {
            words_per_minute: wpm,
            variation,
            is_monotone: variation < 0.1,
        },
        silences: SilenceStats {
            count: runs.len() as u32,
            average_duration_ms: average_silence,
            well_placed,
        },
        energy: EnergyStats {
            level,
            consistency: (1.0 - level_dev * 2.0).clamp(0.0, 1.0),
            peak_timestamps,
        },
        clarity: ClarityStats {
            articulation: (1.0 - hesitation_mean / 5.0).clamp(0.0, 1.0),
            hesitations,
            filler_words,
        },
        prosody: ProsodyStats {
            melodic_variation: melodic,
            end_of_sentence_drops: drops,
        },
    }
}

fn mean_and_deviation(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    (mean, variance.sqrt())
}

fn print_debrief(result: &DebriefResult) {
    println!();
    println!("{}", result.main_feedback);
    println!();
    for strength in &result.strengths {
        println!("  + {}", strength);
    }
    println!("Next focus: {}", result.suggested_axis);
    println!("Card: {} ({})", result.advice_card.title, result.advice_card.id);
    println!("  {}", result.advice_card.principle);
    println!("  {}", result.advice_card.application);
    if let Some(moment) = &result.wow_moment {
        println!("Highlight at {:.1}s: {}", moment.timestamp, moment.description);
    }
    println!("\"{}\"", result.anchor_phrase);
}

fn update_progress(path: &Path, result: &DebriefResult) -> Result<()> {
    let mut axes: ProgressAxes = if path.exists() {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
    } else {
        ProgressAxes::default()
    };

    let level = axes.record_session(result.suggested_axis, result.internal_score);
    std::fs::write(path, serde_json::to_string_pretty(&axes)?)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("{} is now {}/100", result.suggested_axis, level);
    Ok(())
}
