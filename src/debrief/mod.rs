//! End-of-exercise debrief: scoring, narrative feedback, strengths,
//! weakest-axis advice and peak moments.

pub mod analysis;
pub mod cards;
pub mod engine;
pub mod peaks;
pub mod progression;
pub mod score;
pub mod templates;

pub use analysis::{AudioAnalysis, ClarityStats, EnergyStats, ProsodyStats, RhythmStats, SilenceStats};
pub use cards::{AdviceCard, AdviceCatalog, ProgressAxis};
pub use engine::{generate_debrief, DebriefEngine, DebriefResult, SessionMetrics};
pub use peaks::{detect_peak_moments, PeakKind, PeakMoment};
pub use progression::{progress_increment, ProgressAxes};
pub use score::{internal_score, FeedbackTier};
pub use templates::{DetailNote, Strength};
