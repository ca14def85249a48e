//! Virtual audience: per-profile attention dynamics and reactions to live
//! speech metrics.

pub mod clock;
pub mod engine;
pub mod event;
pub mod lifecycle;
pub mod profile;
pub mod runtime;
pub mod sampler;
pub mod trigger;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use engine::AmbianceEngine;
pub use event::{AmbianceEvent, EmittedReaction};
pub use lifecycle::EngineState;
pub use profile::{AmbianceSound, AudienceProfile, AudienceProfileConfig, ReactionTemplate};
pub use runtime::{AmbianceCommand, AmbianceHandle, AmbianceRuntime};
pub use sampler::MetricsSampler;
pub use trigger::{detect_triggers, SpeechMetricsSample, TriggerKind};
