pub mod ambiance;
pub mod config;
pub mod debrief;
pub mod error;
pub mod telemetry;

pub use ambiance::{AmbianceEngine, AmbianceRuntime, AudienceProfile};
pub use config::AmbianceConfig;
pub use debrief::{DebriefEngine, DebriefResult, SessionMetrics};
pub use error::{CoachError, Result};
