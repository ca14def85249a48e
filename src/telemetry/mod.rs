//! Exercise telemetry.
//!
//! Telemetry is a read-only side layer: the engines never read it. The
//! host records what the reaction engine emitted and derives the audience
//! attention average the debrief needs.

pub mod event;
pub mod metrics;
pub mod recorder;
