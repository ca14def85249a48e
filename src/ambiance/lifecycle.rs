use serde::{Deserialize, Serialize};

/// Lifecycle of one reaction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EngineState {
    /// No decay, no reactions. Metrics are ignored.
    #[default]
    Stopped,
    /// Decaying, reacting to metrics.
    Running,
    /// Stop requested: the closing reaction is playing out. Still active
    /// until the grace delay ends.
    Draining,
}

impl EngineState {
    pub fn is_active(&self) -> bool {
        matches!(self, EngineState::Running | EngineState::Draining)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleRequest {
    Start,
    Stop,
    /// Grace delay elapsed.
    Halt,
}

pub struct LifecycleGraph;

impl LifecycleGraph {
    /// Pure function: (Current State, Request) -> New State.
    /// `None` means the request is ignored in this state.
    pub fn transition(current: EngineState, request: LifecycleRequest) -> Option<EngineState> {
        use EngineState::*;
        use LifecycleRequest::*;

        match (current, request) {
            // A restart is a fresh audience: always allowed.
            (Stopped, Start) | (Running, Start) | (Draining, Start) => Some(Running),

            (Running, Stop) => Some(Draining),

            (Draining, Halt) => Some(Stopped),

            // Second stop, halt without a stop, stop while stopped.
            _ => None,
        }
    }
}
