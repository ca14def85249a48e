use serde::{Deserialize, Serialize};

use super::cards::ProgressAxis;

pub const AXIS_START: u8 = 20;
pub const AXIS_MAX: u8 = 100;
/// Largest gain any axis can make in one session.
pub const MAX_SESSION_GAIN: u8 = 5;

/// Gain earned by a session from its internal score: `round(score * 5)`.
pub fn progress_increment(internal_score: f32) -> u8 {
    (internal_score.clamp(0.0, 1.0) * MAX_SESSION_GAIN as f32).round() as u8
}

/// Per-axis progression levels, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressAxes {
    pub presence: u8,
    pub clarity: u8,
    pub stability: u8,
    pub impact: u8,
    pub leadership: u8,
}

impl Default for ProgressAxes {
    fn default() -> Self {
        Self {
            presence: AXIS_START,
            clarity: AXIS_START,
            stability: AXIS_START,
            impact: AXIS_START,
            leadership: AXIS_START,
        }
    }
}

impl ProgressAxes {
    pub fn get(&self, axis: ProgressAxis) -> u8 {
        match axis {
            ProgressAxis::Presence => self.presence,
            ProgressAxis::Clarity => self.clarity,
            ProgressAxis::Stability => self.stability,
            ProgressAxis::Impact => self.impact,
            ProgressAxis::Leadership => self.leadership,
        }
    }

    fn slot(&mut self, axis: ProgressAxis) -> &mut u8 {
        match axis {
            ProgressAxis::Presence => &mut self.presence,
            ProgressAxis::Clarity => &mut self.clarity,
            ProgressAxis::Stability => &mut self.stability,
            ProgressAxis::Impact => &mut self.impact,
            ProgressAxis::Leadership => &mut self.leadership,
        }
    }

    /// Adds `gain` (capped at [`MAX_SESSION_GAIN`]) to `axis`, never past 100.
    /// Returns the new level.
    pub fn apply(&mut self, axis: ProgressAxis, gain: u8) -> u8 {
        let slot = self.slot(axis);
        *slot = slot.saturating_add(gain.min(MAX_SESSION_GAIN)).min(AXIS_MAX);
        *slot
    }

    /// Credits a finished session's score to the session's main axis.
    pub fn record_session(&mut self, axis: ProgressAxis, internal_score: f32) -> u8 {
        self.apply(axis, progress_increment(internal_score))
    }
}
