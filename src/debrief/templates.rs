//! Coach voice: narrative openers, secondary details, strengths and
//! anchor phrases.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cards::ProgressAxis;
use super::score::FeedbackTier;

pub fn openers(tier: FeedbackTier) -> &'static [&'static str; 4] {
    match tier {
        FeedbackTier::Excellent => &EXCELLENT_OPENERS,
        FeedbackTier::Good => &GOOD_OPENERS,
        FeedbackTier::Progress => &PROGRESS_OPENERS,
    }
}

const EXCELLENT_OPENERS: [&str; 4] = [
    "There was something different in your voice today. A presence. That's what we're after.",
    "That moment when you slowed down... and the silence that followed... That was powerful. Did you feel it?",
    "I have nothing to add. That was right. Keep going like this.",
    "You just touched something there. That clarity, that assurance... hold on to it.",
];

const GOOD_OPENERS: [&str; 4] = [
    "Better. Really. Your breathing was steadier, and it shows.",
    "I noticed moments where you dared to take your time. That's where you're at your best.",
    "Your voice carries more than before. The energy is there. Now it needs channelling.",
    "There's material here. We keep sculpting.",
];

const PROGRESS_OPENERS: [&str; 4] = [
    "This is training, not an exam. What matters is that you put yourself out there.",
    "I heard some hesitation. That's normal. What matters is what you do with it next.",
    "Next time, focus on one thing only: the silences. Just that.",
    "Rome wasn't built in a day. Every time you step up to the mic counts.",
];

/// Secondary observations appended under the opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailNote {
    RhythmTooFast,
    RhythmVaried,
    SilencesWellUsed,
    SilencesLacking,
}

impl DetailNote {
    pub fn text(&self) -> &'static str {
        match self {
            DetailNote::RhythmTooFast => "You tend to speed up when you feel watched. That's natural. But your message gets lost in the speed.",
            DetailNote::RhythmVaried => "I liked how your pace varied. It creates relief, it keeps things interesting.",
            DetailNote::SilencesWellUsed => "Your silences were inhabited. That's rare. It's where you are most convincing.",
            DetailNote::SilencesLacking => "You fill every second with words. Let it breathe. Silence is your ally.",
        }
    }
}

/// What went well, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    ConsistentEnergy,
    WellPlacedSilences,
    ClearArticulation,
    LivelyVoice,
    TexturedRhythm,
    CapturingPresence,
    /// Only used when no analysis is available.
    HeldAttention,
}

impl Strength {
    pub fn text(&self) -> &'static str {
        match self {
            Strength::ConsistentEnergy => "Consistent, engaging energy",
            Strength::WellPlacedSilences => "Well-placed silences that give weight",
            Strength::ClearArticulation => "Clear, precise articulation",
            Strength::LivelyVoice => "A lively, varied voice",
            Strength::TexturedRhythm => "Controlled rhythm with texture",
            Strength::CapturingPresence => "A presence that captures attention",
            Strength::HeldAttention => "You held the audience's attention",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

pub fn anchor_phrases(axis: ProgressAxis) -> &'static [&'static str; 4] {
    match axis {
        ProgressAxis::Presence => &[
            "I am here. Fully.",
            "Every word counts.",
            "My presence is enough.",
            "Here and now.",
        ],
        ProgressAxis::Clarity => &[
            "One idea. One sentence. One impact.",
            "I say what I think. Simply.",
            "Clarity first, details later.",
            "My message is clear.",
        ],
        ProgressAxis::Stability => &[
            "I stay grounded, whatever happens.",
            "Stress does not define me.",
            "I breathe. I continue.",
            "Steady as a rock.",
        ],
        ProgressAxis::Impact => &[
            "My voice carries. My voice matters.",
            "Every silence is a tool.",
            "Impact comes from intention.",
            "When I speak, people listen.",
        ],
        ProgressAxis::Leadership => &[
            "I guide. I lead. I inspire.",
            "My voice opens paths.",
            "Leadership is lived, not claimed.",
            "I take my place. All of it.",
        ],
    }
}
