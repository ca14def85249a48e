use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoachError, Result};

/// The five axes a speaker progresses along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressAxis {
    Presence,
    Clarity,
    Stability,
    Impact,
    Leadership,
}

impl ProgressAxis {
    /// Enumeration order. Ties in weakest-axis detection resolve to the
    /// earliest entry.
    pub const ALL: [ProgressAxis; 5] = [
        ProgressAxis::Presence,
        ProgressAxis::Clarity,
        ProgressAxis::Stability,
        ProgressAxis::Impact,
        ProgressAxis::Leadership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressAxis::Presence => "presence",
            ProgressAxis::Clarity => "clarity",
            ProgressAxis::Stability => "stability",
            ProgressAxis::Impact => "impact",
            ProgressAxis::Leadership => "leadership",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgressAxis::Presence => "Presence",
            ProgressAxis::Clarity => "Clarity",
            ProgressAxis::Stability => "Stability",
            ProgressAxis::Impact => "Impact",
            ProgressAxis::Leadership => "Leadership",
        }
    }
}

impl fmt::Display for ProgressAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProgressAxis {
    type Err = CoachError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ProgressAxis::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| CoachError::UnknownAxis(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceCard {
    pub id: String,
    pub title: String,
    pub principle: String,
    pub application: String,
    pub anchor_phrase: String,
    pub category: ProgressAxis,
}

/// Read-only advice card collection. Never empty, ids unique.
#[derive(Debug, Clone)]
pub struct AdviceCatalog {
    cards: Vec<AdviceCard>,
}

impl AdviceCatalog {
    pub fn new(cards: Vec<AdviceCard>) -> Result<Self> {
        if cards.is_empty() {
            return Err(CoachError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(CoachError::DuplicateCard(card.id.clone()));
            }
        }
        Ok(Self { cards })
    }

    /// The fourteen cards of the standard course.
    pub fn builtin() -> Self {
        Self {
            cards: BUILTIN_CARDS.iter().map(|raw| raw.to_card()).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&AdviceCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn by_category(&self, axis: ProgressAxis) -> Vec<&AdviceCard> {
        self.cards.iter().filter(|c| c.category == axis).collect()
    }

    pub fn cards(&self) -> &[AdviceCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for AdviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

struct RawCard {
    id: &'static str,
    title: &'static str,
    principle: &'static str,
    application: &'static str,
    anchor_phrase: &'static str,
    category: ProgressAxis,
}

impl RawCard {
    fn to_card(&self) -> AdviceCard {
        AdviceCard {
            id: self.id.to_string(),
            title: self.title.to_string(),
            principle: self.principle.to_string(),
            application: self.application.to_string(),
            anchor_phrase: self.anchor_phrase.to_string(),
            category: self.category,
        }
    }
}

const BUILTIN_CARDS: [RawCard; 14] = [
    RawCard {
        id: "card-1",
        title: "Slowing down increases impact",
        principle: "Speed is not a sign of mastery. When you slow down, you take your place. You give every word the time to exist.",
        application: "Before you speak, take a breath. Between each important sentence, mark a beat. It is not a pause, it is a frame.",
        anchor_phrase: "Slowing down is taking your place.",
        category: ProgressAxis::Presence,
    },
    RawCard {
        id: "card-2",
        title: "Clarity reassures more than perfection",
        principle: "One clear idea beats ten confused ones. Your audience keeps only one thing. Help them by knowing what you want to say.",
        application: "Before each talk, name YOUR central idea. Just one. If you cannot put it in a single sentence, it is not clear yet.",
        anchor_phrase: "One idea. One direction.",
        category: ProgressAxis::Clarity,
    },
    RawCard {
        id: "card-3",
        title: "Silence gives words their weight",
        principle: "Silence is not a gap to fill. It is a space that amplifies what comes before and what comes after.",
        application: "After an important sentence, count to three in your head before you go on. Silence creates anticipation. Anticipation creates attention.",
        anchor_phrase: "Silence is not a void. It is a frame.",
        category: ProgressAxis::Presence,
    },
    RawCard {
        id: "card-4",
        title: "Your posture speaks before you do",
        principle: "Authority does not come from words. It comes from grounding. A stable body conveys a stable presence.",
        application: "Before speaking, plant your feet. Feel the floor. Stand tall without stiffening. Your body should say: \"I am here.\"",
        anchor_phrase: "Stability creates authority.",
        category: ProgressAxis::Presence,
    },
    RawCard {
        id: "card-5",
        title: "The audience follows your rhythm",
        principle: "You set the tempo. If you rush, they get lost. If you settle, they follow. The room aligns with your state.",
        application: "Start slowly. Set your rhythm in the first seconds. If you feel the audience drifting, slow down rather than speed up.",
        anchor_phrase: "You are the one setting the tempo.",
        category: ProgressAxis::Impact,
    },
    RawCard {
        id: "card-6",
        title: "Fewer words, more presence",
        principle: "Charisma is not abundance. It is precision. Every extra word dilutes your impact.",
        application: "Once you have prepared what you want to say, cut 20%. What remains will be denser, stronger, more memorable.",
        anchor_phrase: "Density creates impact.",
        category: ProgressAxis::Presence,
    },
    RawCard {
        id: "card-7",
        title: "A leader speaks to align",
        principle: "You are not speaking to impress or to convince. You are speaking to give a clear direction others can follow.",
        application: "Open with a sentence that sets the frame. \"Here is what we are going to do.\" \"Here is where we are going.\" The rest follows from there.",
        anchor_phrase: "Speak to align, not to impress.",
        category: ProgressAxis::Leadership,
    },
    RawCard {
        id: "card-8",
        title: "Credibility comes from alignment",
        principle: "People do not believe you because you speak well. They believe you because you own what you say. Alignment between words and intent can be felt.",
        application: "Before saying something important, ask yourself: \"Can I stand behind this sentence?\" If not, rephrase until you can.",
        anchor_phrase: "What you own can be heard.",
        category: ProgressAxis::Leadership,
    },
    RawCard {
        id: "card-9",
        title: "The last minute counts",
        principle: "People remember the ending. If you fade in the final seconds, everything before it collapses. The ending seals the message.",
        application: "Prepare your last sentence. Know exactly how you will finish. And when you get there, add nothing. End cleanly.",
        anchor_phrase: "The ending seals the message.",
        category: ProgressAxis::Impact,
    },
    RawCard {
        id: "card-10",
        title: "Conclude by revealing, not by adding",
        principle: "A good conclusion does not summarize, it reveals. It opens a door rather than closing one.",
        application: "Your final sentence should leave something behind. An image. A question. A direction. Not a recap.",
        anchor_phrase: "Reveal, don't summarize.",
        category: ProgressAxis::Impact,
    },
    RawCard {
        id: "card-11",
        title: "You don't defend, you hold",
        principle: "Under pushback, justifying yourself weakens you. Holding your position without stiffening strengthens it.",
        application: "When challenged, do not justify. Restate your position calmly. \"I understand. And here is what I stand by.\"",
        anchor_phrase: "Hold without stiffening.",
        category: ProgressAxis::Stability,
    },
    RawCard {
        id: "card-12",
        title: "Calm firmness reassures",
        principle: "In hard moments, harshness worries people. Calm firmness reassures them. The difference is in the tone, not the substance.",
        application: "Announce difficult decisions without apologizing, but without hardening either. State the facts. Give the meaning. Stay open to questions.",
        anchor_phrase: "Firm without being hard.",
        category: ProgressAxis::Leadership,
    },
    RawCard {
        id: "card-13",
        title: "Reframe rather than react",
        principle: "An interruption tries to throw you off balance. Reacting means losing control. Reframing means taking it back.",
        application: "Facing an interruption: pause. Breathe. Then one sentence that refocuses. \"Let me finish, and I'll answer you.\" You take the tempo back.",
        anchor_phrase: "Reframe, don't react.",
        category: ProgressAxis::Impact,
    },
    RawCard {
        id: "card-14",
        title: "Calm strengthens your position",
        principle: "In disagreement, whoever stays calm has the upper hand. Agitation weakens, stability strengthens.",
        application: "When disagreement rises, lower your voice slightly. Slow down. Your calm will say: \"I don't need to shout to be right.\"",
        anchor_phrase: "Calm is a strength.",
        category: ProgressAxis::Leadership,
    },
];
