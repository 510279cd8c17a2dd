//! Guided exercises: 4-4-6 breathing, affirmations and sleep stories.
//!
//! The exercises are plain state machines; the CLI supplies the clock.

use crate::constants::{BREATH_EXHALE_SECS, BREATH_HOLD_SECS, BREATH_INHALE_SECS};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    /// Length of the phase in ticks (seconds).
    pub fn seconds(self) -> u32 {
        match self {
            BreathPhase::Inhale => BREATH_INHALE_SECS,
            BreathPhase::Hold => BREATH_HOLD_SECS,
            BreathPhase::Exhale => BREATH_EXHALE_SECS,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in slowly...",
            BreathPhase::Hold => "Hold your breath...",
            BreathPhase::Exhale => "Breathe out gently...",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathEvent {
    /// Start or pause.
    Toggle,
    /// One second elapsed.
    Tick,
    /// Stop and return to the start of inhale.
    Reset,
}

/// State of the 4-4-6 breathing exercise.
///
/// ```
/// use moodwell::mindfulness::{BreathEvent, BreathPhase, Breathing};
///
/// let mut breathing = Breathing::default().apply(BreathEvent::Toggle);
/// for _ in 0..4 {
///     breathing = breathing.apply(BreathEvent::Tick);
/// }
/// assert_eq!(breathing.phase, BreathPhase::Hold);
/// assert_eq!(breathing.count, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breathing {
    pub phase: BreathPhase,
    /// Zero-based second within the phase.
    pub count: u32,
    pub active: bool,
}

impl Default for Breathing {
    fn default() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            count: 0,
            active: false,
        }
    }
}

impl Breathing {
    pub fn apply(self, event: BreathEvent) -> Self {
        match event {
            BreathEvent::Toggle => Self {
                active: !self.active,
                ..self
            },
            BreathEvent::Reset => Self::default(),
            BreathEvent::Tick if !self.active => self,
            BreathEvent::Tick => {
                if self.count + 1 >= self.phase.seconds() {
                    Self {
                        phase: self.phase.next(),
                        count: 0,
                        ..self
                    }
                } else {
                    Self {
                        count: self.count + 1,
                        ..self
                    }
                }
            }
        }
    }

    pub fn instruction(&self) -> &'static str {
        self.phase.instruction()
    }

    /// Ticks in one full inhale-hold-exhale cycle.
    pub fn cycle_len() -> u32 {
        BreathPhase::Inhale.seconds() + BreathPhase::Hold.seconds() + BreathPhase::Exhale.seconds()
    }
}

pub const AFFIRMATIONS: [&str; 10] = [
    "I am worthy of love and respect",
    "My feelings are valid and important",
    "I have the strength to overcome challenges",
    "I am growing and learning every day",
    "I deserve happiness and peace",
    "I am enough exactly as I am",
    "I choose to be kind to myself",
    "My mental health matters",
    "I am resilient and capable",
    "I trust in my ability to heal",
];

/// Cycles through [`AFFIRMATIONS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affirmations {
    index: usize,
}

impl Affirmations {
    /// Starts at `index`, wrapping out-of-range values.
    pub fn starting_at(index: usize) -> Self {
        Self {
            index: index % AFFIRMATIONS.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static str {
        AFFIRMATIONS[self.index]
    }

    /// Advances to the next affirmation, wrapping after the last.
    pub fn next(&mut self) -> &'static str {
        self.index = (self.index + 1) % AFFIRMATIONS.len();
        self.current()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepStory {
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

pub const SLEEP_STORIES: [SleepStory; 3] = [
    SleepStory {
        title: "Peaceful Forest Walk",
        description: "Imagine walking through a calm, sunlit forest where every step brings deeper relaxation.",
        content: "Close your eyes and picture yourself at the edge of a beautiful forest. The sun filters through the leaves, creating dancing patterns of light and shadow on the forest floor...",
    },
    SleepStory {
        title: "Ocean Waves",
        description: "Let the gentle rhythm of ocean waves wash away your worries and guide you to sleep.",
        content: "You're lying on warm, soft sand as gentle waves lap at the shore. Each wave that rolls in carries away tension from your body...",
    },
    SleepStory {
        title: "Mountain Meadow",
        description: "Find peace in a serene mountain meadow filled with wildflowers and gentle breezes.",
        content: "You find yourself in a beautiful meadow high in the mountains. Colorful wildflowers sway gently in the warm breeze...",
    },
];
