//! Mood model: a closed set of affective states with weighted-random drift.
//!
//! Transitions form a small Markov process. Each mood carries a fixed table
//! of four candidate successors with relative weights; stimulus text can
//! boost exactly one candidate via keyword families before the draw.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Additive weight bonus applied to the candidate matched by a stimulus
/// keyword family.
const STIMULUS_BONUS: f32 = 0.25;

/// Keyword families, scanned in priority order. The first family with a hit
/// wins; later families are not consulted.
const ANXIOUS_CUES: &[&str] = &["deadline", "danger", "risk", "threat"];
const INSPIRED_CUES: &[&str] = &["sunrise", "hope", "success", "dream"];
const IRRITATED_CUES: &[&str] = &["bored", "stuck", "loop", "repeat"];
const MELANCHOLIC_CUES: &[&str] = &["loss", "regret", "alone", "memory"];

/// The six discrete affective states the simulation can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Calm,
    Curious,
    Anxious,
    Melancholic,
    Irritated,
    Inspired,
}

/// Error returned when a mood label fails to parse at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood '{0}', expected one of: calm, curious, anxious, melancholic, irritated, inspired")]
pub struct MoodParseError(pub String);

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Calm,
        Mood::Curious,
        Mood::Anxious,
        Mood::Melancholic,
        Mood::Irritated,
        Mood::Inspired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Calm => "calm",
            Mood::Curious => "curious",
            Mood::Anxious => "anxious",
            Mood::Melancholic => "melancholic",
            Mood::Irritated => "irritated",
            Mood::Inspired => "inspired",
        }
    }

    /// Descriptive tone label for rendering. Pure lookup, no state.
    pub fn tone_hint(self) -> &'static str {
        match self {
            Mood::Calm => "softly contemplative",
            Mood::Curious => "questioning",
            Mood::Anxious => "uneasy",
            Mood::Melancholic => "wistful",
            Mood::Irritated => "impatient",
            Mood::Inspired => "buoyant",
        }
    }

    /// Candidate successors with relative weights. Weights need not sum to
    /// 1.0; the draw treats them as relative.
    fn drift_table(self) -> [(Mood, f32); 4] {
        match self {
            Mood::Calm => [
                (Mood::Calm, 0.4),
                (Mood::Curious, 0.2),
                (Mood::Melancholic, 0.15),
                (Mood::Inspired, 0.25),
            ],
            Mood::Curious => [
                (Mood::Curious, 0.35),
                (Mood::Inspired, 0.25),
                (Mood::Calm, 0.2),
                (Mood::Anxious, 0.2),
            ],
            Mood::Anxious => [
                (Mood::Anxious, 0.45),
                (Mood::Irritated, 0.2),
                (Mood::Melancholic, 0.2),
                (Mood::Calm, 0.15),
            ],
            Mood::Melancholic => [
                (Mood::Melancholic, 0.4),
                (Mood::Calm, 0.25),
                (Mood::Anxious, 0.2),
                (Mood::Curious, 0.15),
            ],
            Mood::Irritated => [
                (Mood::Irritated, 0.4),
                (Mood::Anxious, 0.2),
                (Mood::Melancholic, 0.2),
                (Mood::Calm, 0.2),
            ],
            Mood::Inspired => [
                (Mood::Inspired, 0.45),
                (Mood::Curious, 0.2),
                (Mood::Calm, 0.2),
                (Mood::Irritated, 0.15),
            ],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = MoodParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.label() == lowered)
            .ok_or_else(|| MoodParseError(raw.to_string()))
    }
}

/// Which mood a stimulus nudges toward, if any. At most one family applies.
fn stimulus_bias(stimulus: &str) -> Option<Mood> {
    let lowered = stimulus.to_lowercase();
    let families = [
        (ANXIOUS_CUES, Mood::Anxious),
        (INSPIRED_CUES, Mood::Inspired),
        (IRRITATED_CUES, Mood::Irritated),
        (MELANCHOLIC_CUES, Mood::Melancholic),
    ];
    families
        .iter()
        .find(|(cues, _)| cues.iter().any(|cue| lowered.contains(cue)))
        .map(|(_, mood)| *mood)
}

/// Walk the cumulative weights in table order; the first candidate whose
/// cumulative sum reaches the draw is selected. Rounding can leave the draw
/// above every cumulative sum, in which case the last candidate wins.
fn weighted_choice<R: Rng>(entries: &[(Mood, f32)], rng: &mut R) -> Mood {
    let total: f32 = entries.iter().map(|(_, weight)| weight).sum();
    let draw = rng.gen_range(0.0..total);
    let mut upto = 0.0;
    for &(mood, weight) in entries {
        upto += weight;
        if draw <= upto {
            return mood;
        }
    }
    entries[entries.len() - 1].0
}

/// Tracks the current mood and drifts it in response to stimulus text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodState {
    pub mood: Mood,
}

impl Default for MoodState {
    fn default() -> Self {
        Self { mood: Mood::Calm }
    }
}

impl MoodState {
    pub fn new(mood: Mood) -> Self {
        Self { mood }
    }

    /// Drift to a new mood. Deterministic given the RNG state: the same
    /// (mood, stimulus, seed) triple always produces the same successor.
    pub fn mutate<R: Rng>(&mut self, stimulus: Option<&str>, rng: &mut R) -> Mood {
        let mut table = self.mood.drift_table();
        if let Some(text) = stimulus.filter(|text| !text.is_empty()) {
            if let Some(target) = stimulus_bias(text) {
                for entry in table.iter_mut() {
                    if entry.0 == target {
                        entry.1 += STIMULUS_BONUS;
                    }
                }
            }
        }
        let next = weighted_choice(&table, rng);
        if next != self.mood {
            tracing::debug!(prev = %self.mood, next = %next, "mood drift");
        }
        self.mood = next;
        next
    }
}
