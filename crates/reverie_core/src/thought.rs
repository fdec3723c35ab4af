//! A single weighted thought record.

use crate::mood::Mood;
use serde::{Deserialize, Serialize};

/// Weights never drop below this floor, so every stored thought stays
/// recallable with nonzero probability.
pub const WEIGHT_FLOOR: f32 = 0.01;

/// An immutable text record: what was thought, when, in which mood, and how
/// strongly it still weighs on recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    pub text: String,
    pub iteration: u32,
    pub mood: Mood,
    pub weight: f32,
    pub tags: Vec<String>,
}

impl Thought {
    pub fn new(text: impl Into<String>, iteration: u32, mood: Mood, weight: f32) -> Self {
        Self {
            text: text.into(),
            iteration,
            mood,
            weight: weight.max(WEIGHT_FLOOR),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Copy with the weight multiplied by `decay` (0 < decay < 1) and floored.
    pub fn decayed_copy(&self, decay: f32) -> Self {
        Self {
            weight: (self.weight * decay).max(WEIGHT_FLOOR),
            ..self.clone()
        }
    }
}
