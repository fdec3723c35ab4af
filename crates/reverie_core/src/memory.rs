//! Bounded thought buffer with geometric decay and weighted recall.
//!
//! Every insertion decays all existing entries in place before appending the
//! new one un-decayed, so recall probability leans toward recent thoughts
//! without ever dropping older ones to zero.

use crate::thought::{Thought, WEIGHT_FLOOR};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 12;
pub const DEFAULT_DECAY: f32 = 0.82;

/// How many distinct entries an overload composite samples at most.
const OVERLOAD_SAMPLES: usize = 3;

/// Ordered, capacity-bounded store of recent thoughts. Oldest entries are
/// evicted first; insertion order is preserved and the newest is always last.
#[derive(Debug, Clone)]
pub struct ThoughtMemory {
    buffer: VecDeque<Thought>,
    capacity: usize,
    decay: f32,
}

impl Default for ThoughtMemory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_DECAY)
    }
}

impl ThoughtMemory {
    pub fn new(capacity: usize, decay: f32) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            decay,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thought> {
        self.buffer.iter()
    }

    pub fn latest(&self) -> Option<&Thought> {
        self.buffer.back()
    }

    /// Decay every stored entry, evict the oldest if full, then append the
    /// new thought with its weight untouched.
    pub fn add(&mut self, thought: Thought) {
        for stored in self.buffer.iter_mut() {
            *stored = stored.decayed_copy(self.decay);
        }
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(thought);
    }

    /// Weighted-random sample over current weights, returning a mutated
    /// token-window fragment of the chosen thought. Empty memory recalls
    /// nothing.
    pub fn recall_fragment<R: Rng>(&self, rng: &mut R) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let weights: Vec<f32> = self
            .buffer
            .iter()
            .map(|thought| thought.weight.max(WEIGHT_FLOOR))
            .collect();
        let total: f32 = weights.iter().sum();
        let pick = rng.gen_range(0.0..total);
        let mut upto = 0.0;
        for (thought, weight) in self.buffer.iter().zip(&weights) {
            upto += weight;
            if upto >= pick {
                return Some(self.mutate_fragment(thought, rng));
            }
        }
        self.buffer
            .back()
            .map(|thought| self.mutate_fragment(thought, rng))
    }

    /// Composite of up to three distinct fragments, sampled without
    /// replacement and joined by " / ".
    pub fn overload<R: Rng>(&self, rng: &mut R) -> String {
        let entries: Vec<&Thought> = self.buffer.iter().collect();
        let chosen: Vec<&Thought> = entries
            .choose_multiple(rng, entries.len().min(OVERLOAD_SAMPLES))
            .copied()
            .collect();
        let snippets: Vec<String> = chosen
            .iter()
            .map(|thought| self.mutate_fragment(thought, rng))
            .collect();
        snippets.join(" / ")
    }

    /// Slice a 3-7 token window at a randomized start, then occasionally
    /// capitalize (p=0.4) or reverse (p=0.15) the result.
    fn mutate_fragment<R: Rng>(&self, thought: &Thought, rng: &mut R) -> String {
        let tokens: Vec<&str> = thought.text.split_whitespace().collect();
        let mut fragment = if tokens.len() <= 5 {
            thought.text.clone()
        } else {
            let start = rng.gen_range(0..=tokens.len() - 5);
            let end = (start + rng.gen_range(3..=7)).min(tokens.len());
            tokens[start..end].join(" ")
        };
        if rng.gen::<f32>() < 0.4 {
            fragment = capitalize(&fragment);
        }
        if rng.gen::<f32>() < 0.15 {
            fragment = fragment.chars().rev().collect();
        }
        fragment
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
