//! The per-run aggregate owning memory, mood, and biases.

use crate::bias::BiasProfile;
use crate::memory::ThoughtMemory;
use crate::mood::{Mood, MoodState};
use crate::thought::Thought;
use rand::Rng;

/// Everything one simulation run mutates. Created fresh per run, owned by
/// exactly one orchestrator, discarded when the run ends.
#[derive(Debug, Clone, Default)]
pub struct ThoughtState {
    pub memory: ThoughtMemory,
    pub mood_state: MoodState,
    pub biases: BiasProfile,
    /// Monotonically increasing count of registered thoughts, starting at 0.
    pub iteration: u32,
    /// How many upcoming iterations should still echo an intrusive thought
    /// after a trigger fired.
    pub intrusive_budget: u32,
}

impl ThoughtState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new thought: advance the iteration counter, weight the
    /// thought by exp(-iteration / 20), tag it with the current mood, and
    /// insert it into memory. Returns a snapshot of the stored thought.
    pub fn register(&mut self, text: &str) -> Thought {
        self.iteration += 1;
        let weight = (-(self.iteration as f32) / 20.0).exp();
        let thought = Thought::new(text, self.iteration, self.mood_state.mood, weight);
        self.memory.add(thought.clone());
        thought
    }

    pub fn drift_mood<R: Rng>(&mut self, stimulus: Option<&str>, rng: &mut R) -> Mood {
        self.mood_state.mutate(stimulus, rng)
    }
}
