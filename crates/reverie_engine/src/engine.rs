//! The orchestrator: drives N iterations of drift, distortion, synthesis,
//! and registration over a single owned state and random stream.

use crate::distortion::DistortionEngine;
use crate::interrupts::{AmbientInterrupts, InterruptSource};
use crate::synthesis::Synthesizer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reverie_core::{BiasKind, Mood, ThoughtState};
use serde::Serialize;

/// Value-semantics snapshot of one completed iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// 1-based step number.
    pub iteration: u32,
    /// Mood active while this step's thought was synthesized.
    pub mood: Mood,
    /// The full distorted prompt fed into synthesis.
    pub prompt: String,
    /// The synthesized response.
    pub thought: String,
    /// External stimulus, if one fired this iteration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<String>,
}

/// Caller-facing run parameters.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub steps: u32,
    pub allow_interrupts: bool,
    /// Force the starting mood instead of beginning calm.
    pub starting_mood: Option<Mood>,
    /// Additive deltas applied to the default bias profile before the first
    /// thought is registered.
    pub bias_overrides: Vec<(BiasKind, f32)>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 8,
            allow_interrupts: true,
            starting_mood: None,
            bias_overrides: Vec::new(),
        }
    }
}

/// Coordinates state, distortions, and synthesis to simulate recursive
/// thinking. Owns the random stream: one engine seeded once is fully
/// reproducible, and concurrent runs need independent engines.
pub struct MindEngine {
    state: ThoughtState,
    distortions: DistortionEngine,
    synthesizer: Synthesizer,
    interrupts: Box<dyn InterruptSource>,
    rng: StdRng,
}

impl MindEngine {
    /// Engine with the default ambient interrupt source. `None` seeds from
    /// entropy; pass `Some(seed)` for repeatable runs.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_interrupts(seed, Box::new(AmbientInterrupts::default()))
    }

    pub fn with_interrupts(seed: Option<u64>, interrupts: Box<dyn InterruptSource>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: ThoughtState::new(),
            distortions: DistortionEngine::new(),
            synthesizer: Synthesizer::new(),
            interrupts,
            rng,
        }
    }

    /// The state as of the last completed step. Snapshot access only; the
    /// engine keeps exclusive ownership.
    pub fn state(&self) -> &ThoughtState {
        &self.state
    }

    /// Execute the loop for a fixed number of iterations, starting from a
    /// fresh state each call.
    pub fn run(&mut self, initial_thought: &str, config: &RunConfig) -> Vec<StepResult> {
        self.begin(initial_thought, config);
        let mut current = initial_thought.to_string();
        let mut results = Vec::with_capacity(config.steps as usize);
        for step_index in 1..=config.steps {
            let result = self.step(step_index, &current, config.allow_interrupts);
            current = result.thought.clone();
            results.push(result);
        }
        results
    }

    /// Run until `predicate(state)` holds after a step, or `max_steps` is
    /// reached. Uses the default config apart from the step bound.
    pub fn run_until<F>(
        &mut self,
        initial_thought: &str,
        predicate: F,
        max_steps: u32,
    ) -> Vec<StepResult>
    where
        F: Fn(&ThoughtState) -> bool,
    {
        let config = RunConfig {
            steps: max_steps,
            ..RunConfig::default()
        };
        self.begin(initial_thought, &config);
        let mut current = initial_thought.to_string();
        let mut results = Vec::new();
        for step_index in 1..=max_steps {
            let result = self.step(step_index, &current, config.allow_interrupts);
            current = result.thought.clone();
            results.push(result);
            if predicate(&self.state) {
                break;
            }
        }
        results
    }

    /// Reset to a fresh state and apply the caller's starting conditions.
    fn begin(&mut self, initial_thought: &str, config: &RunConfig) {
        self.state = ThoughtState::new();
        if let Some(mood) = config.starting_mood {
            self.state.mood_state.mood = mood;
        }
        self.state.biases.adjust_all(&config.bias_overrides);
        self.state.register(initial_thought);
    }

    fn step(&mut self, step_index: u32, current: &str, allow_interrupts: bool) -> StepResult {
        self.state.drift_mood(Some(current), &mut self.rng);
        let external = if allow_interrupts {
            self.interrupts
                .maybe_interrupt(self.state.iteration, &mut self.rng)
        } else {
            None
        };
        let prompt = self
            .distortions
            .distort(current, &mut self.state, external.as_deref(), &mut self.rng);
        let mood = self.state.mood_state.mood;
        let thought = self.synthesizer.respond(&prompt, mood, &mut self.rng);
        self.state.register(&thought);
        tracing::debug!(iteration = step_index, mood = %mood, "step complete");
        StepResult {
            iteration: step_index,
            mood,
            prompt,
            thought,
            external,
        }
    }
}
