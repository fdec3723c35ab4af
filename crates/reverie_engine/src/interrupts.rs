//! External stimuli: the seam between the run loop and environmental noise.
//!
//! The orchestrator only sees the [`InterruptSource`] trait, so tests can
//! swap the ambient source for a scripted or silent one and keep runs fully
//! deterministic.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Default catalog of ambient events.
pub const DEFAULT_EVENTS: &[&str] = &[
    "Background notification: rain taps against the window.",
    "News flash: a distant satellite sends garbled telemetry.",
    "Ambient memory: a lullaby hum lingers with no clear origin.",
    "External ping: roommate asks if you're still awake.",
    "Sensor blip: heart rate spikes without explanation.",
    "Static: a half-heard podcast quote loops unexpectedly.",
];

const DEFAULT_PROBABILITY: f32 = 0.25;
const DEFAULT_COOLDOWN: u32 = 2;

/// Supplies an optional external stimulus per iteration. Must return
/// immediately; the run loop calls it synchronously.
pub trait InterruptSource {
    fn maybe_interrupt(&mut self, iteration: u32, rng: &mut dyn RngCore) -> Option<String>;
}

/// Probability-gated interrupts with a cooldown: after an event fires, the
/// next `cooldown` queries return nothing regardless of the dice.
#[derive(Debug, Clone)]
pub struct AmbientInterrupts {
    events: Vec<String>,
    probability: f32,
    cooldown: u32,
    cooldown_counter: u32,
}

impl Default for AmbientInterrupts {
    fn default() -> Self {
        Self::new(DEFAULT_PROBABILITY, DEFAULT_COOLDOWN)
    }
}

impl AmbientInterrupts {
    pub fn new(probability: f32, cooldown: u32) -> Self {
        Self::with_events(
            DEFAULT_EVENTS.iter().map(|event| event.to_string()).collect(),
            probability,
            cooldown,
        )
    }

    pub fn with_events(events: Vec<String>, probability: f32, cooldown: u32) -> Self {
        Self {
            events,
            probability,
            cooldown,
            cooldown_counter: 0,
        }
    }
}

impl InterruptSource for AmbientInterrupts {
    fn maybe_interrupt(&mut self, iteration: u32, rng: &mut dyn RngCore) -> Option<String> {
        if self.cooldown_counter > 0 {
            self.cooldown_counter -= 1;
            return None;
        }
        if rng.gen::<f32>() < self.probability {
            self.cooldown_counter = self.cooldown;
            let event = self.events.choose(rng)?.clone();
            tracing::debug!(iteration, event = %event, "ambient interrupt fired");
            return Some(event);
        }
        None
    }
}

/// Never interrupts. Useful for fully quiet deterministic runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterrupts;

impl InterruptSource for NoInterrupts {
    fn maybe_interrupt(&mut self, _iteration: u32, _rng: &mut dyn RngCore) -> Option<String> {
        None
    }
}

/// Fires fixed stimuli on fixed iterations, absent everywhere else.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInterrupts {
    script: Vec<(u32, String)>,
}

impl ScriptedInterrupts {
    pub fn new(script: Vec<(u32, String)>) -> Self {
        Self { script }
    }
}

impl InterruptSource for ScriptedInterrupts {
    fn maybe_interrupt(&mut self, iteration: u32, _rng: &mut dyn RngCore) -> Option<String> {
        self.script
            .iter()
            .find(|(at, _)| *at == iteration)
            .map(|(_, stimulus)| stimulus.clone())
    }
}
