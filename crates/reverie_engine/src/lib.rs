//! # Reverie Engine
//!
//! The simulation layer over [`reverie_core`]:
//!
//! - [`DistortionEngine`]: composes mood filter, memory recall, bias overlay,
//!   intrusive injection, associative drift, overload, and self-doubt into
//!   one derived prompt.
//! - [`Synthesizer`]: rewrites a distorted prompt into a new thought using
//!   mood-specific templates.
//! - [`InterruptSource`]: the seam for external stimuli, with an ambient
//!   probability-and-cooldown implementation plus scripted and silent
//!   variants for deterministic tests.
//! - [`MindEngine`]: the orchestrator driving N iterations of
//!   drift -> interrupt -> distort -> synthesize -> register.
//!
//! The engine owns a single seeded random stream; two engines constructed
//! with the same seed and inputs produce byte-identical transcripts.

mod distortion;
mod engine;
mod interrupts;
mod synthesis;

pub use distortion::DistortionEngine;
pub use engine::{MindEngine, RunConfig, StepResult};
pub use interrupts::{AmbientInterrupts, InterruptSource, NoInterrupts, ScriptedInterrupts};
pub use synthesis::Synthesizer;
