//! # Reverie Core
//!
//! The state model for the reverie mind simulation:
//!
//! - [`Mood`] / [`MoodState`]: a closed set of affective states with a
//!   weighted-random drift table, nudged by stimulus keywords.
//! - [`Thought`] / [`ThoughtMemory`]: weighted text records in a bounded
//!   buffer with geometric decay on every insertion.
//! - [`BiasKind`] / [`BiasProfile`]: persistent interpretive leanings as
//!   bounded scalars.
//! - [`ThoughtState`]: the per-run aggregate that owns all of the above.
//!
//! All randomness is taken from an explicit [`rand::Rng`] parameter so a run
//! seeded once is fully reproducible. Nothing here performs I/O; every
//! operation is total over well-formed inputs.

mod bias;
mod memory;
mod mood;
mod state;
mod thought;

pub use bias::{BiasKind, BiasParseError, BiasProfile};
pub use memory::{ThoughtMemory, DEFAULT_CAPACITY, DEFAULT_DECAY};
pub use mood::{Mood, MoodParseError, MoodState};
pub use state::ThoughtState;
pub use thought::{Thought, WEIGHT_FLOOR};
