//! Synthesis step: rewrite a distorted prompt into a new internal thought.

use rand::seq::SliceRandom;
use rand::Rng;
use reverie_core::Mood;

const FALLBACK_THOUGHT: &str = "Silence feels safer than unfinished reasoning.";
const FALLBACK_DIRECTION: &str = "the unspoken edge";

/// A small thought synthesizer: picks a primary line and a direction phrase
/// from the prompt, then formats them through a per-mood template.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn respond<R: Rng>(&self, prompt: &str, mood: Mood, rng: &mut R) -> String {
        let lines: Vec<&str> = prompt
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(&primary) = lines.first() else {
            return FALLBACK_THOUGHT.to_string();
        };
        let supporting = lines.iter().skip(1).take(2).copied().collect::<Vec<_>>().join(" ");
        let source = if supporting.is_empty() {
            primary
        } else {
            supporting.as_str()
        };
        let direction = sample_direction(source, rng);

        match mood {
            Mood::Calm => format!("{primary}. Let me quietly trace that to {direction}."),
            Mood::Curious => format!("{primary}? Maybe the path forks toward {direction}."),
            Mood::Anxious => {
                format!("{primary}. I keep scanning for what collapses next near {direction}.")
            }
            Mood::Melancholic => format!("{primary}. It tastes like memories of {direction}."),
            Mood::Irritated => format!("{primary}. Why is {direction} still unresolved?"),
            Mood::Inspired => {
                format!("{primary}! I can almost sculpt {direction} out of this momentum.")
            }
        }
    }
}

/// Tokens longer than 3 characters, trailing punctuation stripped. One token
/// is used verbatim; two or more yield a random pair joined by " / ".
fn sample_direction<R: Rng>(text: &str, rng: &mut R) -> String {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.len() > 3)
        .map(|token| token.trim_matches(|c| ",.?!".contains(c)))
        .collect();
    match tokens.len() {
        0 => FALLBACK_DIRECTION.to_string(),
        1 => tokens[0].to_string(),
        _ => {
            let picks: Vec<&&str> = tokens.choose_multiple(rng, 2).collect();
            format!("{} / {}", picks[0], picks[1])
        }
    }
}
