//! Distortion engine: mutates a prompt through an ordered stack of overlays.
//!
//! Each step either appends one newline-joined segment or nothing. The mood
//! filter always contributes; everything after it is conditional on state or
//! an independent probability gate.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use reverie_core::{BiasKind, BiasProfile, Mood, ThoughtState};

const RECALL_CHANCE: f32 = 0.7;
const DRIFT_CHANCE: f32 = 0.4;
const OVERLOAD_CHANCE: f32 = 0.25;
const SELF_DOUBT_CHANCE: f32 = 0.3;

/// Alphabetic words of length >= 4, the raw material for associative drift.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z']{4,}").expect("static pattern"));

/// Keyword triples and the intrusive message each one injects. Scanned in
/// order; the first hit wins and refreshes the residual budget.
const INTRUSIVE_TRIGGERS: &[(&[&str], &str)] = &[
    (
        &["safety", "danger", "risk"],
        "What if I'm missing the obvious risk?",
    ),
    (
        &["loop", "repeat", "stuck"],
        "I'm spiraling — is this a dead end?",
    ),
    (
        &["trust", "lies", "doubt"],
        "Why do I keep second-guessing everything?",
    ),
    (
        &["memory", "remember", "forget"],
        "Fragments of earlier thoughts keep resurfacing.",
    ),
];

/// Concept words mapped to evocative phrases for associative jumps.
const ASSOCIATIONS: &[(&str, &[&str])] = &[
    ("safety", &["alarm bell", "locked door", "red blinking light"]),
    (
        "creative",
        &["unfinished sketch", "midnight brainstorm", "ink-stained hands"],
    ),
    (
        "failure",
        &["cracked mirror", "late apology", "echo of a missed chance"],
    ),
    ("hope", &["fresh coffee", "morning window", "paper crane"]),
    ("control", &["tightened grip", "tidy desk", "overwritten diary"]),
    (
        "memory",
        &["dusty attic", "photograph flicker", "taped cassette"],
    ),
    (
        "future",
        &["glowing horizon", "prototype hum", "calculated risk"],
    ),
];

const SELF_DOUBT_LINES: &[&str] = &[
    "Am I circling the same conclusion again?",
    "Is this insight meaningful or just noise?",
    "Have I already solved this and forgotten?",
    "Does this contradiction matter right now?",
];

/// Composes all distortion strategies into a single prompt mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistortionEngine;

impl DistortionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the distorted prompt. Mutates `state` only through the
    /// intrusive budget; every probability gate draws from `rng`
    /// independently.
    pub fn distort<R: Rng>(
        &self,
        prompt: &str,
        state: &mut ThoughtState,
        external: Option<&str>,
        rng: &mut R,
    ) -> String {
        let prompt = if prompt.trim().is_empty() { "..." } else { prompt };
        let last_text = state.memory.latest().map(|thought| thought.text.clone());
        let mood = state.mood_state.mood;

        let mut segments: Vec<String> = Vec::new();
        segments.push(mood_filter(prompt, mood));

        if let Some(external) = external {
            segments.push(format!("Interrupt: {}", external.trim()));
        }

        if let Some(fragment) = state.memory.recall_fragment(rng) {
            if !fragment.is_empty() && rng.gen::<f32>() < RECALL_CHANCE {
                segments.push(format!("Memory echo: {fragment}"));
            }
        }

        if let Some(overlay) = bias_overlay(&state.biases) {
            segments.push(overlay);
        }

        if let Some(intrusive) = intrusive_injection(prompt, state, rng) {
            segments.push(intrusive);
        }

        if rng.gen::<f32>() < DRIFT_CHANCE {
            if let Some(source) = last_text.as_deref() {
                if let Some(jump) = associative_jump(source, rng) {
                    segments.push(format!("Tangential drift: {jump}"));
                }
            }
        }

        if rng.gen::<f32>() < OVERLOAD_CHANCE && state.memory.len() > 3 {
            segments.push(format!("Overload: {}", state.memory.overload(rng)));
        }

        if rng.gen::<f32>() < SELF_DOUBT_CHANCE {
            if let Some(line) = SELF_DOUBT_LINES.choose(rng) {
                segments.push((*line).to_string());
            }
        }

        segments.retain(|segment| !segment.is_empty());
        segments.join("\n")
    }
}

/// Per-mood transform of the trimmed prompt. Calm passes it through.
fn mood_filter(prompt: &str, mood: Mood) -> String {
    let trimmed = prompt.trim();
    match mood {
        Mood::Calm => trimmed.to_string(),
        Mood::Curious => format!("{trimmed} What if there's a hidden angle?"),
        Mood::Anxious => format!("{trimmed} I'm uneasy about where this leads."),
        Mood::Melancholic => format!("{trimmed} Everything feels slightly faded."),
        Mood::Irritated => format!("{trimmed} Why am I repeating myself?"),
        Mood::Inspired => format!("{trimmed} There's a pulse of possibility here."),
    }
}

/// Intensity qualifier derived from |strength|.
fn qualifier(strength: f32) -> &'static str {
    let magnitude = strength.abs();
    if magnitude < 0.15 {
        ""
    } else if magnitude < 0.4 {
        " (persistent)"
    } else if magnitude < 0.7 {
        " (insistent)"
    } else {
        " (overpowering)"
    }
}

/// One "Bias drift:" segment concatenating an overlay phrase per trait with
/// nonzero strength, or nothing when every trait is zeroed.
fn bias_overlay(biases: &BiasProfile) -> Option<String> {
    let mut overlays = Vec::new();
    for (kind, strength) in biases.iter() {
        if strength == 0.0 {
            continue;
        }
        let line = match kind {
            BiasKind::Paranoia => {
                format!("Paranoia{}: double-checking motives.", qualifier(strength))
            }
            BiasKind::Hope => format!(
                "Hope{}: maybe there's a breakthrough close by.",
                qualifier(strength)
            ),
            BiasKind::SelfDoubt => {
                format!("Self-doubt{}: am I fabricating clarity?", qualifier(strength))
            }
            BiasKind::Nostalgia => format!(
                "Nostalgia{}: echoing something I nearly remembered.",
                qualifier(strength)
            ),
        };
        overlays.push(line);
    }
    if overlays.is_empty() {
        None
    } else {
        Some(format!("Bias drift: {}", overlays.join(" ")))
    }
}

/// Scan the prompt for trigger keywords. A hit refreshes the residual budget
/// to at least 2 and injects the trigger's message; with no hit, a positive
/// budget decrements and echoes a random message from the full catalog.
fn intrusive_injection<R: Rng>(
    prompt: &str,
    state: &mut ThoughtState,
    rng: &mut R,
) -> Option<String> {
    let lowered = prompt.to_lowercase();
    for (keywords, message) in INTRUSIVE_TRIGGERS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            state.intrusive_budget = state.intrusive_budget.max(2);
            tracing::debug!(trigger = keywords[0], "intrusive trigger fired");
            return Some(format!("Intrusive thought: {message}"));
        }
    }
    if state.intrusive_budget > 0 {
        state.intrusive_budget -= 1;
        let &(_, message) = INTRUSIVE_TRIGGERS.choose(rng)?;
        return Some(format!("Intrusive residue: {message}"));
    }
    None
}

/// Shuffle the source's words and return the first association-table hit, or
/// fall back to reversing one of the first three shuffled tokens.
fn associative_jump<R: Rng>(source: &str, rng: &mut R) -> Option<String> {
    let lowered = source.to_lowercase();
    let mut tokens: Vec<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();
    tokens.shuffle(rng);
    for token in &tokens {
        if let Some((_, phrases)) = ASSOCIATIONS.iter().find(|(concept, _)| concept == token) {
            return phrases.choose(rng).map(|phrase| (*phrase).to_string());
        }
    }
    let token = tokens.get(..tokens.len().min(3))?.choose(rng)?;
    let reversed: String = token.chars().rev().collect();
    Some(format!("{token} -> {reversed}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_qualifier_thresholds() {
        assert_eq!(qualifier(0.1), "");
        assert_eq!(qualifier(-0.1), "");
        assert_eq!(qualifier(0.2), " (persistent)");
        assert_eq!(qualifier(0.5), " (insistent)");
        assert_eq!(qualifier(-0.9), " (overpowering)");
    }

    #[test]
    fn test_mood_filter_always_extends_or_keeps_prompt() {
        for mood in Mood::ALL {
            let filtered = mood_filter("  a thought  ", mood);
            assert!(filtered.starts_with("a thought"));
        }
    }

    #[test]
    fn test_bias_overlay_default_profile_mentions_all_traits() {
        let overlay = bias_overlay(&BiasProfile::default()).unwrap();
        assert!(overlay.starts_with("Bias drift: "));
        assert!(overlay.contains("Paranoia"));
        assert!(overlay.contains("Hope"));
        assert!(overlay.contains("Self-doubt"));
        assert!(overlay.contains("Nostalgia"));
    }

    #[test]
    fn test_bias_overlay_skips_zeroed_traits() {
        let mut profile = BiasProfile::default();
        for kind in BiasKind::ALL {
            profile.adjust(kind, -profile.strength(kind));
        }
        assert_eq!(bias_overlay(&profile), None);
    }

    #[test]
    fn test_intrusive_trigger_sets_budget() {
        let mut state = ThoughtState::new();
        let mut rng = StdRng::seed_from_u64(1);
        let injected = intrusive_injection("is this a risk worth taking", &mut state, &mut rng);
        assert!(injected.unwrap().starts_with("Intrusive thought:"));
        assert_eq!(state.intrusive_budget, 2);
    }

    #[test]
    fn test_intrusive_residue_decrements_budget() {
        let mut state = ThoughtState::new();
        state.intrusive_budget = 2;
        let mut rng = StdRng::seed_from_u64(1);
        let injected = intrusive_injection("nothing triggering here", &mut state, &mut rng);
        assert!(injected.unwrap().starts_with("Intrusive residue:"));
        assert_eq!(state.intrusive_budget, 1);
    }

    #[test]
    fn test_intrusive_silent_without_budget_or_trigger() {
        let mut state = ThoughtState::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            intrusive_injection("nothing triggering here", &mut state, &mut rng),
            None
        );
    }

    #[test]
    fn test_associative_jump_hits_known_concept() {
        let mut rng = StdRng::seed_from_u64(2);
        let jump = associative_jump("memory", &mut rng).unwrap();
        let (_, phrases) = ASSOCIATIONS
            .iter()
            .find(|(concept, _)| *concept == "memory")
            .unwrap();
        assert!(phrases.contains(&jump.as_str()));
    }

    #[test]
    fn test_associative_jump_reversal_fallback() {
        let mut rng = StdRng::seed_from_u64(2);
        let jump = associative_jump("wandering", &mut rng).unwrap();
        assert_eq!(jump, "wandering -> gnirednaw");
    }

    #[test]
    fn test_associative_jump_empty_source() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(associative_jump("a b c", &mut rng), None);
    }

    #[test]
    fn test_distort_always_leads_with_mood_filter() {
        let engine = DistortionEngine::new();
        let mut state = ThoughtState::new();
        let mut rng = StdRng::seed_from_u64(8);
        let distorted = engine.distort("plain statement", &mut state, None, &mut rng);
        assert!(distorted.lines().next().unwrap().starts_with("plain statement"));
    }

    #[test]
    fn test_distort_renders_external_segment() {
        let engine = DistortionEngine::new();
        let mut state = ThoughtState::new();
        let mut rng = StdRng::seed_from_u64(8);
        let distorted = engine.distort("plain", &mut state, Some(" a knock "), &mut rng);
        assert!(distorted.contains("Interrupt: a knock"));
    }

    #[test]
    fn test_distort_handles_blank_prompt() {
        let engine = DistortionEngine::new();
        let mut state = ThoughtState::new();
        let mut rng = StdRng::seed_from_u64(8);
        let distorted = engine.distort("   ", &mut state, None, &mut rng);
        assert!(!distorted.is_empty());
        assert!(distorted.lines().next().unwrap().starts_with("..."));
    }
}
