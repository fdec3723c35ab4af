//! Integration tests for the run loop: contract shape, interrupt seam, and
//! the seeded-determinism guarantee.

use reverie_core::Mood;
use reverie_engine::{MindEngine, NoInterrupts, RunConfig, ScriptedInterrupts, StepResult};

fn quiet_config(steps: u32) -> RunConfig {
    RunConfig {
        steps,
        allow_interrupts: false,
        starting_mood: Some(Mood::Calm),
        bias_overrides: Vec::new(),
    }
}

#[test]
fn test_run_produces_exactly_requested_steps() {
    let mut engine = MindEngine::new(Some(1337));
    let results = engine.run("I feel stuck in this loop", &quiet_config(3));

    assert_eq!(results.len(), 3);
    for (index, step) in results.iter().enumerate() {
        assert_eq!(step.iteration, index as u32 + 1);
        assert!(!step.prompt.is_empty());
        assert!(!step.thought.is_empty());
        assert_eq!(step.external, None);
    }
}

#[test]
fn test_scripted_interrupt_lands_on_first_step_only() {
    let script = vec![(1, "TEST STIMULUS".to_string())];
    let mut engine =
        MindEngine::with_interrupts(Some(1337), Box::new(ScriptedInterrupts::new(script)));
    let config = RunConfig {
        steps: 3,
        allow_interrupts: true,
        starting_mood: Some(Mood::Calm),
        bias_overrides: Vec::new(),
    };
    let results = engine.run("I feel stuck in this loop", &config);

    assert_eq!(results[0].external.as_deref(), Some("TEST STIMULUS"));
    assert!(results[0].prompt.contains("Interrupt: TEST STIMULUS"));
    assert_eq!(results[1].external, None);
    assert_eq!(results[2].external, None);
}

#[test]
fn test_identical_seeds_produce_identical_transcripts() {
    let run = |seed: u64| -> Vec<StepResult> {
        let mut engine = MindEngine::new(Some(seed));
        engine.run("I feel stuck in this loop", &RunConfig::default())
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_interrupts_disabled_never_queries_the_source() {
    // A scripted source that would fire every step stays silent when the
    // run disables interrupts.
    let script: Vec<(u32, String)> = (1..=5).map(|i| (i, "noise".to_string())).collect();
    let mut engine =
        MindEngine::with_interrupts(Some(5), Box::new(ScriptedInterrupts::new(script)));
    let results = engine.run("quiet please", &quiet_config(5));
    assert!(results.iter().all(|step| step.external.is_none()));
}

#[test]
fn test_blank_initial_thought_still_yields_output() {
    let mut engine = MindEngine::with_interrupts(Some(21), Box::new(NoInterrupts));
    let results = engine.run("", &quiet_config(2));
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|step| !step.prompt.is_empty()));
    assert!(results.iter().all(|step| !step.thought.is_empty()));
}

#[test]
fn test_run_until_stops_when_predicate_holds() {
    let mut engine = MindEngine::new(Some(77));
    // state.iteration is steps-completed + 1 (the initial registration).
    let results = engine.run_until("counting down", |state| state.iteration >= 3, 10);
    assert_eq!(results.len(), 2);
}

#[test]
fn test_run_until_respects_max_steps() {
    let mut engine = MindEngine::new(Some(77));
    let results = engine.run_until("never satisfied", |_| false, 4);
    assert_eq!(results.len(), 4);
}

#[test]
fn test_intrusive_trigger_echoes_into_later_steps() {
    // "loop"/"stuck" in the seed thought trips the intrusive trigger on the
    // first distortion; the budget then allows residue on following steps.
    let mut engine = MindEngine::new(Some(4));
    let results = engine.run("I feel stuck in this loop", &quiet_config(1));
    assert!(results[0].prompt.contains("Intrusive thought:"));
}

#[test]
fn test_step_results_serialize_without_absent_external() {
    let mut engine = MindEngine::new(Some(8));
    let results = engine.run("serialize me", &quiet_config(1));
    let json = serde_json::to_string(&results).unwrap();
    assert!(json.contains("\"iteration\":1"));
    assert!(!json.contains("\"external\""));
}
