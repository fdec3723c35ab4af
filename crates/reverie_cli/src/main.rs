//! reverie command line: run the mind simulation and render a transcript.

use anyhow::Result;
use clap::Parser;
use reverie_core::{BiasKind, Mood};
use reverie_engine::{MindEngine, RunConfig, StepResult};
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 72;

#[derive(Parser, Debug)]
#[command(
    name = "reverie",
    version,
    about = "Simulate a recursive mind that mutates its own prompts."
)]
struct Args {
    /// Initial thought to seed the recursive loop
    prompt: String,

    /// Number of recursive iterations to run
    #[arg(long, default_value_t = 8)]
    steps: u32,

    /// Disable environmental interrupts for a cleaner loop
    #[arg(long)]
    no_interrupts: bool,

    /// Seed the random stream for repeatable runs
    #[arg(long)]
    seed: Option<u64>,

    /// Force the starting mood instead of letting it drift organically
    #[arg(long, value_parser = parse_mood)]
    mood: Option<Mood>,

    /// Override a bias weight, e.g. --bias paranoia=0.4 (can repeat)
    #[arg(long = "bias", value_name = "NAME=VALUE", value_parser = parse_bias_override)]
    bias: Vec<BiasOverride>,

    /// Emit the transcript as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone)]
struct BiasOverride {
    kind: BiasKind,
    delta: f32,
}

fn parse_mood(raw: &str) -> Result<Mood, String> {
    Mood::from_str(raw).map_err(|err| err.to_string())
}

fn parse_bias_override(raw: &str) -> Result<BiasOverride, String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("bias override '{raw}' must look like name=value"))?;
    let kind = BiasKind::from_str(name).map_err(|err| err.to_string())?;
    let delta: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("could not parse bias value '{value}'"))?;
    Ok(BiasOverride { kind, delta })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = RunConfig {
        steps: args.steps,
        allow_interrupts: !args.no_interrupts,
        starting_mood: args.mood,
        bias_overrides: args.bias.iter().map(|b| (b.kind, b.delta)).collect(),
    };

    debug!(steps = config.steps, seed = ?args.seed, "starting run");
    let mut engine = MindEngine::new(args.seed);
    let results = engine.run(&args.prompt, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        render_transcript(&args, &results);
    }
    Ok(())
}

fn render_transcript(args: &Args, results: &[StepResult]) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!("Initial prompt: {}", args.prompt);
    println!(
        "Starting mood: {}",
        args.mood
            .map(|mood| mood.to_string())
            .unwrap_or_else(|| "auto".to_string())
    );
    if args.bias.is_empty() {
        println!("Bias overrides: default profile");
    } else {
        let overrides: Vec<String> = args
            .bias
            .iter()
            .map(|b| format!("{}={}", b.kind, b.delta))
            .collect();
        println!("Bias overrides: {}", overrides.join(", "));
    }
    println!("{rule}");

    for step in results {
        println!("[{:02}] mood={} ({})", step.iteration, step.mood, step.mood.tone_hint());
        if let Some(external) = &step.external {
            println!("  external -> {external}");
        }
        println!("  prompt  -> {}", step.prompt.replace('\n', "\n              "));
        println!("  thought -> {}", step.thought);
        println!("{}", "-".repeat(RULE_WIDTH));
    }
}
