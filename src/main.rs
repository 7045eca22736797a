//! Headless match runner
//!
//! Runs reactive vs proactive matches on generated fields and prints a
//! report, for policy comparison experiments across seeds and orderings.

use clap::Parser;
use serde::Serialize;

use dominion::core::config::{MatchConfig, PolicyKind};
use dominion::simulation::stats::MatchReport;
use dominion::world::{generate, FieldSpec};
use dominion::{Match, Team};

/// Headless match runner for policy comparison experiments
#[derive(Parser, Debug)]
#[command(name = "dominion")]
#[command(about = "Run reactive vs proactive domination matches")]
struct Args {
    /// Agents per team
    #[arg(long, default_value_t = 3)]
    team_size: u32,

    /// Red team policy: reactive or proactive
    #[arg(long, default_value = "reactive")]
    red: String,

    /// Blue team policy: reactive or proactive
    #[arg(long, default_value = "proactive")]
    blue: String,

    /// Maximum ticks before the match is called at the cap
    #[arg(long, default_value_t = 3000)]
    max_ticks: u64,

    /// Random seed for deterministic field generation
    #[arg(long)]
    seed: Option<u64>,

    /// Optional TOML file overriding the default match configuration
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Field width in cells (minimum 6)
    #[arg(long, default_value_t = 39, value_parser = clap::value_parser!(i32).range(6..))]
    width: i32,

    /// Field height in cells (minimum 4)
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(i32).range(4..))]
    height: i32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    red_policy: PolicyKind,
    blue_policy: PolicyKind,
    #[serde(flatten)]
    report: MatchReport,
}

fn parse_policy(raw: &str) -> Result<PolicyKind, String> {
    match raw {
        "reactive" => Ok(PolicyKind::Reactive),
        "proactive" => Ok(PolicyKind::Proactive),
        other => Err(format!(
            "unknown policy '{other}' (expected 'reactive' or 'proactive')"
        )),
    }
}

fn main() -> dominion::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dominion=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let red_policy = match parse_policy(&args.red) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let blue_policy = match parse_policy(&args.blue) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => MatchConfig::from_toml_file(path)?,
        None => MatchConfig::default(),
    };

    let spec = FieldSpec {
        width: args.width,
        height: args.height,
        ..FieldSpec::default()
    };
    let world = generate(seed, &spec)?;

    let mut game = Match::new(config, world)?;
    for _ in 0..args.team_size {
        game.spawn_agent(Team::Red, red_policy);
        game.spawn_agent(Team::Blue, blue_policy);
    }

    tracing::info!(seed, ?red_policy, ?blue_policy, "match starting");
    let report = game.run(args.max_ticks)?;

    let summary = RunSummary {
        seed,
        red_policy,
        blue_policy,
        report,
    };

    if args.format == "text" {
        println!(
            "{:?} after {} ticks (red {} - blue {}), seed {}",
            summary.report.outcome,
            summary.report.ticks,
            summary.report.score.red,
            summary.report.score.blue,
            summary.seed
        );
    } else {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
