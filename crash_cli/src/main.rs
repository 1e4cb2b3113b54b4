use std::io::{self, Write};

use clap::{Parser, Subcommand};
use crash_core::{
    locate_in_chain, summarize, verify_chain, FairnessConfig, FairnessHasher, RoundFormatter,
    DEFAULT_CLIENT_SEED,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod render;

use render::{OutputFormat, RoundReport};

#[derive(Parser)]
#[command(name = "crash-verify", about = "Verify crash game rounds from a revealed server seed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Client seed mixed into every round hash
    #[arg(long, global = true, env = "CRASH_CLIENT_SEED", default_value = DEFAULT_CLIENT_SEED)]
    client_seed: String,
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the crash point of a round and the 100 rounds before it
    Round {
        seed: String,
        /// Only show the inputted round
        #[arg(long)]
        no_history: bool,
    },
    /// Check that seeds, newest first, each hash to the one before them
    Chain {
        #[arg(required = true, num_args = 2..)]
        seeds: Vec<String>,
    },
    /// Count the hashing steps from a later revealed seed back to an earlier round
    Locate {
        anchor: String,
        target: String,
        #[arg(long, default_value_t = 10_000)]
        depth: usize,
    },
}

#[derive(thiserror::Error, Debug)]
enum InputError {
    #[error("no server seed given")]
    EmptySeed,
}

/// Seeds are hashed byte for byte, so surrounding whitespace is kept.
fn require_seed(seed: &str) -> Result<&str, InputError> {
    if seed.is_empty() {
        return Err(InputError::EmptySeed);
    }
    Ok(seed)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_round(
    out: &mut impl Write,
    formatter: &RoundFormatter,
    format: OutputFormat,
    seed: &str,
    no_history: bool,
) -> anyhow::Result<()> {
    let seed = require_seed(seed)?;
    let round = formatter.format_round(seed)?;
    let history = if no_history {
        Vec::new()
    } else {
        formatter.previous_rounds(seed)?
    };
    let summary = if history.is_empty() {
        None
    } else {
        Some(summarize(&history)?)
    };
    info!(seed, crash_point = %round.multiplier, "verified round");
    render::write_report(
        out,
        format,
        &RoundReport {
            client_seed: formatter.hasher().client_seed(),
            round: &round,
            previous_rounds: &history,
            summary: summary.as_ref(),
        },
    )
}

fn run_chain(out: &mut impl Write, seeds: &[String]) -> anyhow::Result<()> {
    for seed in seeds {
        require_seed(seed)?;
    }
    verify_chain(seeds)?;
    writeln!(out, "Chain of {} seeds is valid", seeds.len())?;
    Ok(())
}

fn run_locate(out: &mut impl Write, anchor: &str, target: &str, depth: usize) -> anyhow::Result<()> {
    let anchor = require_seed(anchor)?;
    let target = require_seed(target)?;
    debug!(depth, "searching chain");
    match locate_in_chain(anchor, target, depth) {
        Some(steps) => writeln!(out, "{target} is {steps} round(s) before {anchor}")?,
        None => anyhow::bail!("{target} not found within {depth} rounds of {anchor}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter = RoundFormatter::new(FairnessHasher::new(FairnessConfig::new(cli.client_seed)));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Round { seed, no_history } => {
            run_round(&mut out, &formatter, cli.format, &seed, no_history)?
        }
        Commands::Chain { seeds } => run_chain(&mut out, &seeds)?,
        Commands::Locate {
            anchor,
            target,
            depth,
        } => run_locate(&mut out, &anchor, &target, depth)?,
    }

    Ok(())
}
