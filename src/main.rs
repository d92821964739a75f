//! Crash Chain CLI
//!
//! Generates and verifies provably fair crash chains. Data goes to stdout,
//! logs to stderr.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crash_chain::{
    game::outcome::explain, generate_chain, verify_outcome, Chain, ChainCommitment, ChainConfig,
    HouseEdge, Outcome, Salt, Seed, VERSION,
};

#[derive(Parser)]
#[command(name = "crash-chain", version, about = "Provably fair crash chain generator and verifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file with salt, house_edge and length
    #[arg(long, global = true, env = "CRASH_CONFIG")]
    config: Option<PathBuf>,

    /// Salt folded into every seed (hex); overrides config and CRASH_SALT
    #[arg(long, global = true)]
    salt: Option<Salt>,

    /// House edge in percent; overrides config and CRASH_HOUSE_EDGE
    #[arg(long, global = true)]
    house_edge: Option<HouseEdge>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream chain entries starting from a seed
    Generate {
        /// Initial seed (hex)
        #[arg(long)]
        seed: Seed,
        /// Number of entries; overrides config and CRASH_CHAIN_LENGTH
        #[arg(long)]
        count: Option<u64>,
        /// First entry to emit
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Derive the outcome of a single seed
    Derive {
        /// Game seed (hex)
        #[arg(long)]
        seed: Seed,
        /// Print every intermediate value as JSON
        #[arg(long)]
        explain: bool,
    },
    /// Check a published outcome against its seed
    Verify {
        /// Game seed (hex)
        #[arg(long)]
        seed: Seed,
        /// Published outcome, e.g. 4.21
        #[arg(long)]
        expect: Outcome,
    },
    /// Print the terminal hash committing to a chain
    Commit {
        /// Initial seed (hex)
        #[arg(long)]
        seed: Seed,
        /// Number of entries; overrides config and CRASH_CHAIN_LENGTH
        #[arg(long)]
        count: Option<u64>,
    },
    /// Find a game seed in a committed chain
    Locate {
        /// Game seed (hex)
        #[arg(long)]
        seed: Seed,
        /// Published terminal hash
        #[arg(long)]
        commitment: Seed,
        /// Committed chain length; at most this many hashes are tried
        #[arg(long)]
        max_steps: u64,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(version = VERSION, house_edge = %config.house_edge, salted = !config.salt.is_empty(), "crash-chain");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Generate { seed, count, start, json } => {
            let length = count.unwrap_or(config.length);
            let chain = if start == 0 {
                generate_chain(seed, config.salt, config.house_edge, length)
            } else {
                Chain::starting_at(seed, config.salt, config.house_edge, length, start)
            };
            let mut unbounded = 0u64;
            for entry in chain {
                if entry.outcome.is_unbounded() {
                    unbounded += 1;
                }
                if json {
                    serde_json::to_writer(&mut out, &entry)?;
                    writeln!(out)?;
                } else {
                    writeln!(out, "Hash: {}, Bust: {}", entry.seed, entry.outcome)?;
                }
            }
            out.flush()?;
            info!(length, start, unbounded, "chain generated");
        }
        Commands::Derive { seed, explain: detailed } => {
            if detailed {
                let derivation = explain(&seed, &config.salt, config.house_edge);
                serde_json::to_writer_pretty(&mut out, &derivation)?;
                writeln!(out)?;
            } else {
                let outcome = crash_chain::derive(&seed, &config.salt, config.house_edge);
                writeln!(out, "{outcome}")?;
            }
        }
        Commands::Verify { seed, expect } => {
            verify_outcome(&seed, &config.salt, config.house_edge, expect)
                .with_context(|| format!("seed {seed} does not produce {expect}"))?;
            writeln!(out, "OK: {seed} -> {expect}")?;
        }
        Commands::Commit { seed, count } => {
            let commitment = ChainCommitment::for_chain(&seed, count.unwrap_or(config.length));
            serde_json::to_writer_pretty(&mut out, &commitment)?;
            writeln!(out)?;
        }
        Commands::Locate { seed, commitment, max_steps } => {
            let index = ChainCommitment::new(commitment, max_steps).locate(&seed)?;
            // locate only returns indices below max_steps.
            writeln!(out, "entry {index} (game #{})", max_steps - index)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Config file (or defaults), then environment, then command-line flags.
fn load_config(cli: &Cli) -> anyhow::Result<ChainConfig> {
    let base = match &cli.config {
        Some(path) => ChainConfig::from_json_file(path)?,
        None => ChainConfig::default(),
    };
    let mut config = base.with_env()?;
    if let Some(salt) = &cli.salt {
        config.salt = salt.clone();
    }
    if let Some(edge) = cli.house_edge {
        config.house_edge = edge;
    }
    Ok(config)
}
