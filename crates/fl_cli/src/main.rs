//! Lineup CLI
//!
//! Thin adapter over `fl_core`: loads a player pool (JSON) and a ruleset
//! (JSON/YAML file or the built-in preset), runs the sampler, and writes
//! lineups + metrics as a JSON run report. All legality logic lives in the
//! engine; this binary only moves bytes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use fl_core::{
    generate, generate_sharded, validate, Metrics, Player, PlayerPool, Rules, SampleOutcome,
    SamplerConfig, Lineup, ValidationResult,
};

#[derive(Parser)]
#[command(name = "fl_cli")]
#[command(about = "Sample and validate fantasy lineups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a batch of lineups from a player pool
    Generate {
        /// Input player pool JSON (array of player records)
        #[arg(long)]
        pool: PathBuf,

        /// Rules file, JSON or YAML; omit for the NBA classic preset
        #[arg(long)]
        rules: Option<PathBuf>,

        /// RNG seed (mandatory: runs are reproducible by construction)
        #[arg(long)]
        seed: u64,

        /// Number of lineups to sample
        #[arg(long, default_value_t = 20)]
        count: usize,

        /// Ownership chalk-bias exponent
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,

        /// Max Jaccard similarity against already-accepted lineups
        #[arg(long)]
        diversity_target: Option<f64>,

        /// Attempt budget per requested lineup
        #[arg(long, default_value_t = 1000)]
        max_attempts_multiplier: u64,

        /// Worker count; values above 1 use sharded generation
        #[arg(long, default_value_t = 1)]
        workers: usize,

        /// Output report path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate one lineup (JSON array of player ids) against a pool
    Validate {
        #[arg(long)]
        pool: PathBuf,

        /// Rules file, JSON or YAML; omit for the NBA classic preset
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Lineup JSON: array of player ids, one per roster slot
        #[arg(long)]
        lineup: PathBuf,
    },
}

/// JSON run report written by `generate`.
#[derive(Serialize)]
struct RunReport {
    generated_at: String,
    seed: u64,
    outcome: SampleOutcome,
    lineups: Vec<Lineup>,
    metrics: Metrics,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Generate {
            pool,
            rules,
            seed,
            count,
            alpha,
            diversity_target,
            max_attempts_multiplier,
            workers,
            out,
        } => {
            let pool = load_pool(&pool)?;
            let rules = load_rules(rules.as_deref())?;
            let mut config = SamplerConfig::new(count, seed);
            config.ownership_alpha = alpha;
            config.diversity_target = diversity_target;
            config.max_attempts_multiplier = max_attempts_multiplier;

            let report = run_generate(&pool, &rules, config, workers)?;
            let partial = matches!(report.outcome, SampleOutcome::Partial { .. });

            let json = serde_json::to_string_pretty(&report)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing report to {}", path.display()))?;
                    println!(
                        "wrote {} lineup(s) to {} ({} attempts)",
                        report.lineups.len(),
                        path.display(),
                        report.metrics.total_attempts
                    );
                }
                None => println!("{}", json),
            }

            if partial {
                eprintln!(
                    "warning: collected {}/{} lineups before the attempt budget ran out; \
                     the pool or ruleset may be too tight for the requested batch",
                    report.lineups.len(),
                    count
                );
                // Scripts branch on exhaustion without parsing the report.
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate { pool, rules, lineup } => {
            let pool = load_pool(&pool)?;
            let rules = load_rules(rules.as_deref())?;
            let ids: Vec<String> = serde_json::from_str(
                &fs::read_to_string(&lineup)
                    .with_context(|| format!("reading lineup from {}", lineup.display()))?,
            )
            .context("lineup file must be a JSON array of player ids")?;

            let result = run_validate(&ids, &pool, &rules);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.valid {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(2))
            }
        }
    }
}

fn run_generate(
    pool: &PlayerPool,
    rules: &Rules,
    config: SamplerConfig,
    workers: usize,
) -> Result<RunReport> {
    let seed = config.seed;
    let batch = if workers > 1 {
        generate_sharded(pool, rules, config, workers)?
    } else {
        generate(pool, rules, config)?
    };
    Ok(RunReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        seed,
        outcome: batch.outcome,
        lineups: batch.lineups,
        metrics: batch.metrics,
    })
}

fn run_validate(ids: &[String], pool: &PlayerPool, rules: &Rules) -> ValidationResult {
    validate(ids, pool, rules)
}

fn load_pool(path: &Path) -> Result<PlayerPool> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading player pool from {}", path.display()))?;
    let players: Vec<Player> =
        serde_json::from_str(&raw).context("pool file must be a JSON array of players")?;
    PlayerPool::new(players).context("player pool failed integrity checks")
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::nba_classic());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading rules from {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);
    let rules = if is_yaml {
        serde_yaml::from_str(&raw).context("parsing YAML rules")?
    } else {
        serde_json::from_str(&raw).context("parsing JSON rules")?
    };
    Ok(rules)
}
