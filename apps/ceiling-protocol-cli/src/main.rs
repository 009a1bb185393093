use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

use error::CliResult;

#[derive(Parser)]
#[command(name = "ceiling-protocol")]
#[command(about = "Ceiling Protocol CLI - Plan and audit dynamic-ceiling token sales")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a campaign file and print its parameters
    CheckCampaign {
        /// Campaign configuration file
        config: PathBuf,
    },

    /// Salt the campaign's ceiling points and write commitments plus the secret reveal plan
    GenerateSchedule {
        /// Campaign configuration file
        config: PathBuf,

        /// Output directory for generated files
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Seed for deterministic salts (never use for a real sale)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Check every reveal step of a plan against its commitment
    VerifySchedule {
        /// Reveal plan JSON file
        plan: PathBuf,
    },

    /// Preview the finalization split for a contribution total
    PreviewAllocation {
        /// Total contributed value
        #[arg(short, long)]
        contributed: String,

        /// Units minted per value unit (ignored with --config)
        #[arg(short, long, default_value = "1000")]
        rate: String,

        /// Take rate and shares from this campaign file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::CheckCampaign { config } => commands::check_campaign::execute(config),

        Commands::GenerateSchedule {
            config,
            output_dir,
            seed,
        } => commands::generate_schedule::execute(config, output_dir, seed),

        Commands::VerifySchedule { plan } => commands::verify_schedule::execute(plan),

        Commands::PreviewAllocation {
            contributed,
            rate,
            config,
            json,
        } => commands::preview_allocation::execute(contributed, rate, config, json),
    }
}
