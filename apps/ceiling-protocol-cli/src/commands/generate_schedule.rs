use ceiling_protocol_sdk::RevealPlan;
use rand::{rngs::StdRng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::commands::check_campaign::load_checked;
use crate::error::CliResult;

pub const COMMITMENTS_FILE: &str = "commitments.json";
pub const REVEAL_PLAN_FILE: &str = "reveal_plan.json";

/// Build the hidden schedule for a campaign
///
/// Writes two files:
/// - `commitments.json`: the hashes to commit, safe to publish
/// - `reveal_plan.json`: heights, caps and salts, secret until each reveal
pub fn execute(config: PathBuf, output_dir: PathBuf, seed: Option<u64>) -> CliResult<()> {
    println!("📋 Generating hidden schedule from {}", config.display());

    let plan = generate(&config, &output_dir, seed)?;

    println!("✅ Generated {} commitments", plan.commitments.len());
    println!(
        "  - Public commitments: {}",
        output_dir.join(COMMITMENTS_FILE).display()
    );
    println!(
        "  - Secret reveal plan: {}",
        output_dir.join(REVEAL_PLAN_FILE).display()
    );
    println!(
        "\n⚠️  Keep {} private until the last point is revealed",
        REVEAL_PLAN_FILE
    );
    Ok(())
}

pub(crate) fn generate(
    config: &Path,
    output_dir: &Path,
    seed: Option<u64>,
) -> CliResult<RevealPlan> {
    let (campaign, _) = load_checked(config)?;

    let mut rng = match seed {
        Some(seed) => {
            warn!(seed, "deterministic salts requested");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let plan = campaign.hidden_schedule().build(&mut rng)?;
    plan.verify()?;

    fs::create_dir_all(output_dir)?;
    plan.public().save_json(&output_dir.join(COMMITMENTS_FILE))?;
    plan.save_json(&output_dir.join(REVEAL_PLAN_FILE))?;

    info!(
        points = plan.reveals.len(),
        decoys = plan.decoy_count(),
        output_dir = %output_dir.display(),
        "hidden schedule written"
    );
    Ok(plan)
}
