use ceiling_protocol::{SaleConfig, SECONDS_PER_DAY};
use ceiling_protocol_sdk::CampaignFile;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CliResult;

/// Validate a campaign file the same way the sale would at creation
pub fn execute(config: PathBuf) -> CliResult<()> {
    println!("🔍 Checking campaign: {}", config.display());

    let (campaign, sale_config) = load_checked(&config)?;

    println!("✅ Campaign is valid");
    println!("📊 Summary:");
    println!(
        "  - Window: blocks {} - {}",
        sale_config.start_height, sale_config.stop_height
    );
    println!("  - Rate: {} units per value unit", sale_config.rate);
    println!(
        "  - Shares: contributors {}%, exchange {}%, vesting {}%, secondary {}%",
        campaign.shares.contributors,
        campaign.shares.exchange,
        campaign.shares.vesting,
        campaign.shares.secondary
    );
    println!(
        "  - Ceiling points: {} (+{} decoys), final cap {}",
        campaign.points.len(),
        campaign.decoys,
        campaign.points.last().map_or(0, |p| p.cap)
    );
    println!(
        "  - Transfer lock: {} days",
        sale_config.transfer_lock_seconds / SECONDS_PER_DAY
    );
    println!(
        "  - Vesting step: {} days",
        sale_config.vesting_step_seconds / SECONDS_PER_DAY
    );
    println!("  - Controller: {}", sale_config.controller);

    Ok(())
}

/// Load the campaign, derive the sale config and validate the ceiling ladder.
pub(crate) fn load_checked(config: &Path) -> CliResult<(CampaignFile, SaleConfig)> {
    let campaign = CampaignFile::load(config)?;
    let sale_config = campaign.to_sale_config()?;
    campaign.hidden_schedule().validate()?;
    debug!(?sale_config, "campaign loaded");
    Ok((campaign, sale_config))
}
