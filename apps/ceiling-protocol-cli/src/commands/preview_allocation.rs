use ceiling_protocol::{Amount, PoolShares};
use ceiling_protocol_sdk::{preview_allocation, AllocationPreview, PoolPreview};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::check_campaign::load_checked;
use crate::commands::parse_amount;
use crate::error::CliResult;

#[derive(Serialize)]
struct PreviewOutput {
    contributed: String,
    rate: String,
    total_supply: String,
    pools: Vec<PoolPreview>,
}

/// Print the supply split a sale would mint for `contributed`
pub fn execute(
    contributed: String,
    rate: String,
    config: Option<PathBuf>,
    json: bool,
) -> CliResult<()> {
    let contributed = parse_amount(&contributed)?;
    let (rate, shares) = match config {
        Some(path) => {
            let (_, sale_config) = load_checked(&path)?;
            (sale_config.rate, sale_config.shares)
        }
        None => (parse_amount(&rate)?, PoolShares::default()),
    };

    let preview = preview_allocation(contributed, rate, &shares)?;
    if json {
        println!("{}", render_json(contributed, rate, &preview)?);
    } else {
        println!("📊 Allocation for {} contributed at rate {}", contributed, rate);
        println!("{:<14} {:>24} {:>10}", "pool", "amount", "% supply");
        for row in &preview.rows {
            println!(
                "{:<14} {:>24} {:>10}",
                row.pool, row.amount, row.percent_of_supply
            );
        }
        println!("{:<14} {:>24}", "total", preview.allocation.total_supply);
    }
    Ok(())
}

fn render_json(
    contributed: Amount,
    rate: Amount,
    preview: &AllocationPreview,
) -> CliResult<String> {
    let output = PreviewOutput {
        contributed: contributed.to_string(),
        rate: rate.to_string(),
        total_supply: preview.allocation.total_supply.to_string(),
        pools: preview.rows.clone(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
