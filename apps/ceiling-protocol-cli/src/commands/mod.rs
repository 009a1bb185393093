pub mod check_campaign;
pub mod generate_schedule;
pub mod preview_allocation;
pub mod verify_schedule;

use ceiling_protocol::Amount;

use crate::error::{CliError, CliResult};

/// Amounts are u128, too wide for clap's numeric parsers.
pub(crate) fn parse_amount(raw: &str) -> CliResult<Amount> {
    raw.trim()
        .replace('_', "")
        .parse::<Amount>()
        .map_err(|e| CliError::InvalidAmount(format!("'{raw}': {e}")))
}
