use crate::constants::BPS_DENOMINATOR;
use crate::error::{SaleError, SaleResult};
use crate::state::{Amount, PoolShares, SupplyAllocation};

/// Derive the final supply from the units already minted to contributors and
/// split it across the pools.
///
/// Rounding: total supply and each pool round down; the leftover is added to
/// the largest pool minted at finalization (first of exchange, vesting,
/// secondary on a tie), so the four pools always sum to `total_supply`.
pub fn split_supply(
    contributor_units: Amount,
    shares: &PoolShares,
) -> SaleResult<SupplyAllocation> {
    shares.validate()?;

    let denominator = BPS_DENOMINATOR as Amount;
    let total_supply = contributor_units
        .checked_mul(denominator)
        .ok_or(SaleError::NumericOverflow)?
        / shares.contributors_bps as Amount;

    let pool_of = |bps: u16| -> SaleResult<Amount> {
        Ok(total_supply
            .checked_mul(bps as Amount)
            .ok_or(SaleError::NumericOverflow)?
            / denominator)
    };

    let mut exchange = pool_of(shares.exchange_bps)?;
    let mut vesting = pool_of(shares.vesting_bps)?;
    let mut secondary = pool_of(shares.secondary_bps)?;

    let assigned = contributor_units + exchange + vesting + secondary;
    let remainder = total_supply
        .checked_sub(assigned)
        .ok_or(SaleError::NumericOverflow)?;

    let largest = shares
        .exchange_bps
        .max(shares.vesting_bps)
        .max(shares.secondary_bps);
    if shares.exchange_bps == largest {
        exchange += remainder;
    } else if shares.vesting_bps == largest {
        vesting += remainder;
    } else {
        secondary += remainder;
    }

    Ok(SupplyAllocation {
        total_supply,
        contributors: contributor_units,
        exchange,
        vesting,
        secondary,
    })
}
