/*!
# Share Planning

Operators think in percentages ("46% to contributors"), the sale works in
basis points. This module converts between the two and previews the final
split for a given contribution total, using exactly the rounding the sale
applies at finalization.
*/

use ceiling_protocol::{Amount, BPS_DENOMINATOR, PoolShares, SupplyAllocation, split_supply};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{SdkError, SdkResult};

/// Pool shares as human percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePlan {
    pub contributors: Decimal,
    pub exchange: Decimal,
    pub vesting: Decimal,
    pub secondary: Decimal,
}

impl Default for SharePlan {
    fn default() -> Self {
        Self::from_pool_shares(&PoolShares::default())
    }
}

impl SharePlan {
    pub fn from_pool_shares(shares: &PoolShares) -> Self {
        let pct = |bps: u16| Decimal::from(bps) / Decimal::ONE_HUNDRED;
        Self {
            contributors: pct(shares.contributors_bps),
            exchange: pct(shares.exchange_bps),
            vesting: pct(shares.vesting_bps),
            secondary: pct(shares.secondary_bps),
        }
    }

    /// Convert to basis points. Percentages must be exact to 0.01% and sum to
    /// 100.
    pub fn to_pool_shares(&self) -> SdkResult<PoolShares> {
        let shares = PoolShares {
            contributors_bps: percentage_to_bps(self.contributors)?,
            exchange_bps: percentage_to_bps(self.exchange)?,
            vesting_bps: percentage_to_bps(self.vesting)?,
            secondary_bps: percentage_to_bps(self.secondary)?,
        };
        if shares.total_bps() != BPS_DENOMINATOR as u32 {
            return Err(SdkError::InvalidShares(format!(
                "percentages sum to {}%, expected 100%",
                self.contributors + self.exchange + self.vesting + self.secondary
            )));
        }
        shares.validate()?;
        Ok(shares)
    }
}

pub fn percentage_to_bps(percentage: Decimal) -> SdkResult<u16> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(SdkError::InvalidPercentage(percentage));
    }
    let bps = percentage * Decimal::ONE_HUNDRED;
    if bps.fract() != Decimal::ZERO {
        return Err(SdkError::InvalidPercentage(percentage));
    }
    bps.to_u16().ok_or(SdkError::InvalidPercentage(percentage))
}

/// One row of an allocation preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolPreview {
    pub pool: &'static str,
    pub amount: String,
    /// Share of the final supply actually received, after rounding.
    pub percent_of_supply: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPreview {
    pub allocation: SupplyAllocation,
    pub rows: Vec<PoolPreview>,
}

/// Finalization split for `contributed` value at `rate` units per value unit.
pub fn preview_allocation(
    contributed: Amount,
    rate: Amount,
    shares: &PoolShares,
) -> SdkResult<AllocationPreview> {
    let units = contributed
        .checked_mul(rate)
        .ok_or(SdkError::Sale(ceiling_protocol::SaleError::NumericOverflow))?;
    let allocation = split_supply(units, shares)?;

    let percent = |amount: Amount| -> Decimal {
        match (Decimal::from_u128(amount), Decimal::from_u128(allocation.total_supply)) {
            (Some(part), Some(total)) if !total.is_zero() => {
                (part * Decimal::ONE_HUNDRED / total).round_dp(4)
            }
            _ => Decimal::ZERO,
        }
    };

    let rows = [
        ("contributors", allocation.contributors),
        ("exchange", allocation.exchange),
        ("vesting", allocation.vesting),
        ("secondary", allocation.secondary),
    ]
    .into_iter()
    .map(|(pool, amount)| PoolPreview {
        pool,
        amount: amount.to_string(),
        percent_of_supply: percent(amount),
    })
    .collect();

    Ok(AllocationPreview { allocation, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_default_plan_matches_default_shares() {
        let plan = SharePlan::default();
        assert_eq!(plan.contributors, dec!(46));
        assert_eq!(plan.exchange, dec!(5));
        assert_eq!(plan.to_pool_shares().unwrap(), PoolShares::default());
    }

    #[test]
    fn test_fractional_percentages() {
        assert_eq!(percentage_to_bps(dec!(12.34)).unwrap(), 1_234);
        assert_eq!(percentage_to_bps(dec!(0.01)).unwrap(), 1);
        assert!(percentage_to_bps(dec!(0.005)).is_err());
        assert!(percentage_to_bps(dec!(-1)).is_err());
        assert!(percentage_to_bps(dec!(100.01)).is_err());
    }

    #[test]
    fn test_plan_must_sum_to_hundred() {
        let plan = SharePlan {
            contributors: dec!(50),
            exchange: dec!(5),
            vesting: dec!(20),
            secondary: dec!(29),
        };
        assert!(matches!(
            plan.to_pool_shares(),
            Err(SdkError::InvalidShares(_))
        ));
    }

    #[test]
    fn test_preview_matches_finalization() {
        let preview = preview_allocation(15, 1_000, &PoolShares::default()).unwrap();

        assert_eq!(preview.allocation.total_supply, 32_608);
        assert_eq!(preview.allocation.contributors, 15_000);
        assert_eq!(preview.allocation.sum(), 32_608);
        assert_eq!(preview.rows.len(), 4);
        assert_eq!(preview.rows[0].amount, "15000");

        let total: Decimal = preview.rows.iter().map(|r| r.percent_of_supply).sum();
        assert!((total - dec!(100)).abs() <= dec!(0.001));
    }

    #[test]
    fn test_preview_of_empty_sale() {
        let preview = preview_allocation(0, 1_000, &PoolShares::default()).unwrap();
        assert_eq!(preview.allocation.total_supply, 0);
        assert!(preview.rows.iter().all(|r| r.percent_of_supply.is_zero()));
    }
}
