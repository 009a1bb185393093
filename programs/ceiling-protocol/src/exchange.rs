use std::collections::BTreeMap;

use crate::error::{SaleError, SaleResult};
use crate::state::{Amount, BlockHeight, Identity, SwapClaim};

/// One-time proportional conversion of legacy balances into the exchange pool.
///
/// Payouts round down; the dust left in the pool after every holder has
/// claimed is never distributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeSwap {
    pool_total: Amount,
    legacy_total_supply: Amount,
    /// Legacy balances are read at this height.
    snapshot_height: BlockHeight,
    claims: BTreeMap<Identity, SwapClaim>,
    paid_out: Amount,
}

impl ExchangeSwap {
    pub fn new(
        pool_total: Amount,
        legacy_total_supply: Amount,
        snapshot_height: BlockHeight,
    ) -> Self {
        Self {
            pool_total,
            legacy_total_supply,
            snapshot_height,
            claims: BTreeMap::new(),
            paid_out: 0,
        }
    }

    pub fn pool_total(&self) -> Amount {
        self.pool_total
    }

    pub fn paid_out(&self) -> Amount {
        self.paid_out
    }

    pub fn snapshot_height(&self) -> BlockHeight {
        self.snapshot_height
    }

    pub fn claim_of(&self, holder: &Identity) -> Option<&SwapClaim> {
        self.claims.get(holder)
    }

    pub fn payout_for(&self, legacy_balance: Amount) -> SaleResult<Amount> {
        if self.legacy_total_supply == 0 {
            return Ok(0);
        }
        Ok(self
            .pool_total
            .checked_mul(legacy_balance)
            .ok_or(SaleError::NumericOverflow)?
            / self.legacy_total_supply)
    }

    /// Record the holder's claim and return the payout owed.
    pub fn claim(&mut self, holder: Identity, legacy_balance: Amount) -> SaleResult<Amount> {
        if self.claims.get(&holder).is_some_and(|claim| claim.claimed) {
            return Err(SaleError::AlreadyClaimed);
        }
        if legacy_balance == 0 || self.legacy_total_supply == 0 {
            return Err(SaleError::NothingToClaim);
        }

        let payout = self.payout_for(legacy_balance)?;
        let paid_out = self
            .paid_out
            .checked_add(payout)
            .ok_or(SaleError::NumericOverflow)?;
        if paid_out > self.pool_total {
            return Err(SaleError::PoolExhausted);
        }

        self.claims.insert(
            holder,
            SwapClaim {
                legacy_balance_snapshot: legacy_balance,
                claimed: true,
                payout,
            },
        );
        self.paid_out = paid_out;
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_pubkey::Pubkey;

    #[test]
    fn test_single_holder_takes_whole_pool() {
        let mut swap = ExchangeSwap::new(1_630, 5_000, 10);
        let holder = Pubkey::new_unique();

        assert_eq!(swap.claim(holder, 5_000).unwrap(), 1_630);
        assert_eq!(swap.paid_out(), 1_630);
        assert!(swap.claim_of(&holder).unwrap().claimed);
    }

    #[test]
    fn test_claim_twice_rejected() {
        let mut swap = ExchangeSwap::new(1_000, 100, 10);
        let holder = Pubkey::new_unique();

        swap.claim(holder, 40).unwrap();
        assert_eq!(swap.claim(holder, 40), Err(SaleError::AlreadyClaimed));
        assert_eq!(swap.paid_out(), 400);
    }

    #[test]
    fn test_zero_balance_has_nothing_to_claim() {
        let mut swap = ExchangeSwap::new(1_000, 100, 10);
        let holder = Pubkey::new_unique();

        assert_eq!(swap.claim(holder, 0), Err(SaleError::NothingToClaim));
        assert!(swap.claim_of(&holder).is_none());
    }

    #[test]
    fn test_rounding_leaves_dust_unclaimed() {
        let mut swap = ExchangeSwap::new(1_000, 3, 10);
        let total: Amount = (0..3)
            .map(|_| swap.claim(Pubkey::new_unique(), 1).unwrap())
            .sum();

        assert_eq!(total, 999);
        assert!(swap.paid_out() <= swap.pool_total());
    }

    #[test]
    fn test_payouts_never_exceed_pool() {
        let mut swap = ExchangeSwap::new(1_000, 100, 10);
        swap.claim(Pubkey::new_unique(), 100).unwrap();
        // A balance the snapshot supply cannot account for.
        assert_eq!(
            swap.claim(Pubkey::new_unique(), 1),
            Err(SaleError::PoolExhausted)
        );
        assert_eq!(swap.paid_out(), 1_000);
    }
}
