use std::collections::BTreeMap;

use ceiling_protocol::{Amount, CampaignStatus, Identity, Ledger};

use crate::TestFixture;

/// Observable campaign state for before/after comparisons.
///
/// **Use cases:**
/// - Verify a rejected operation changed nothing at all
/// - Verify an accepted operation only moved the expected balances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSnapshot {
    pub status: CampaignStatus,
    pub total_collected: Amount,
    pub tokens_issued: Amount,
    pub points_revealed: usize,
    pub ledger_total_supply: Amount,
    pub escrow_held: Amount,
    pub vesting_released: Option<Amount>,
    pub controller: Option<Identity>,
    pub event_count: usize,
    /// Every non-zero ledger balance
    pub balances: BTreeMap<Identity, Amount>,
}

impl CampaignSnapshot {
    pub fn capture_all(test: &TestFixture) -> Self {
        let sale = &test.sale;
        Self {
            status: sale.status(),
            total_collected: sale.total_collected(),
            tokens_issued: sale.tokens_issued(),
            points_revealed: sale.schedule().points_revealed(),
            ledger_total_supply: test.ledger.total_supply(),
            escrow_held: test.escrow.held(),
            vesting_released: sale.vesting_record().map(|record| record.released),
            controller: sale.controller(),
            event_count: sale.events().len(),
            balances: test.ledger.balances(),
        }
    }

    pub fn balance_of(&self, who: &Identity) -> Amount {
        self.balances.get(who).copied().unwrap_or(0)
    }

    /// Assert each listed change happened and no other balance moved.
    pub fn assert_only_changed(&self, other: &Self, expected_changes: &[AccountChange]) {
        let mut touched = Vec::new();
        for change in expected_changes {
            match change {
                AccountChange::Balance { who, delta } => {
                    let actual = other.balance_of(who) as i128 - self.balance_of(who) as i128;
                    assert_eq!(actual, *delta, "Balance delta mismatch for {who}");
                    touched.push(*who);
                }
                AccountChange::Escrow { delta } => {
                    let actual = other.escrow_held as i128 - self.escrow_held as i128;
                    assert_eq!(actual, *delta, "Escrow delta mismatch");
                }
                AccountChange::Collected { delta } => {
                    let actual = other.total_collected as i128 - self.total_collected as i128;
                    assert_eq!(actual, *delta, "Total collected delta mismatch");
                }
            }
        }

        let untouched = |balances: &BTreeMap<Identity, Amount>| -> BTreeMap<Identity, Amount> {
            balances
                .iter()
                .filter(|(who, _)| !touched.contains(who))
                .map(|(who, amount)| (*who, *amount))
                .collect()
        };
        assert_eq!(
            untouched(&self.balances),
            untouched(&other.balances),
            "Unexpected balance changes"
        );
    }
}

/// Expected changes for surgical verification
#[derive(Debug, Clone)]
pub enum AccountChange {
    Balance { who: Identity, delta: i128 },
    Escrow { delta: i128 },
    Collected { delta: i128 },
}
