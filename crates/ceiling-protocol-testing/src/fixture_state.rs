use ceiling_protocol::{Amount, BlockHeight, Identity, PoolAccounts, SaleConfig, Timestamp};
use ceiling_protocol_sdk::{HiddenSchedule, PlannedPoint, RevealPlan};
use rand::{rngs::StdRng, SeedableRng};

use crate::{deterministic_identity, FixtureStage};

pub const START_HEIGHT: BlockHeight = 1_000_000;
pub const STOP_HEIGHT: BlockHeight = 1_003_000;
pub const RATE: Amount = 1_000;
pub const GENESIS_TIME: Timestamp = 1_700_000_000;

/// (height, cap) ladder of the reference campaign.
pub const CEILING_POINTS: [(BlockHeight, Amount); 3] =
    [(1_000_000, 3), (1_001_000, 13), (1_002_000, 15)];

/// Legacy balance of the single legacy holder.
pub const LEGACY_HOLDER_BALANCE: Amount = 5_000;

/// Parameters and cast of the reference campaign.
#[derive(Debug, Clone)]
pub struct FixtureState {
    pub stage: FixtureStage,
    pub config: SaleConfig,
    pub plan: RevealPlan,

    /// Holds every privileged grant
    pub multisig: Identity,
    /// Withdraws the escrow after the sale
    pub escrow_recipient: Identity,
    pub buyer: Identity,
    pub second_buyer: Identity,
    pub legacy_holder: Identity,
}

impl Default for FixtureState {
    fn default() -> Self {
        Self::with_seed(42)
    }
}

impl FixtureState {
    /// Same identities every time; `seed` only changes the schedule salts.
    pub fn with_seed(seed: u64) -> Self {
        let pools = PoolAccounts {
            exchange_pool: deterministic_identity("exchange_pool"),
            vesting_vault: deterministic_identity("vesting_vault"),
            vesting_recipient: deterministic_identity("dev_multisig"),
            secondary_pool: deterministic_identity("secondary_sale_multisig"),
        };
        let multisig = deterministic_identity("community_multisig");
        let config = SaleConfig::new(START_HEIGHT, STOP_HEIGHT, RATE, pools, multisig);

        let points = CEILING_POINTS
            .iter()
            .map(|&(height, cap)| PlannedPoint { height, cap })
            .collect();
        let plan = HiddenSchedule::new(points)
            .build(&mut StdRng::seed_from_u64(seed))
            .expect("reference ladder is valid");

        Self {
            stage: FixtureStage::SaleCreated,
            config,
            plan,
            multisig,
            escrow_recipient: deterministic_identity("contribution_multisig"),
            buyer: deterministic_identity("buyer"),
            second_buyer: deterministic_identity("second_buyer"),
            legacy_holder: deterministic_identity("legacy_holder"),
        }
    }

    pub fn with_config(mut self, config: SaleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_plan(mut self, plan: RevealPlan) -> Self {
        self.plan = plan;
        self
    }
}
