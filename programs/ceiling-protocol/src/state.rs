use solana_pubkey::Pubkey;

use crate::constants::{
    BPS_DENOMINATOR, DEFAULT_CONTRIBUTOR_BPS, DEFAULT_EXCHANGE_BPS, DEFAULT_SECONDARY_BPS,
    DEFAULT_VESTING_BPS, TRANSFER_LOCK_SECONDS, VESTING_STEP_SECONDS,
};
use crate::error::{SaleError, SaleResult};

/// Smallest indivisible unit of value or of the minted asset.
pub type Amount = u128;

pub type BlockHeight = u64;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// Participant, pool or controller identity.
pub type Identity = Pubkey;

pub type Commitment = [u8; 32];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignStatus {
    /// Accepting contributions inside the sale window
    #[default]
    Open,
    /// Temporarily not accepting contributions (resumable)
    Paused,
    /// Terminal. Contributions are permanently closed.
    Finalized,
}

/// Pool shares of the final total supply, in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolShares {
    pub contributors_bps: u16,
    pub exchange_bps: u16,
    pub vesting_bps: u16,
    pub secondary_bps: u16,
}

impl Default for PoolShares {
    fn default() -> Self {
        Self {
            contributors_bps: DEFAULT_CONTRIBUTOR_BPS,
            exchange_bps: DEFAULT_EXCHANGE_BPS,
            vesting_bps: DEFAULT_VESTING_BPS,
            secondary_bps: DEFAULT_SECONDARY_BPS,
        }
    }
}

impl PoolShares {
    pub fn total_bps(&self) -> u32 {
        self.contributors_bps as u32
            + self.exchange_bps as u32
            + self.vesting_bps as u32
            + self.secondary_bps as u32
    }

    pub fn validate(&self) -> SaleResult<()> {
        if self.total_bps() != BPS_DENOMINATOR as u32 {
            return Err(SaleError::InvalidConfig(format!(
                "pool shares sum to {} bps, expected {}",
                self.total_bps(),
                BPS_DENOMINATOR
            )));
        }
        if self.contributors_bps == 0 {
            return Err(SaleError::InvalidConfig(
                "contributor share must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Identities that receive the pools minted at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAccounts {
    /// Holds the exchange pool and pays out swap claims.
    pub exchange_pool: Identity,
    /// Holds the vesting pool until it is released.
    pub vesting_vault: Identity,
    /// Receives released vesting tokens.
    pub vesting_recipient: Identity,
    pub secondary_pool: Identity,
}

/// Immutable campaign parameters, fixed when the sale is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleConfig {
    /// First height at which contributions are accepted (inclusive).
    pub start_height: BlockHeight,
    /// Last height at which contributions are accepted (inclusive).
    pub stop_height: BlockHeight,
    /// Units minted per accepted unit of value.
    pub rate: Amount,
    pub shares: PoolShares,
    pub pools: PoolAccounts,
    /// Governance identity installed as controller at finalization.
    pub controller: Identity,
    /// Delay between finalization and the end of the holder transfer lock.
    pub transfer_lock_seconds: Timestamp,
    /// Length of one vesting step.
    pub vesting_step_seconds: Timestamp,
}

impl SaleConfig {
    pub fn new(
        start_height: BlockHeight,
        stop_height: BlockHeight,
        rate: Amount,
        pools: PoolAccounts,
        controller: Identity,
    ) -> Self {
        Self {
            start_height,
            stop_height,
            rate,
            shares: PoolShares::default(),
            pools,
            controller,
            transfer_lock_seconds: TRANSFER_LOCK_SECONDS,
            vesting_step_seconds: VESTING_STEP_SECONDS,
        }
    }

    pub fn validate(&self) -> SaleResult<()> {
        if self.stop_height < self.start_height {
            return Err(SaleError::InvalidConfig(format!(
                "stop height {} precedes start height {}",
                self.stop_height, self.start_height
            )));
        }
        if self.rate == 0 {
            return Err(SaleError::InvalidConfig("rate must be non-zero".to_string()));
        }
        if self.transfer_lock_seconds < 0 || self.vesting_step_seconds <= 0 {
            return Err(SaleError::InvalidConfig(
                "lock and vesting durations must be positive".to_string(),
            ));
        }
        self.shares.validate()
    }
}

/// Mutable campaign accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignState {
    pub status: CampaignStatus,

    /// Value accepted so far. Never exceeds the ceiling at the current height.
    pub total_collected: Amount,

    /// Units minted to contributors so far.
    pub tokens_issued: Amount,

    /// Height at which `finalize` succeeded.
    pub finalized_height: Option<BlockHeight>,

    /// Time at which `finalize` succeeded.
    pub finalized_time: Option<Timestamp>,
}

impl CampaignState {
    pub fn is_finalized(&self) -> bool {
        self.status == CampaignStatus::Finalized
    }
}

/// Final supply split fixed at finalization. The four pools sum to
/// `total_supply` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyAllocation {
    pub total_supply: Amount,
    pub contributors: Amount,
    pub exchange: Amount,
    pub vesting: Amount,
    pub secondary: Amount,
}

impl SupplyAllocation {
    pub fn sum(&self) -> Amount {
        self.contributors + self.exchange + self.vesting + self.secondary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VestingRecord {
    pub allocation: Amount,
    /// Non-decreasing and never above `allocation`.
    pub released: Amount,
    pub vesting_start: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapClaim {
    pub legacy_balance_snapshot: Amount,
    pub claimed: bool,
    pub payout: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub unlock_time: Timestamp,
    pub current_controller: Identity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pools() -> PoolAccounts {
        PoolAccounts {
            exchange_pool: Pubkey::new_unique(),
            vesting_vault: Pubkey::new_unique(),
            vesting_recipient: Pubkey::new_unique(),
            secondary_pool: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_default_shares_sum_to_whole() {
        let shares = PoolShares::default();
        assert_eq!(shares.total_bps(), 10_000);
        assert!(shares.validate().is_ok());
    }

    #[test]
    fn test_shares_not_summing_to_whole_rejected() {
        let shares = PoolShares {
            contributors_bps: 4_600,
            exchange_bps: 500,
            vesting_bps: 2_000,
            secondary_bps: 2_800,
        };
        assert!(matches!(shares.validate(), Err(SaleError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_validation() {
        let config = SaleConfig::new(1_000_000, 1_003_000, 1_000, pools(), Pubkey::new_unique());
        assert!(config.validate().is_ok());

        let mut inverted = config.clone();
        inverted.stop_height = 999_999;
        assert!(matches!(inverted.validate(), Err(SaleError::InvalidConfig(_))));

        let mut zero_rate = config.clone();
        zero_rate.rate = 0;
        assert!(matches!(zero_rate.validate(), Err(SaleError::InvalidConfig(_))));

        let mut no_vesting = config;
        no_vesting.vesting_step_seconds = 0;
        assert!(matches!(no_vesting.validate(), Err(SaleError::InvalidConfig(_))));
    }
}
