use crate::state::Timestamp;

/// Domain-separation prefix for ceiling point commitments. 0x00 and 0x01 are
/// taken by merkle leaf and node hashing.
pub const CEILING_POINT_PREFIX: u8 = 0x02;

/// Basis points denominator (100% == 10_000 bps).
pub const BPS_DENOMINATOR: u16 = 10_000;

pub const SECONDS_PER_DAY: Timestamp = 86_400;

/// Holder transfers stay locked this long after finalization.
pub const TRANSFER_LOCK_SECONDS: Timestamp = 14 * SECONDS_PER_DAY;

/// Length of one vesting step. Half the vesting pool unlocks after one step,
/// the rest after two.
pub const VESTING_STEP_SECONDS: Timestamp = 360 * SECONDS_PER_DAY;

/// Default pool shares of the final supply.
pub const DEFAULT_CONTRIBUTOR_BPS: u16 = 4_600;
pub const DEFAULT_EXCHANGE_BPS: u16 = 500;
pub const DEFAULT_VESTING_BPS: u16 = 2_000;
pub const DEFAULT_SECONDARY_BPS: u16 = 2_900;

/// Maximum number of commitments accepted by a single `commit`.
pub const MAX_CEILING_POINTS: usize = 64;
