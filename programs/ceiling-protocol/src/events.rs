use crate::state::{Amount, BlockHeight, Identity, SupplyAllocation, Timestamp};

/// Record of a successful state transition, appended to the sale's event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleEvent {
    ScheduleCommitted {
        points: usize,
    },
    PointRevealed {
        index: usize,
        height: BlockHeight,
        cap: Amount,
        is_final: bool,
    },
    Contributed {
        payer: Identity,
        beneficiary: Identity,
        accepted: Amount,
        refunded: Amount,
        units: Amount,
        height: BlockHeight,
    },
    ContributionsPaused {
        by: Identity,
        height: BlockHeight,
    },
    ContributionsResumed {
        by: Identity,
        height: BlockHeight,
    },
    Finalized {
        height: BlockHeight,
        time: Timestamp,
        allocation: SupplyAllocation,
    },
    VestingReleased {
        recipient: Identity,
        amount: Amount,
        total_released: Amount,
    },
    SwapClaimed {
        holder: Identity,
        legacy_balance: Amount,
        payout: Amount,
    },
    ControllerChanged {
        previous: Identity,
        new: Identity,
    },
}
