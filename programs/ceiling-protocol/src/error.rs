use thiserror::Error;

pub type SaleResult<T> = Result<T, SaleError>;

/// Every way a sale operation can be rejected.
///
/// A rejected operation never leaves partial state behind: the caller sees
/// exactly one of these and the campaign, ledger and escrow are as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    // schedule
    #[error("The ceiling schedule has already been committed.")]
    AlreadyCommitted,
    #[error("No ceiling schedule has been committed yet.")]
    NotCommitted,
    #[error("The revealed point does not match the next commitment.")]
    CommitmentMismatch,
    #[error("A ceiling point can only be revealed after the previous one.")]
    OutOfOrder,
    #[error("Ceiling points must have strictly increasing heights and non-decreasing caps.")]
    NonMonotonic,
    #[error("The final ceiling point has been revealed; no further reveals are accepted.")]
    ScheduleExhausted,
    #[error("The schedule must be committed before height {start} (now at {height}).")]
    SaleStarted { height: u64, start: u64 },

    // contributions
    #[error("Contribution at height {height} is outside the sale window [{start}, {stop}].")]
    OutsideWindow { height: u64, start: u64, stop: u64 },
    #[error("The campaign is closed for contributions.")]
    CampaignClosed,
    #[error("The current ceiling has been reached.")]
    CeilingReached,
    #[error("Contribution amount must be greater than zero.")]
    ZeroAmount,
    #[error("Contributions are paused.")]
    ContributionsPaused,
    #[error("Contributions are not paused.")]
    NotPaused,

    // finalization
    #[error("The campaign cannot be finalized yet.")]
    NotReady,
    #[error("The campaign has already been finalized.")]
    AlreadyFinalized,
    #[error("The campaign has not been finalized.")]
    NotFinalized,

    // gate
    #[error("Transfers are locked (unlock time: {unlock_time:?}).")]
    TransferLocked { unlock_time: Option<i64> },

    // swap
    #[error("This holder has already claimed.")]
    AlreadyClaimed,
    #[error("This holder has nothing to claim.")]
    NothingToClaim,
    #[error("The exchange pool cannot cover this claim.")]
    PoolExhausted,

    #[error("Unauthorized caller for this action.")]
    Unauthorized,
    #[error("A calculation resulted in a numeric overflow.")]
    NumericOverflow,
    #[error("Invalid sale configuration: {0}")]
    InvalidConfig(String),

    // collaborators
    #[error("Ledger operation failed: {0}")]
    Ledger(String),
    #[error("Escrow operation failed: {0}")]
    Escrow(String),
    #[error("Refund to payer failed: {0}")]
    Refund(String),
}
