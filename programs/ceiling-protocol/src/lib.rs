//! Control logic for a capped, time-boxed token sale whose ceiling rises
//! along a committed, incrementally revealed schedule.
//!
//! [`Sale`] owns the campaign state and exposes every operation. Ledger,
//! escrow, clock, authorization and legacy balances are supplied by the host
//! through the traits in [`interfaces`].

pub mod allocation;
pub mod ceiling_point;
pub mod constants;
pub mod error;
pub mod events;
pub mod exchange;
pub mod gate;
pub(crate) mod instructions;
pub mod interfaces;
pub mod sale;
pub mod schedule;
pub mod state;
pub mod vesting;

pub use allocation::split_supply;
pub use ceiling_point::{CeilingPoint, CeilingPointPreimage};
pub use constants::{
    BPS_DENOMINATOR, CEILING_POINT_PREFIX, MAX_CEILING_POINTS, SECONDS_PER_DAY,
    TRANSFER_LOCK_SECONDS, VESTING_STEP_SECONDS,
};
pub use error::{SaleError, SaleResult};
pub use events::SaleEvent;
pub use exchange::ExchangeSwap;
pub use gate::{ControllerGate, TransferPolicy};
pub use instructions::ContributionReceipt;
pub use interfaces::*;
pub use sale::Sale;
pub use schedule::CeilingSchedule;
pub use state::*;
pub use vesting::{VestingStage, VestingVault};
