use crate::error::{SaleError, SaleResult};
use crate::state::{Amount, Identity, Timestamp, VestingRecord};

/// Where a vesting vault sits on its two-step schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VestingStage {
    /// Less than one step since vesting started
    Locked,
    /// At least one step, less than two
    HalfVested,
    /// Two steps or more
    FullyVested,
}

/// Holds the vesting pool and releases it to a single recipient in two steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestingVault {
    record: VestingRecord,
    step_seconds: Timestamp,
    /// Identity holding the pool on the ledger.
    vault: Identity,
    recipient: Identity,
}

impl VestingVault {
    pub fn new(
        allocation: Amount,
        vesting_start: Timestamp,
        step_seconds: Timestamp,
        vault: Identity,
        recipient: Identity,
    ) -> Self {
        Self {
            record: VestingRecord {
                allocation,
                released: 0,
                vesting_start,
            },
            step_seconds,
            vault,
            recipient,
        }
    }

    pub fn record(&self) -> &VestingRecord {
        &self.record
    }

    pub fn vault(&self) -> Identity {
        self.vault
    }

    pub fn recipient(&self) -> Identity {
        self.recipient
    }

    pub fn stage(&self, now: Timestamp) -> VestingStage {
        let elapsed = now.saturating_sub(self.record.vesting_start);
        if elapsed < self.step_seconds {
            VestingStage::Locked
        } else if elapsed < self.step_seconds.saturating_mul(2) {
            VestingStage::HalfVested
        } else {
            VestingStage::FullyVested
        }
    }

    /// Total amount vested at `now`, released or not.
    pub fn vested_at(&self, now: Timestamp) -> Amount {
        match self.stage(now) {
            VestingStage::Locked => 0,
            VestingStage::HalfVested => self.record.allocation / 2,
            VestingStage::FullyVested => self.record.allocation,
        }
    }

    pub fn releasable(&self, now: Timestamp) -> Amount {
        self.vested_at(now).saturating_sub(self.record.released)
    }

    /// Mark everything vested at `now` as released and return the newly
    /// releasable amount. Returns 0 while locked.
    pub fn release(&mut self, now: Timestamp) -> SaleResult<Amount> {
        let vested = self.vested_at(now);
        let amount = vested
            .checked_sub(self.record.released)
            .ok_or(SaleError::NumericOverflow)?;
        if amount > 0 {
            self.record.released = vested;
        }
        Ok(amount)
    }
}
