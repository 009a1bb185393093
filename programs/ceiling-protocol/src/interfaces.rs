//! Collaborators the sale consumes but does not implement.
//!
//! The host supplies the asset ledger, the escrow holding collected value,
//! the clock, the authorization predicate and the legacy-balance snapshot.
//! Ledger and escrow are journaled so a rejected operation can undo whatever
//! it already did to them.

use crate::error::SaleResult;
use crate::gate::TransferPolicy;
use crate::sale::Sale;
use crate::state::{Amount, BlockHeight, Identity, Timestamp};

/// Nested savepoints. Each `begin` is matched by exactly one `commit` or
/// `rollback`.
pub trait Journaled {
    fn begin(&mut self);
    /// Keep everything done since the matching `begin`.
    fn commit(&mut self);
    /// Undo everything done since the matching `begin`.
    fn rollback(&mut self);
}

pub trait Ledger: Journaled {
    fn mint(&mut self, to: &Identity, amount: Amount) -> SaleResult<()>;

    /// Holder transfer, subject to the installed `TransferPolicy`.
    fn transfer(&mut self, from: &Identity, to: &Identity, amount: Amount) -> SaleResult<()>;

    fn balance_of(&self, who: &Identity) -> Amount;

    fn total_supply(&self) -> Amount;

    fn set_transfer_authority(&mut self, policy: TransferPolicy);
}

/// Holds collected value until the campaign's recipient withdraws it.
pub trait Escrow: Journaled {
    fn deposit(&mut self, amount: Amount) -> SaleResult<()>;
}

pub trait Clock {
    fn current_height(&self) -> BlockHeight;
    fn now(&self) -> Timestamp;
}

/// Privileged actions gated by the governance/multisig collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    CommitSchedule,
    PauseContributions,
    Finalize,
    ReleaseVesting,
    ChangeController,
}

pub trait Authorizer {
    fn is_authorized(&self, caller: &Identity, action: Action) -> bool;
}

/// Historical balances of the asset being swapped out.
pub trait LegacyLedger {
    fn balance_of_at(&self, holder: &Identity, height: BlockHeight) -> Amount;
    fn total_supply_at(&self, height: BlockHeight) -> Amount;
}

/// Whoever sent the value of a contribution.
pub trait Payer {
    fn identity(&self) -> Identity;

    /// Receive the part of a contribution that did not fit under the ceiling.
    ///
    /// Called after all campaign accounting for the contribution is done; the
    /// payer may call back into `sale`.
    fn receive_refund(&mut self, sale: &mut Sale, amount: Amount) -> SaleResult<()>;
}

/// Everything a `Sale` needs from its host.
pub struct Collaborators {
    pub ledger: Box<dyn Ledger>,
    pub escrow: Box<dyn Escrow>,
    pub clock: Box<dyn Clock>,
    pub authorizer: Box<dyn Authorizer>,
    pub legacy: Box<dyn LegacyLedger>,
}
