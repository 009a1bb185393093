use tracing::debug;

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::exchange::ExchangeSwap;
use crate::gate::{ControllerGate, TransferPolicy};
use crate::instructions;
use crate::interfaces::{
    Action, Authorizer, Clock, Collaborators, Escrow, LegacyLedger, Ledger, Payer,
};
use crate::schedule::CeilingSchedule;
use crate::state::{
    Amount, BlockHeight, CampaignState, CampaignStatus, Commitment, Identity, SaleConfig,
    SupplyAllocation, SwapClaim, Timestamp, VestingRecord,
};
use crate::vesting::VestingVault;

/// Everything that is rolled back when an operation is rejected.
#[derive(Debug, Clone, Default)]
pub(crate) struct SaleCore {
    pub campaign: CampaignState,
    pub schedule: CeilingSchedule,
    pub allocation: Option<SupplyAllocation>,
    pub vault: Option<VestingVault>,
    pub swap: Option<ExchangeSwap>,
    pub gate: Option<ControllerGate>,
    pub events: Vec<SaleEvent>,
}

/// A single dynamic-ceiling campaign and its collaborators.
///
/// Lifecycle: `Open` (optionally `Paused`) until `finalize`, then `Finalized`
/// forever. Vesting, swap and controller operations only exist afterwards.
pub struct Sale {
    pub(crate) config: SaleConfig,
    pub(crate) core: SaleCore,
    pub(crate) ledger: Box<dyn Ledger>,
    pub(crate) escrow: Box<dyn Escrow>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) authorizer: Box<dyn Authorizer>,
    pub(crate) legacy: Box<dyn LegacyLedger>,
}

impl Sale {
    pub fn new(config: SaleConfig, collaborators: Collaborators) -> SaleResult<Self> {
        config.validate()?;

        let Collaborators {
            mut ledger,
            escrow,
            clock,
            authorizer,
            legacy,
        } = collaborators;
        ledger.set_transfer_authority(TransferPolicy::SaleInProgress);

        Ok(Self {
            config,
            core: SaleCore::default(),
            ledger,
            escrow,
            clock,
            authorizer,
            legacy,
        })
    }

    // schedule

    pub fn commit(&mut self, caller: &Identity, commitments: Vec<Commitment>) -> SaleResult<()> {
        self.atomically(|sale| instructions::handle_commit_schedule(sale, caller, commitments))
    }

    pub fn reveal(
        &mut self,
        height: BlockHeight,
        cap: Amount,
        is_final: bool,
        salt: [u8; 32],
    ) -> SaleResult<()> {
        self.atomically(|sale| instructions::handle_reveal_point(sale, height, cap, is_final, salt))
    }

    pub fn ceiling_at(&self, height: BlockHeight) -> Amount {
        self.core.schedule.ceiling_at(height)
    }

    pub fn current_ceiling(&self) -> Amount {
        self.ceiling_at(self.clock.current_height())
    }

    // contributions

    pub fn contribute(
        &mut self,
        payer: &mut dyn Payer,
        beneficiary: &Identity,
        amount: Amount,
    ) -> SaleResult<instructions::ContributionReceipt> {
        self.atomically(|sale| instructions::handle_contribute(sale, payer, beneficiary, amount))
    }

    pub fn pause_contributions(&mut self, caller: &Identity) -> SaleResult<()> {
        self.atomically(|sale| instructions::handle_set_contributions_paused(sale, caller, true))
    }

    pub fn resume_contributions(&mut self, caller: &Identity) -> SaleResult<()> {
        self.atomically(|sale| instructions::handle_set_contributions_paused(sale, caller, false))
    }

    // post-sale

    pub fn finalize(&mut self, caller: &Identity) -> SaleResult<SupplyAllocation> {
        self.atomically(|sale| instructions::handle_finalize(sale, caller))
    }

    pub fn release(&mut self, caller: &Identity) -> SaleResult<Amount> {
        self.atomically(|sale| instructions::handle_release_vested(sale, caller))
    }

    pub fn claim(&mut self, holder: &Identity) -> SaleResult<Amount> {
        self.atomically(|sale| instructions::handle_claim_exchange(sale, holder))
    }

    pub fn change_controller(
        &mut self,
        caller: &Identity,
        new_controller: &Identity,
    ) -> SaleResult<()> {
        self.atomically(|sale| {
            instructions::handle_change_controller(sale, caller, new_controller)
        })
    }

    // queries

    pub fn config(&self) -> &SaleConfig {
        &self.config
    }

    pub fn status(&self) -> CampaignStatus {
        self.core.campaign.status
    }

    pub fn campaign(&self) -> &CampaignState {
        &self.core.campaign
    }

    pub fn schedule(&self) -> &CeilingSchedule {
        &self.core.schedule
    }

    pub fn total_collected(&self) -> Amount {
        self.core.campaign.total_collected
    }

    pub fn tokens_issued(&self) -> Amount {
        self.core.campaign.tokens_issued
    }

    pub fn finalized_height(&self) -> Option<BlockHeight> {
        self.core.campaign.finalized_height
    }

    pub fn finalized_time(&self) -> Option<Timestamp> {
        self.core.campaign.finalized_time
    }

    pub fn allocation(&self) -> Option<&SupplyAllocation> {
        self.core.allocation.as_ref()
    }

    pub fn vesting_record(&self) -> Option<&VestingRecord> {
        self.core.vault.as_ref().map(|vault| vault.record())
    }

    pub fn vested_amount(&self, now: Timestamp) -> Amount {
        self.core.vault.as_ref().map_or(0, |vault| vault.vested_at(now))
    }

    pub fn swap_claim(&self, holder: &Identity) -> Option<&SwapClaim> {
        self.core.swap.as_ref().and_then(|swap| swap.claim_of(holder))
    }

    /// Payout `holder` would receive from the exchange pool right now.
    pub fn claimable(&self, holder: &Identity) -> SaleResult<Amount> {
        let swap = self.core.swap.as_ref().ok_or(SaleError::NotFinalized)?;
        if swap.claim_of(holder).is_some_and(|claim| claim.claimed) {
            return Ok(0);
        }
        let balance = self.legacy.balance_of_at(holder, swap.snapshot_height());
        swap.payout_for(balance)
    }

    pub fn controller(&self) -> Option<Identity> {
        self.core.gate.as_ref().map(|gate| gate.controller())
    }

    pub fn controller_gate(&self) -> Option<&ControllerGate> {
        self.core.gate.as_ref()
    }

    pub fn events(&self) -> &[SaleEvent] {
        &self.core.events
    }

    /// Whether `finalize` would pass its readiness check at the current height.
    pub fn is_ready_to_finalize(&self) -> bool {
        !self.core.campaign.is_finalized() && instructions::is_ready_to_finalize(self)
    }

    pub fn current_height(&self) -> BlockHeight {
        self.clock.current_height()
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // internals

    pub(crate) fn require_authorized(&self, caller: &Identity, action: Action) -> SaleResult<()> {
        if self.authorizer.is_authorized(caller, action) {
            Ok(())
        } else {
            Err(SaleError::Unauthorized)
        }
    }

    pub(crate) fn emit(&mut self, event: SaleEvent) {
        debug!(?event, "sale event");
        self.core.events.push(event);
    }

    /// Run `op` so that it either fully applies or leaves the campaign, ledger
    /// and escrow exactly as they were.
    pub(crate) fn atomically<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> SaleResult<T>,
    ) -> SaleResult<T> {
        let checkpoint = self.core.clone();
        self.ledger.begin();
        self.escrow.begin();

        match op(self) {
            Ok(value) => {
                self.ledger.commit();
                self.escrow.commit();
                Ok(value)
            }
            Err(err) => {
                debug!(%err, "operation rejected, rolling back");
                self.core = checkpoint;
                self.ledger.rollback();
                self.escrow.rollback();
                Err(err)
            }
        }
    }
}
