use {
    crate::{
        FixtureStage, FixtureState, ManualClock, MemoryEscrow, MemoryLedger, MemoryLegacyLedger,
        StaticAuthorizer, WalletPayer, GENESIS_TIME, LEGACY_HOLDER_BALANCE,
    },
    ceiling_protocol::{
        Action, Amount, BlockHeight, Collaborators, ContributionReceipt, Identity, Ledger, Payer,
        Sale, SaleResult, SupplyAllocation,
    },
};

/// A sale wired to in-memory collaborators, plus shared handles to each of
/// them so tests can move the clock and inspect balances.
pub struct TestFixture {
    pub state: FixtureState,
    pub sale: Sale,

    pub clock: ManualClock,
    pub ledger: MemoryLedger,
    pub escrow: MemoryEscrow,
    pub authorizer: StaticAuthorizer,
    pub legacy: MemoryLegacyLedger,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new(FixtureState::default())
    }
}

impl TestFixture {
    pub fn new(state: FixtureState) -> Self {
        Self::try_new(state).unwrap_or_else(|e| panic!("Failed to create sale: {e}"))
    }

    pub fn try_new(state: FixtureState) -> SaleResult<Self> {
        // Start just before the window so nothing is accepted yet.
        let clock = ManualClock::new(state.config.start_height.saturating_sub(100), GENESIS_TIME);
        let ledger = MemoryLedger::new(clock.clone());
        let escrow = MemoryEscrow::new(
            state.escrow_recipient,
            state.config.stop_height,
            clock.clone(),
        );
        let authorizer = StaticAuthorizer::new();
        authorizer.grant_all(state.multisig);

        let legacy = MemoryLegacyLedger::new();
        legacy.set_balance(state.legacy_holder, 0, LEGACY_HOLDER_BALANCE);

        let sale = Sale::new(
            state.config.clone(),
            Collaborators {
                ledger: Box::new(ledger.clone()),
                escrow: Box::new(escrow.clone()),
                clock: Box::new(clock.clone()),
                authorizer: Box::new(authorizer.clone()),
                legacy: Box::new(legacy.clone()),
            },
        )?;

        Ok(Self {
            state,
            sale,
            clock,
            ledger,
            escrow,
            authorizer,
            legacy,
        })
    }

    pub fn jump_to(&mut self, target_stage: FixtureStage) {
        // step all stages:
        // - greater than the initial stage
        // - greater than current stage
        // - less than or equal to target stage
        let current_stage = self.state.stage;
        let stages_to_step = FixtureStage::all()
            .iter()
            .copied()
            .filter(|s| *s > FixtureStage::SaleCreated && *s > current_stage && *s <= target_stage)
            .collect::<Vec<_>>();

        for stage in stages_to_step {
            self.step_to(stage);
        }
    }

    pub fn step_to(&mut self, stage: FixtureStage) {
        let (buyer, second_buyer) = (self.state.buyer, self.state.second_buyer);
        match stage {
            FixtureStage::SaleCreated => return,
            FixtureStage::ScheduleCommitted => self.try_commit_schedule(),
            FixtureStage::SaleOpened => {
                self.clock.set_height(self.state.config.start_height);
                self.try_reveal(0)
            }
            FixtureStage::FirstCapFilled => self
                .try_contribute(&buyer, 1)
                .and_then(|_| self.try_contribute(&buyer, 5))
                .map(|_| ()),
            FixtureStage::SecondPointFunded => self.try_reveal(1).and_then(|_| {
                self.clock.set_height(self.point_height(1));
                self.try_contribute(&buyer, 5).map(|_| ())
            }),
            FixtureStage::CeilingFilled => self.try_reveal(2).and_then(|_| {
                self.clock.set_height(self.point_height(2));
                let mut payer = WalletPayer::new(buyer);
                self.try_contribute_with(&mut payer, &second_buyer, 15)
                    .map(|_| ())
            }),
            FixtureStage::Finalized => self.try_finalize().map(|_| ()),
        }
        .unwrap_or_else(|e| panic!("Failed to advance to {:?}: {:?}", stage, e));

        println!("✅ Fixture advanced to {:?}", stage);
        self.state.stage = stage;
    }

    fn point_height(&self, index: usize) -> BlockHeight {
        self.state.plan.reveals[index].height
    }

    pub fn try_commit_schedule(&mut self) -> SaleResult<()> {
        let commitments = self
            .state
            .plan
            .commitment_bytes()
            .expect("fixture plan has valid hex");
        self.sale.commit(&self.state.multisig, commitments)
    }

    pub fn try_reveal(&mut self, index: usize) -> SaleResult<()> {
        let step = &self.state.plan.reveals[index];
        let salt = step.salt_bytes().expect("fixture plan has valid hex");
        self.sale.reveal(step.height, step.cap, step.is_final, salt)
    }

    /// Contribute from `beneficiary`'s own wallet.
    pub fn try_contribute(
        &mut self,
        beneficiary: &Identity,
        amount: Amount,
    ) -> SaleResult<ContributionReceipt> {
        let mut payer = WalletPayer::new(*beneficiary);
        self.try_contribute_with(&mut payer, beneficiary, amount)
    }

    pub fn try_contribute_with(
        &mut self,
        payer: &mut dyn Payer,
        beneficiary: &Identity,
        amount: Amount,
    ) -> SaleResult<ContributionReceipt> {
        self.sale.contribute(payer, beneficiary, amount)
    }

    pub fn try_finalize(&mut self) -> SaleResult<SupplyAllocation> {
        self.sale.finalize(&self.state.multisig)
    }

    pub fn try_release(&mut self) -> SaleResult<Amount> {
        self.sale.release(&self.state.multisig)
    }

    pub fn try_claim(&mut self, holder: &Identity) -> SaleResult<Amount> {
        self.sale.claim(holder)
    }

    pub fn try_change_controller(&mut self, new_controller: &Identity) -> SaleResult<()> {
        self.sale
            .change_controller(&self.state.multisig, new_controller)
    }

    pub fn try_pause(&mut self) -> SaleResult<()> {
        self.sale.pause_contributions(&self.state.multisig)
    }

    pub fn try_resume(&mut self) -> SaleResult<()> {
        self.sale.resume_contributions(&self.state.multisig)
    }

    /// Holder-to-holder transfer, subject to whatever policy the sale installed.
    pub fn try_transfer(
        &mut self,
        from: &Identity,
        to: &Identity,
        amount: Amount,
    ) -> SaleResult<()> {
        self.ledger.transfer(from, to, amount)
    }

    pub fn try_withdraw_escrow(&self, caller: &Identity) -> SaleResult<Amount> {
        self.escrow.withdraw(caller, &self.sale)
    }

    pub fn balance_of(&self, who: &Identity) -> Amount {
        self.ledger.balance_of(who)
    }

    pub fn advance_blocks(&self, blocks: BlockHeight) {
        self.clock.advance_blocks(blocks);
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance_days(days);
    }

    pub fn grant(&self, who: Identity, action: Action) {
        self.authorizer.grant(who, action);
    }
}
