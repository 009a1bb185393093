use ceiling_protocol::{Amount, ContributionReceipt, Identity, Payer, Sale, SaleError, SaleResult};

/// Payer that accepts every refund and remembers the total.
#[derive(Debug, Clone)]
pub struct WalletPayer {
    identity: Identity,
    pub refunds_received: Amount,
}

impl WalletPayer {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            refunds_received: 0,
        }
    }
}

impl Payer for WalletPayer {
    fn identity(&self) -> Identity {
        self.identity
    }

    fn receive_refund(&mut self, _sale: &mut Sale, amount: Amount) -> SaleResult<()> {
        self.refunds_received += amount;
        Ok(())
    }
}

/// Payer whose refund always bounces.
#[derive(Debug, Clone)]
pub struct FailingPayer {
    identity: Identity,
}

impl FailingPayer {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

impl Payer for FailingPayer {
    fn identity(&self) -> Identity {
        self.identity
    }

    fn receive_refund(&mut self, _sale: &mut Sale, _amount: Amount) -> SaleResult<()> {
        Err(SaleError::Refund("payer rejected the refund".to_string()))
    }
}

/// What a reentrant payer saw from inside its refund callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReentryObservation {
    pub total_collected: Amount,
    pub tokens_issued: Amount,
    pub nested: SaleResult<ContributionReceipt>,
}

/// Payer that calls `contribute` again from inside its refund.
#[derive(Debug, Clone)]
pub struct ReentrantPayer {
    wallet: WalletPayer,
    beneficiary: Identity,
    nested_amount: Amount,
    pub observations: Vec<ReentryObservation>,
}

impl ReentrantPayer {
    pub fn new(identity: Identity, beneficiary: Identity, nested_amount: Amount) -> Self {
        Self {
            wallet: WalletPayer::new(identity),
            beneficiary,
            nested_amount,
            observations: Vec::new(),
        }
    }

    pub fn refunds_received(&self) -> Amount {
        self.wallet.refunds_received
    }
}

impl Payer for ReentrantPayer {
    fn identity(&self) -> Identity {
        self.wallet.identity()
    }

    fn receive_refund(&mut self, sale: &mut Sale, amount: Amount) -> SaleResult<()> {
        self.wallet.refunds_received += amount;

        let total_collected = sale.total_collected();
        let tokens_issued = sale.tokens_issued();
        // The nested contribution refunds to the plain wallet, so this does
        // not recurse.
        let nested = sale.contribute(&mut self.wallet, &self.beneficiary, self.nested_amount);
        self.observations.push(ReentryObservation {
            total_collected,
            tokens_issued,
            nested,
        });
        Ok(())
    }
}
