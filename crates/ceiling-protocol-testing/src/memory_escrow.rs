use std::cell::RefCell;
use std::rc::Rc;

use ceiling_protocol::{
    Amount, BlockHeight, Clock, Escrow, Identity, Journaled, Sale, SaleError, SaleResult,
};

use crate::ManualClock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EscrowBalances {
    held: Amount,
    withdrawn: Amount,
}

#[derive(Debug, Default)]
struct EscrowInner {
    current: EscrowBalances,
    savepoints: Vec<EscrowBalances>,
    reject_deposits: bool,
}

/// Holds collected value until the designated recipient withdraws it after
/// the sale.
#[derive(Debug, Clone)]
pub struct MemoryEscrow {
    inner: Rc<RefCell<EscrowInner>>,
    recipient: Identity,
    stop_height: BlockHeight,
    clock: ManualClock,
}

impl MemoryEscrow {
    pub fn new(recipient: Identity, stop_height: BlockHeight, clock: ManualClock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EscrowInner::default())),
            recipient,
            stop_height,
            clock,
        }
    }

    pub fn held(&self) -> Amount {
        self.inner.borrow().current.held
    }

    pub fn withdrawn(&self) -> Amount {
        self.inner.borrow().current.withdrawn
    }

    pub fn recipient(&self) -> Identity {
        self.recipient
    }

    /// Make every following deposit fail, to exercise rollback.
    pub fn reject_deposits(&self, reject: bool) {
        self.inner.borrow_mut().reject_deposits = reject;
    }

    /// Move everything held to the recipient. Allowed once the window has
    /// closed or the sale is finalized.
    pub fn withdraw(&self, caller: &Identity, sale: &Sale) -> SaleResult<Amount> {
        if *caller != self.recipient {
            return Err(SaleError::Unauthorized);
        }
        let window_closed = self.clock.current_height() > self.stop_height;
        if !window_closed && sale.finalized_height().is_none() {
            return Err(SaleError::NotFinalized);
        }

        let mut inner = self.inner.borrow_mut();
        let amount = inner.current.held;
        inner.current.held = 0;
        inner.current.withdrawn += amount;
        Ok(amount)
    }
}

impl Journaled for MemoryEscrow {
    fn begin(&mut self) {
        let mut inner = self.inner.borrow_mut();
        let snapshot = inner.current;
        inner.savepoints.push(snapshot);
    }

    fn commit(&mut self) {
        self.inner.borrow_mut().savepoints.pop();
    }

    fn rollback(&mut self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(snapshot) = inner.savepoints.pop() {
            inner.current = snapshot;
        }
    }
}

impl Escrow for MemoryEscrow {
    fn deposit(&mut self, amount: Amount) -> SaleResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.reject_deposits {
            return Err(SaleError::Escrow("deposits rejected".to_string()));
        }
        inner.current.held = inner
            .current
            .held
            .checked_add(amount)
            .ok_or(SaleError::NumericOverflow)?;
        Ok(())
    }
}
