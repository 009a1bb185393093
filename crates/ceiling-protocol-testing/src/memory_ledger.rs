use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ceiling_protocol::{
    Amount, Clock, Identity, Journaled, Ledger, SaleError, SaleResult, TransferPolicy,
};

use crate::ManualClock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Balances {
    accounts: BTreeMap<Identity, Amount>,
    total_supply: Amount,
    policy: TransferPolicy,
}

#[derive(Debug, Default)]
struct LedgerInner {
    current: Balances,
    /// Savepoints opened by `begin`, innermost last.
    savepoints: Vec<Balances>,
}

/// In-memory asset ledger. Clones share the same balances, so a test can
/// keep a handle after boxing one into the sale.
#[derive(Debug, Clone)]
pub struct MemoryLedger {
    inner: Rc<RefCell<LedgerInner>>,
    clock: ManualClock,
}

impl MemoryLedger {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LedgerInner::default())),
            clock,
        }
    }

    pub fn policy(&self) -> TransferPolicy {
        self.inner.borrow().current.policy.clone()
    }

    /// Every non-zero balance.
    pub fn balances(&self) -> BTreeMap<Identity, Amount> {
        self.inner
            .borrow()
            .current
            .accounts
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|(who, amount)| (*who, *amount))
            .collect()
    }

    pub fn open_savepoints(&self) -> usize {
        self.inner.borrow().savepoints.len()
    }
}

impl Journaled for MemoryLedger {
    fn begin(&mut self) {
        let mut inner = self.inner.borrow_mut();
        let snapshot = inner.current.clone();
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

impl Ledger for MemoryLedger {
    fn mint(&mut self, to: &Identity, amount: Amount) -> SaleResult<()> {
        let mut inner = self.inner.borrow_mut();
        let balances = &mut inner.current;
        balances.total_supply = balances
            .total_supply
            .checked_add(amount)
            .ok_or(SaleError::NumericOverflow)?;
        *balances.accounts.entry(*to).or_default() += amount;
        Ok(())
    }

    fn transfer(&mut self, from: &Identity, to: &Identity, amount: Amount) -> SaleResult<()> {
        let now = self.clock.now();
        let mut inner = self.inner.borrow_mut();
        let balances = &mut inner.current;
        balances.policy.check(from, now)?;

        let available = balances.accounts.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(SaleError::Ledger(format!(
                "insufficient balance: {from} holds {available}, needs {amount}"
            )));
        }
        balances.accounts.insert(*from, available - amount);
        *balances.accounts.entry(*to).or_default() += amount;
        Ok(())
    }

    fn balance_of(&self, who: &Identity) -> Amount {
        self.inner
            .borrow()
            .current
            .accounts
            .get(who)
            .copied()
            .unwrap_or(0)
    }

    fn total_supply(&self) -> Amount {
        self.inner.borrow().current.total_supply
    }

    fn set_transfer_authority(&mut self, policy: TransferPolicy) {
        self.inner.borrow_mut().current.policy = policy;
    }
}
