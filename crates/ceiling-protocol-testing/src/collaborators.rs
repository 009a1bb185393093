use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use ceiling_protocol::{
    Action, Amount, Authorizer, BlockHeight, Clock, Identity, LegacyLedger, SECONDS_PER_DAY,
    Timestamp,
};

/// Height and time the test moves by hand. Clones share the same reading.
#[derive(Debug, Clone)]
pub struct ManualClock {
    height: Rc<Cell<BlockHeight>>,
    time: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(height: BlockHeight, time: Timestamp) -> Self {
        Self {
            height: Rc::new(Cell::new(height)),
            time: Rc::new(Cell::new(time)),
        }
    }

    pub fn set_height(&self, height: BlockHeight) {
        self.height.set(height);
    }

    pub fn advance_blocks(&self, blocks: BlockHeight) {
        self.height.set(self.height.get() + blocks);
    }

    pub fn set_time(&self, time: Timestamp) {
        self.time.set(time);
    }

    pub fn advance_seconds(&self, seconds: Timestamp) {
        self.time.set(self.time.get() + seconds);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance_seconds(days * SECONDS_PER_DAY);
    }
}

impl Clock for ManualClock {
    fn current_height(&self) -> BlockHeight {
        self.height.get()
    }

    fn now(&self) -> Timestamp {
        self.time.get()
    }
}

/// Grants per action, editable from the test while the sale holds a clone.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthorizer {
    grants: Rc<RefCell<BTreeMap<Action, BTreeSet<Identity>>>>,
}

impl StaticAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&self, who: Identity, action: Action) {
        self.grants.borrow_mut().entry(action).or_default().insert(who);
    }

    pub fn grant_all(&self, who: Identity) {
        for action in [
            Action::CommitSchedule,
            Action::PauseContributions,
            Action::Finalize,
            Action::ReleaseVesting,
            Action::ChangeController,
        ] {
            self.grant(who, action);
        }
    }

    pub fn revoke(&self, who: &Identity, action: Action) {
        if let Some(holders) = self.grants.borrow_mut().get_mut(&action) {
            holders.remove(who);
        }
    }
}

impl Authorizer for StaticAuthorizer {
    fn is_authorized(&self, caller: &Identity, action: Action) -> bool {
        self.grants
            .borrow()
            .get(&action)
            .is_some_and(|holders| holders.contains(caller))
    }
}

/// Legacy balances with history, so reads at a past height ignore later
/// movements.
#[derive(Debug, Clone, Default)]
pub struct MemoryLegacyLedger {
    history: Rc<RefCell<BTreeMap<Identity, BTreeMap<BlockHeight, Amount>>>>,
}

impl MemoryLegacyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `holder`'s balance from `height` onwards.
    pub fn set_balance(&self, holder: Identity, height: BlockHeight, balance: Amount) {
        self.history
            .borrow_mut()
            .entry(holder)
            .or_default()
            .insert(height, balance);
    }
}

impl LegacyLedger for MemoryLegacyLedger {
    fn balance_of_at(&self, holder: &Identity, height: BlockHeight) -> Amount {
        self.history
            .borrow()
            .get(holder)
            .and_then(|entries| entries.range(..=height).next_back())
            .map_or(0, |(_, balance)| *balance)
    }

    fn total_supply_at(&self, height: BlockHeight) -> Amount {
        self.history
            .borrow()
            .values()
            .filter_map(|entries| entries.range(..=height).next_back())
            .map(|(_, balance)| *balance)
            .sum()
    }
}
