use crate::error::{SaleError, SaleResult};
use crate::state::{ControllerState, Identity, Timestamp};

/// Transfer rule a ledger enforces on holder-to-holder transfers.
///
/// Mints are never subject to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransferPolicy {
    /// Contributions are running. Every transfer is rejected.
    #[default]
    SaleInProgress,
    /// Post-sale lock. Transfers are rejected until `unlock_time` unless they
    /// originate from an exempt identity.
    Gated {
        unlock_time: Timestamp,
        exempt_sources: Vec<Identity>,
    },
}

impl TransferPolicy {
    pub fn check(&self, from: &Identity, now: Timestamp) -> SaleResult<()> {
        match self {
            TransferPolicy::SaleInProgress => Err(SaleError::TransferLocked { unlock_time: None }),
            TransferPolicy::Gated {
                unlock_time,
                exempt_sources,
            } => {
                if now >= *unlock_time || exempt_sources.contains(from) {
                    Ok(())
                } else {
                    Err(SaleError::TransferLocked {
                        unlock_time: Some(*unlock_time),
                    })
                }
            }
        }
    }
}

/// Post-sale controller: owns the transfer lock and the controller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerGate {
    state: ControllerState,
    exempt_sources: Vec<Identity>,
}

impl ControllerGate {
    pub fn new(
        finalized_time: Timestamp,
        lock_seconds: Timestamp,
        controller: Identity,
        exempt_sources: Vec<Identity>,
    ) -> SaleResult<Self> {
        let unlock_time = finalized_time
            .checked_add(lock_seconds)
            .ok_or(SaleError::NumericOverflow)?;
        Ok(Self {
            state: ControllerState {
                unlock_time,
                current_controller: controller,
            },
            exempt_sources,
        })
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn unlock_time(&self) -> Timestamp {
        self.state.unlock_time
    }

    pub fn controller(&self) -> Identity {
        self.state.current_controller
    }

    pub fn is_locked(&self, now: Timestamp) -> bool {
        now < self.state.unlock_time
    }

    pub fn transfer_policy(&self) -> TransferPolicy {
        TransferPolicy::Gated {
            unlock_time: self.state.unlock_time,
            exempt_sources: self.exempt_sources.clone(),
        }
    }

    pub fn check_transfer(&self, from: &Identity, now: Timestamp) -> SaleResult<()> {
        self.transfer_policy().check(from, now)
    }

    /// Replace the controller. Returns the previous one.
    pub fn change_controller(&mut self, new_controller: Identity) -> Identity {
        std::mem::replace(&mut self.state.current_controller, new_controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TRANSFER_LOCK_SECONDS;
    use solana_pubkey::Pubkey;

    const FINALIZED_AT: Timestamp = 1_700_000_000;

    #[test]
    fn test_sale_in_progress_blocks_everything() {
        let policy = TransferPolicy::default();
        assert_eq!(
            policy.check(&Pubkey::new_unique(), i64::MAX),
            Err(SaleError::TransferLocked { unlock_time: None })
        );
    }

    #[test]
    fn test_lock_expires_after_fixed_delay() {
        let gate = ControllerGate::new(
            FINALIZED_AT,
            TRANSFER_LOCK_SECONDS,
            Pubkey::new_unique(),
            vec![],
        )
        .unwrap();
        let holder = Pubkey::new_unique();
        let unlock = FINALIZED_AT + 14 * 86_400;

        assert_eq!(gate.unlock_time(), unlock);
        assert!(gate.is_locked(unlock - 1));
        assert_eq!(
            gate.check_transfer(&holder, unlock - 1),
            Err(SaleError::TransferLocked {
                unlock_time: Some(unlock)
            })
        );
        assert!(gate.check_transfer(&holder, unlock).is_ok());
    }

    #[test]
    fn test_exempt_source_bypasses_lock() {
        let exchange_pool = Pubkey::new_unique();
        let gate = ControllerGate::new(
            FINALIZED_AT,
            TRANSFER_LOCK_SECONDS,
            Pubkey::new_unique(),
            vec![exchange_pool],
        )
        .unwrap();

        assert!(gate.check_transfer(&exchange_pool, FINALIZED_AT).is_ok());
        assert!(gate
            .check_transfer(&Pubkey::new_unique(), FINALIZED_AT)
            .is_err());
    }

    #[test]
    fn test_change_controller_is_unconditional() {
        let first = Pubkey::new_unique();
        let mut gate =
            ControllerGate::new(FINALIZED_AT, TRANSFER_LOCK_SECONDS, first, vec![]).unwrap();

        let second = Pubkey::new_unique();
        let third = Pubkey::new_unique();
        assert_eq!(gate.change_controller(second), first);
        assert_eq!(gate.change_controller(third), second);
        assert_eq!(gate.controller(), third);
        // The lock is unaffected by handoffs.
        assert_eq!(gate.unlock_time(), FINALIZED_AT + TRANSFER_LOCK_SECONDS);
    }
}
