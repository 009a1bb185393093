use tracing::{debug, info};

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::interfaces::Action;
use crate::sale::Sale;
use crate::state::{Amount, Identity};

/// Release whatever has vested and not yet been paid. Ok(0) while locked.
pub fn handle_release_vested(sale: &mut Sale, caller: &Identity) -> SaleResult<Amount> {
    if sale.core.vault.is_none() {
        return Err(SaleError::NotFinalized);
    }
    sale.require_authorized(caller, Action::ReleaseVesting)?;

    let now = sale.clock.now();
    let vault = sale.core.vault.as_mut().ok_or(SaleError::NotFinalized)?;

    // 1. Account for the release first
    let amount = vault.release(now)?;
    if amount == 0 {
        debug!(now, stage = ?vault.stage(now), "nothing to release");
        return Ok(0);
    }
    let from = vault.vault();
    let recipient = vault.recipient();
    let total_released = vault.record().released;

    // 2. Then pay out
    sale.ledger.transfer(&from, &recipient, amount)?;

    info!(%recipient, amount, total_released, "vested tokens released");
    sale.emit(SaleEvent::VestingReleased {
        recipient,
        amount,
        total_released,
    });
    Ok(amount)
}
