use tracing::info;

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::sale::Sale;
use crate::state::{Amount, Identity};

/// Swap `holder`'s legacy balance, read at the finalization height, for its
/// share of the exchange pool.
pub fn handle_claim_exchange(sale: &mut Sale, holder: &Identity) -> SaleResult<Amount> {
    let snapshot_height = sale
        .core
        .swap
        .as_ref()
        .ok_or(SaleError::NotFinalized)?
        .snapshot_height();
    let legacy_balance = sale.legacy.balance_of_at(holder, snapshot_height);

    // 1. Mark the claim before paying it
    let payout = sale
        .core
        .swap
        .as_mut()
        .ok_or(SaleError::NotFinalized)?
        .claim(*holder, legacy_balance)?;

    // 2. Pay from the exchange pool
    if payout > 0 {
        let pool = sale.config.pools.exchange_pool;
        sale.ledger.transfer(&pool, holder, payout)?;
    }

    info!(%holder, legacy_balance, payout, "exchange claim paid");
    sale.emit(SaleEvent::SwapClaimed {
        holder: *holder,
        legacy_balance,
        payout,
    });
    Ok(payout)
}
