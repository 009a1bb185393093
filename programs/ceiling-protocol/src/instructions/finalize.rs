use tracing::info;

use crate::allocation::split_supply;
use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::exchange::ExchangeSwap;
use crate::gate::ControllerGate;
use crate::interfaces::Action;
use crate::sale::Sale;
use crate::state::{CampaignStatus, Identity, SupplyAllocation};
use crate::vesting::VestingVault;

/// True once the window has passed, or once the final point is live and
/// fully subscribed.
pub fn is_ready_to_finalize(sale: &Sale) -> bool {
    let height = sale.clock.current_height();
    if height > sale.config.stop_height {
        return true;
    }
    let schedule = &sale.core.schedule;
    schedule.final_point_reached(height)
        && sale.core.campaign.total_collected == schedule.ceiling_at(height)
}

pub fn handle_finalize(sale: &mut Sale, caller: &Identity) -> SaleResult<SupplyAllocation> {
    // 0. One shot
    if sale.core.campaign.is_finalized() {
        return Err(SaleError::AlreadyFinalized);
    }
    sale.require_authorized(caller, Action::Finalize)?;

    // 1. Readiness
    if !is_ready_to_finalize(sale) {
        return Err(SaleError::NotReady);
    }

    let height = sale.clock.current_height();
    let now = sale.clock.now();
    let pools = sale.config.pools;

    // 2. Fix the supply split
    let allocation = split_supply(sale.core.campaign.tokens_issued, &sale.config.shares)?;

    // 3. Close the campaign and install the post-sale components
    let gate = ControllerGate::new(
        now,
        sale.config.transfer_lock_seconds,
        sale.config.controller,
        vec![pools.exchange_pool, pools.vesting_vault],
    )?;
    let core = &mut sale.core;
    core.campaign.status = CampaignStatus::Finalized;
    core.campaign.finalized_height = Some(height);
    core.campaign.finalized_time = Some(now);
    core.allocation = Some(allocation);
    core.vault = Some(VestingVault::new(
        allocation.vesting,
        now,
        sale.config.vesting_step_seconds,
        pools.vesting_vault,
        pools.vesting_recipient,
    ));
    core.swap = Some(ExchangeSwap::new(
        allocation.exchange,
        sale.legacy.total_supply_at(height),
        height,
    ));
    let policy = gate.transfer_policy();
    core.gate = Some(gate);

    // 4. Mint the pools and hand transfer authority to the gate
    for (pool, amount) in [
        (pools.exchange_pool, allocation.exchange),
        (pools.vesting_vault, allocation.vesting),
        (pools.secondary_pool, allocation.secondary),
    ] {
        if amount > 0 {
            sale.ledger.mint(&pool, amount)?;
        }
    }
    sale.ledger.set_transfer_authority(policy);

    info!(
        height,
        total_supply = allocation.total_supply,
        contributors = allocation.contributors,
        exchange = allocation.exchange,
        vesting = allocation.vesting,
        secondary = allocation.secondary,
        "campaign finalized"
    );
    sale.emit(SaleEvent::Finalized {
        height,
        time: now,
        allocation,
    });
    Ok(allocation)
}
