use tracing::{debug, info};

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::interfaces::Payer;
use crate::sale::Sale;
use crate::state::{Amount, CampaignStatus, Identity};

/// Outcome of an accepted contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionReceipt {
    pub accepted: Amount,
    pub refunded: Amount,
    /// Units minted to the beneficiary.
    pub units: Amount,
    /// Campaign total after this contribution.
    pub total_collected: Amount,
}

pub fn handle_contribute(
    sale: &mut Sale,
    payer: &mut dyn Payer,
    beneficiary: &Identity,
    amount: Amount,
) -> SaleResult<ContributionReceipt> {
    let height = sale.clock.current_height();

    // 1. Campaign must be open and inside its window
    match sale.core.campaign.status {
        CampaignStatus::Finalized => return Err(SaleError::CampaignClosed),
        CampaignStatus::Paused => return Err(SaleError::ContributionsPaused),
        CampaignStatus::Open => {}
    }
    let (start, stop) = (sale.config.start_height, sale.config.stop_height);
    if height < start || height > stop {
        return Err(SaleError::OutsideWindow {
            height,
            start,
            stop,
        });
    }
    if amount == 0 {
        return Err(SaleError::ZeroAmount);
    }

    // 2. Fit the amount under the current ceiling
    let ceiling = sale.core.schedule.ceiling_at(height);
    let cap_room = ceiling.saturating_sub(sale.core.campaign.total_collected);
    if cap_room == 0 {
        return Err(SaleError::CeilingReached);
    }
    let accepted = amount.min(cap_room);
    let refunded = amount - accepted;
    let units = accepted
        .checked_mul(sale.config.rate)
        .ok_or(SaleError::NumericOverflow)?;

    // 3. Effects: mint and counters before any value leaves the sale
    sale.ledger.mint(beneficiary, units)?;
    let campaign = &mut sale.core.campaign;
    campaign.total_collected = campaign
        .total_collected
        .checked_add(accepted)
        .ok_or(SaleError::NumericOverflow)?;
    campaign.tokens_issued = campaign
        .tokens_issued
        .checked_add(units)
        .ok_or(SaleError::NumericOverflow)?;
    let total_collected = campaign.total_collected;

    sale.emit(SaleEvent::Contributed {
        payer: payer.identity(),
        beneficiary: *beneficiary,
        accepted,
        refunded,
        units,
        height,
    });

    // 4. Interactions
    sale.escrow.deposit(accepted)?;
    if refunded > 0 {
        debug!(refunded, "returning excess to payer");
        payer.receive_refund(sale, refunded)?;
    }

    info!(
        %beneficiary,
        accepted, refunded, units, total_collected, "contribution accepted"
    );
    Ok(ContributionReceipt {
        accepted,
        refunded,
        units,
        total_collected,
    })
}
