use tracing::{info, warn};

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::sale::Sale;
use crate::state::{Amount, BlockHeight};

/// Anyone holding the preimage may reveal; the commitment is the authority.
pub fn handle_reveal_point(
    sale: &mut Sale,
    height: BlockHeight,
    cap: Amount,
    is_final: bool,
    salt: [u8; 32],
) -> SaleResult<()> {
    if sale.core.campaign.is_finalized() {
        return Err(SaleError::CampaignClosed);
    }

    let index = sale.core.schedule.points_revealed();
    if let Err(err) = sale.core.schedule.reveal(height, cap, is_final, salt) {
        warn!(index, height, %err, "ceiling point reveal rejected");
        return Err(err);
    }

    info!(index, height, cap, is_final, "ceiling point revealed");
    sale.emit(SaleEvent::PointRevealed {
        index,
        height,
        cap,
        is_final,
    });
    Ok(())
}
