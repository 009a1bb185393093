use tracing::info;

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::interfaces::Action;
use crate::sale::Sale;
use crate::state::{CampaignStatus, Identity};

pub fn handle_set_contributions_paused(
    sale: &mut Sale,
    caller: &Identity,
    paused: bool,
) -> SaleResult<()> {
    sale.require_authorized(caller, Action::PauseContributions)?;

    let height = sale.clock.current_height();
    let next = match (sale.core.campaign.status, paused) {
        (CampaignStatus::Finalized, _) => return Err(SaleError::CampaignClosed),
        (CampaignStatus::Paused, true) => return Err(SaleError::ContributionsPaused),
        (CampaignStatus::Open, false) => return Err(SaleError::NotPaused),
        (CampaignStatus::Open, true) => CampaignStatus::Paused,
        (CampaignStatus::Paused, false) => CampaignStatus::Open,
    };
    sale.core.campaign.status = next;

    info!(%caller, height, ?next, "contribution status changed");
    sale.emit(if paused {
        SaleEvent::ContributionsPaused { by: *caller, height }
    } else {
        SaleEvent::ContributionsResumed { by: *caller, height }
    });
    Ok(())
}
