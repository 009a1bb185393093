use tracing::info;

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::interfaces::Action;
use crate::sale::Sale;
use crate::state::{Commitment, Identity};

pub fn handle_commit_schedule(
    sale: &mut Sale,
    caller: &Identity,
    commitments: Vec<Commitment>,
) -> SaleResult<()> {
    if sale.core.campaign.is_finalized() {
        return Err(SaleError::CampaignClosed);
    }
    sale.require_authorized(caller, Action::CommitSchedule)?;

    let (height, start) = (sale.clock.current_height(), sale.config.start_height);
    if height >= start {
        return Err(SaleError::SaleStarted { height, start });
    }

    let points = commitments.len();
    sale.core.schedule.commit(commitments)?;

    info!(points, "ceiling schedule committed");
    sale.emit(SaleEvent::ScheduleCommitted { points });
    Ok(())
}
