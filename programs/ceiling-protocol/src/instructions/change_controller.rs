use tracing::info;

use crate::error::{SaleError, SaleResult};
use crate::events::SaleEvent;
use crate::interfaces::Action;
use crate::sale::Sale;
use crate::state::Identity;

pub fn handle_change_controller(
    sale: &mut Sale,
    caller: &Identity,
    new_controller: &Identity,
) -> SaleResult<()> {
    if sale.core.gate.is_none() {
        return Err(SaleError::NotFinalized);
    }
    sale.require_authorized(caller, Action::ChangeController)?;

    let gate = sale.core.gate.as_mut().ok_or(SaleError::NotFinalized)?;
    let previous = gate.change_controller(*new_controller);

    info!(%previous, new = %new_controller, "controller changed");
    sale.emit(SaleEvent::ControllerChanged {
        previous,
        new: *new_controller,
    });
    Ok(())
}
