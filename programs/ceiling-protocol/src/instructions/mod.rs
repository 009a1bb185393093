pub mod change_controller;
pub mod claim_exchange;
pub mod commit_schedule;
pub mod contribute;
pub mod finalize;
pub mod release_vested;
pub mod reveal_point;
pub mod set_contributions_paused;

pub use change_controller::*;
pub use claim_exchange::*;
pub use commit_schedule::*;
pub use contribute::*;
pub use finalize::*;
pub use release_vested::*;
pub use reveal_point::*;
pub use set_contributions_paused::*;
