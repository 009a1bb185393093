mod campaign_file;
mod errors;
mod hidden_schedule;
mod share_planner;

pub use campaign_file::*;
pub use errors::{SdkError, SdkResult};
pub use hidden_schedule::{HiddenSchedule, PlannedPoint, RevealPlan, RevealStep};
pub use share_planner::*;

pub use ceiling_protocol::state::*;
