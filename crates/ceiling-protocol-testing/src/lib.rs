mod campaign_snapshot;
mod collaborators;
mod fixture_stage;
mod fixture_state;
mod memory_escrow;
mod memory_ledger;
mod payers;
mod test_fixture;

pub use campaign_snapshot::*;
pub use collaborators::*;
pub use fixture_stage::*;
pub use fixture_state::*;
pub use memory_escrow::*;
pub use memory_ledger::*;
pub use payers::*;
pub use test_fixture::*;

use sha2::{Digest, Sha256};
use solana_pubkey::Pubkey;

/// Stable identity derived from a name, so tests can refer to "buyer" or
/// "community_multisig" across runs.
pub fn deterministic_identity(name: &str) -> Pubkey {
    Pubkey::new_from_array(Sha256::digest(name.as_bytes()).into())
}
