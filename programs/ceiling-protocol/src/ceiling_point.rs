use borsh::BorshSerialize;
use sha2::{Digest, Sha256};

use crate::constants::CEILING_POINT_PREFIX;
use crate::state::{Amount, BlockHeight, Commitment};

/// The secret behind one commitment of the ceiling schedule.
///
/// ## Serialization Schema Stability
///
/// Commitments are published before the sale opens and verified during it,
/// so this struct's Borsh layout must not change once a schedule has been
/// committed:
///
/// ```text
/// struct CeilingPointPreimage {
///     height: u64,       //  8 bytes, offset 0
///     cap: u128,         // 16 bytes, offset 8
///     is_final: bool,    //  1 byte,  offset 24
///     salt: [u8; 32],    // 32 bytes, offset 25
/// }
/// // Total: 57 bytes
/// ```
#[derive(BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct CeilingPointPreimage {
    pub height: BlockHeight,
    pub cap: Amount,
    pub is_final: bool,
    pub salt: [u8; 32],
}

impl CeilingPointPreimage {
    /// SHA256(0x02 || borsh(preimage))
    pub fn to_commitment(&self) -> Commitment {
        let mut hasher = Sha256::new();
        hasher.update([CEILING_POINT_PREFIX]);
        let serialized = borsh::to_vec(self).expect("Failed to serialize CeilingPointPreimage");
        hasher.update(&serialized);
        hasher.finalize().into()
    }
}

/// One entry of the ceiling schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CeilingPoint {
    pub committed_hash: Commitment,
    /// Filled in on reveal.
    pub height: BlockHeight,
    pub cap: Amount,
    pub revealed: bool,
    pub is_final: bool,
}

impl CeilingPoint {
    pub fn committed(committed_hash: Commitment) -> Self {
        Self {
            committed_hash,
            height: 0,
            cap: 0,
            revealed: false,
            is_final: false,
        }
    }
}
