/*!
# Hidden Ceiling Schedules

Off-chain half of the commit-reveal scheme. An operator plans the cap
ladder, the builder salts every point and produces:

- the list of commitments to hand to `Sale::commit` before the sale opens, and
- a secret [`RevealPlan`] holding the preimages, to be disclosed one step at
  a time during the sale.

Decoy commitments (random hashes) can be appended after the final point so
observers cannot count the real points. They can never be revealed: the
schedule stops accepting reveals once the final point is disclosed.

```rust
use ceiling_protocol_sdk::{HiddenSchedule, PlannedPoint};
use rand::{rngs::StdRng, SeedableRng};

let points = vec![
    PlannedPoint { height: 1_000_000, cap: 3 },
    PlannedPoint { height: 1_001_000, cap: 13 },
    PlannedPoint { height: 1_002_000, cap: 15 },
];
let plan = HiddenSchedule::new(points)
    .with_decoys(5)
    .build(&mut StdRng::seed_from_u64(7))
    .expect("valid schedule");

assert_eq!(plan.commitments.len(), 8);
plan.verify().expect("plan matches its commitments");
```
*/

use std::fs;
use std::path::Path;

use ceiling_protocol::{Amount, BlockHeight, CeilingPointPreimage, Commitment, MAX_CEILING_POINTS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{SdkError, SdkResult};

/// One step of the cap ladder as the operator plans it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPoint {
    pub height: BlockHeight,
    #[serde(with = "amount_string")]
    pub cap: Amount,
}

/// Everything needed to reveal one point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStep {
    pub index: usize,
    pub height: BlockHeight,
    #[serde(with = "amount_string")]
    pub cap: Amount,
    pub is_final: bool,
    /// Hex-encoded 32-byte salt
    pub salt: String,
}

impl RevealStep {
    pub fn salt_bytes(&self) -> SdkResult<[u8; 32]> {
        decode_hash(&self.salt)
    }

    pub fn preimage(&self) -> SdkResult<CeilingPointPreimage> {
        Ok(CeilingPointPreimage {
            height: self.height,
            cap: self.cap,
            is_final: self.is_final,
            salt: self.salt_bytes()?,
        })
    }
}

/// Commitments plus the secret preimages behind the real ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPlan {
    /// Hex-encoded commitments in commit order, decoys included.
    pub commitments: Vec<String>,
    pub reveals: Vec<RevealStep>,
}

impl RevealPlan {
    pub fn commitment_bytes(&self) -> SdkResult<Vec<Commitment>> {
        self.commitments.iter().map(|c| decode_hash(c)).collect()
    }

    /// Only the public half of the plan, safe to publish before the sale.
    pub fn public(&self) -> RevealPlan {
        RevealPlan {
            commitments: self.commitments.clone(),
            reveals: Vec::new(),
        }
    }

    pub fn decoy_count(&self) -> usize {
        self.commitments.len().saturating_sub(self.reveals.len())
    }

    /// Re-hash every reveal step against its commitment and check the ladder
    /// would be accepted by the sale.
    pub fn verify(&self) -> SdkResult<()> {
        let commitments = self.commitment_bytes()?;
        if self.reveals.is_empty() {
            return Err(SdkError::InvalidSchedule("plan has no reveal steps".to_string()));
        }
        if commitments.len() > MAX_CEILING_POINTS {
            return Err(SdkError::InvalidSchedule(format!(
                "{} commitments exceed the maximum of {}",
                commitments.len(),
                MAX_CEILING_POINTS
            )));
        }

        let mut previous: Option<&RevealStep> = None;
        for (position, step) in self.reveals.iter().enumerate() {
            if step.index != position {
                return Err(SdkError::InvalidSchedule(format!(
                    "reveal step {} is out of order (index {})",
                    position, step.index
                )));
            }
            let expected = commitments
                .get(step.index)
                .ok_or(SdkError::CommitmentMismatch { index: step.index })?;
            if step.preimage()?.to_commitment() != *expected {
                return Err(SdkError::CommitmentMismatch { index: step.index });
            }

            let is_last = position + 1 == self.reveals.len();
            if step.is_final != is_last {
                return Err(SdkError::InvalidSchedule(format!(
                    "only the last reveal step may be final (step {})",
                    step.index
                )));
            }
            if let Some(prev) = previous {
                if step.height <= prev.height || step.cap < prev.cap {
                    return Err(SdkError::InvalidSchedule(format!(
                        "step {} is not monotonic after step {}",
                        step.index, prev.index
                    )));
                }
            }
            previous = Some(step);
        }
        Ok(())
    }

    pub fn save_json(&self, path: &Path) -> SdkResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load_json(path: &Path) -> SdkResult<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Builder for a [`RevealPlan`].
#[derive(Debug, Clone)]
pub struct HiddenSchedule {
    points: Vec<PlannedPoint>,
    decoys: usize,
}

impl HiddenSchedule {
    pub fn new(points: Vec<PlannedPoint>) -> Self {
        Self { points, decoys: 0 }
    }

    pub fn with_decoys(mut self, decoys: usize) -> Self {
        self.decoys = decoys;
        self
    }

    pub fn points(&self) -> &[PlannedPoint] {
        &self.points
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.points.is_empty() {
            return Err(SdkError::InvalidSchedule("no ceiling points".to_string()));
        }
        let total = self.points.len() + self.decoys;
        if total > MAX_CEILING_POINTS {
            return Err(SdkError::InvalidSchedule(format!(
                "{} points plus {} decoys exceed the maximum of {}",
                self.points.len(),
                self.decoys,
                MAX_CEILING_POINTS
            )));
        }
        for pair in self.points.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(SdkError::InvalidSchedule(format!(
                    "heights must strictly increase ({} then {})",
                    pair[0].height, pair[1].height
                )));
            }
            if pair[1].cap < pair[0].cap {
                return Err(SdkError::InvalidSchedule(format!(
                    "caps must not decrease ({} then {})",
                    pair[0].cap, pair[1].cap
                )));
            }
        }
        Ok(())
    }

    /// Salt every point with fresh randomness from `rng`. The last point is
    /// marked final.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> SdkResult<RevealPlan> {
        self.validate()?;

        let last = self.points.len() - 1;
        let mut commitments = Vec::with_capacity(self.points.len() + self.decoys);
        let mut reveals = Vec::with_capacity(self.points.len());

        for (index, point) in self.points.iter().enumerate() {
            let mut salt = [0u8; 32];
            rng.fill(&mut salt);

            let preimage = CeilingPointPreimage {
                height: point.height,
                cap: point.cap,
                is_final: index == last,
                salt,
            };
            commitments.push(hex::encode(preimage.to_commitment()));
            reveals.push(RevealStep {
                index,
                height: point.height,
                cap: point.cap,
                is_final: preimage.is_final,
                salt: hex::encode(salt),
            });
        }

        for _ in 0..self.decoys {
            let mut decoy = [0u8; 32];
            rng.fill(&mut decoy);
            commitments.push(hex::encode(decoy));
        }

        debug!(
            points = reveals.len(),
            decoys = self.decoys,
            "hidden schedule built"
        );
        Ok(RevealPlan {
            commitments,
            reveals,
        })
    }
}

fn decode_hash(value: &str) -> SdkResult<[u8; 32]> {
    let bytes = hex::decode(value)?;
    bytes
        .try_into()
        .map_err(|_| SdkError::InvalidHex(hex::FromHexError::InvalidStringLength))
}

/// Amounts are `u128`; files carry them as decimal strings.
pub(crate) mod amount_string {
    use ceiling_protocol::Amount;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n as Amount),
            Raw::Text(s) => s.trim().parse().map_err(D::Error::custom),
        }
    }
}
