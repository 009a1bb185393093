//! Commit-reveal ladder of (height, cap) points.
//!
//! The full list of commitments is registered before the sale opens. Points
//! are then disclosed one at a time, strictly in commitment order, so nobody
//! can see the shape of the whole cap curve ahead of time.

use crate::ceiling_point::{CeilingPoint, CeilingPointPreimage};
use crate::constants::MAX_CEILING_POINTS;
use crate::error::{SaleError, SaleResult};
use crate::state::{Amount, BlockHeight, Commitment};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CeilingSchedule {
    points: Vec<CeilingPoint>,
    committed: bool,
    /// Index of the next point to reveal.
    next_index: usize,
    /// Set once the point flagged `is_final` has been revealed.
    exhausted: bool,
}

impl CeilingSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(&mut self, commitments: Vec<Commitment>) -> SaleResult<()> {
        if self.committed {
            return Err(SaleError::AlreadyCommitted);
        }
        if commitments.is_empty() || commitments.len() > MAX_CEILING_POINTS {
            return Err(SaleError::InvalidConfig(format!(
                "expected between 1 and {} commitments, got {}",
                MAX_CEILING_POINTS,
                commitments.len()
            )));
        }

        self.points = commitments
            .into_iter()
            .map(CeilingPoint::committed)
            .collect();
        self.committed = true;
        Ok(())
    }

    pub fn reveal(
        &mut self,
        height: BlockHeight,
        cap: Amount,
        is_final: bool,
        salt: [u8; 32],
    ) -> SaleResult<&CeilingPoint> {
        if !self.committed {
            return Err(SaleError::NotCommitted);
        }
        if self.exhausted || self.next_index >= self.points.len() {
            return Err(SaleError::ScheduleExhausted);
        }

        let commitment = CeilingPointPreimage {
            height,
            cap,
            is_final,
            salt,
        }
        .to_commitment();

        if self.points[self.next_index].committed_hash != commitment {
            // A valid preimage for a later point means the caller skipped ahead.
            let skipped_ahead = self.points[self.next_index + 1..]
                .iter()
                .any(|point| point.committed_hash == commitment);
            return Err(if skipped_ahead {
                SaleError::OutOfOrder
            } else {
                SaleError::CommitmentMismatch
            });
        }

        if let Some(previous) = self.last_revealed() {
            if height <= previous.height || cap < previous.cap {
                return Err(SaleError::NonMonotonic);
            }
        }

        let point = &mut self.points[self.next_index];
        point.height = height;
        point.cap = cap;
        point.is_final = is_final;
        point.revealed = true;

        self.next_index += 1;
        if is_final {
            self.exhausted = true;
        }

        Ok(&self.points[self.next_index - 1])
    }

    /// Cap of the last revealed point whose height has been reached, or 0.
    ///
    /// A step function: a point revealed early only takes effect at its height.
    pub fn ceiling_at(&self, height: BlockHeight) -> Amount {
        self.revealed_points()
            .iter()
            .take_while(|point| point.height <= height)
            .last()
            .map_or(0, |point| point.cap)
    }

    /// True once the final point is revealed and its height has been reached.
    pub fn final_point_reached(&self, height: BlockHeight) -> bool {
        self.exhausted
            && self
                .last_revealed()
                .is_some_and(|point| point.height <= height)
    }

    pub fn revealed_points(&self) -> &[CeilingPoint] {
        &self.points[..self.next_index]
    }

    pub fn last_revealed(&self) -> Option<&CeilingPoint> {
        self.revealed_points().last()
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn points_committed(&self) -> usize {
        self.points.len()
    }

    pub fn points_revealed(&self) -> usize {
        self.next_index
    }
}
