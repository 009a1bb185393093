/// Points along the reference campaign a `TestFixture` can be advanced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureStage {
    /// Sale exists, nothing committed
    #[default]
    SaleCreated,

    /// Ceiling commitments registered
    ScheduleCommitted,

    /// First point revealed and the window has opened
    SaleOpened,

    /// Contributions of 1 and 5 against the first cap of 3
    FirstCapFilled,

    /// Second point live, 8 collected
    SecondPointFunded,

    /// Final point live and fully subscribed, 15 collected
    CeilingFilled,

    /// Supply split and post-sale components installed
    Finalized,
}

impl FixtureStage {
    pub fn all() -> &'static [FixtureStage] {
        &[
            FixtureStage::SaleCreated,
            FixtureStage::ScheduleCommitted,
            FixtureStage::SaleOpened,
            FixtureStage::FirstCapFilled,
            FixtureStage::SecondPointFunded,
            FixtureStage::CeilingFilled,
            FixtureStage::Finalized,
        ]
    }

    /// Get the ordinal position of this stage in the progression
    pub fn ord(&self) -> u8 {
        match self {
            FixtureStage::SaleCreated => 0,
            FixtureStage::ScheduleCommitted => 1,
            FixtureStage::SaleOpened => 2,
            FixtureStage::FirstCapFilled => 3,
            FixtureStage::SecondPointFunded => 4,
            FixtureStage::CeilingFilled => 5,
            FixtureStage::Finalized => 6,
        }
    }
}

impl PartialOrd for FixtureStage {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FixtureStage {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ord().cmp(&other.ord())
    }
}
