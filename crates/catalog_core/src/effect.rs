use crate::{CycleId, RankParseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cancel the network call of the cycle being replaced.
    CancelInFlight,
    StartFetch { cycle: CycleId },
    /// Records that fell back to the end of their group for lack of a rank.
    ReportRankFailures(Vec<RankParseError>),
}
