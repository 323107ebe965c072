use crate::{CycleId, OrderPolicy, Record};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Start a new cycle, replacing any cycle still in flight.
    RefreshRequested,
    /// The fetch for `cycle` returned raw records.
    FetchSucceeded { cycle: CycleId, records: Vec<Record> },
    /// The fetch for `cycle` failed; `message` is user-facing.
    FetchFailed { cycle: CycleId, message: String },
    /// Re-order the last fetched records under another policy.
    PolicyChanged(OrderPolicy),
    /// Fallback for placeholder wiring.
    NoOp,
}
