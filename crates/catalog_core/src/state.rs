use crate::pipeline::{process_with_report, OrderPolicy, Processed};
use crate::view_model::CatalogViewModel;
use crate::{RankParseError, Record};

/// Identifies one fetch-and-process cycle. Results carrying an older id are stale.
pub type CycleId = u64;

/// Where the current cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleStatus {
    /// No cycle has been started yet.
    #[default]
    Idle,
    Fetching,
    /// The last cycle delivered items.
    Published,
    /// The last cycle failed; `error` holds the message.
    Failed,
}

impl CycleStatus {
    pub fn is_settled(self) -> bool {
        matches!(self, CycleStatus::Published | CycleStatus::Failed)
    }
}

/// Read-only copy of what a rendering surface needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub items: Vec<Record>,
    pub error: Option<String>,
    pub status: CycleStatus,
}

impl StoreSnapshot {
    /// True while a cycle is running and nothing has been shown yet.
    pub fn is_loading(&self) -> bool {
        self.status == CycleStatus::Fetching && self.items.is_empty() && self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreState {
    items: Vec<Record>,
    error: Option<String>,
    status: CycleStatus,
    policy: OrderPolicy,
    raw: Vec<Record>,
    cycle: CycleId,
    dirty: bool,
}

impl StoreState {
    pub fn new(policy: OrderPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> CycleStatus {
        self.status
    }

    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Id of the most recently started cycle; 0 before the first one.
    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            items: self.items.clone(),
            error: self.error.clone(),
            status: self.status,
        }
    }

    pub fn view(&self) -> CatalogViewModel {
        CatalogViewModel::from_items(&self.items, self.error.clone(), self.status)
    }

    /// Returns whether visible state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_cycle(&mut self) -> CycleId {
        self.cycle += 1;
        self.status = CycleStatus::Fetching;
        self.dirty = true;
        self.cycle
    }

    pub(crate) fn publish(&mut self, raw: Vec<Record>) -> Vec<RankParseError> {
        self.raw = raw;
        self.error = None;
        self.status = CycleStatus::Published;
        self.reprocess()
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.status = CycleStatus::Failed;
        self.dirty = true;
    }

    pub(crate) fn set_policy(&mut self, policy: OrderPolicy) -> Vec<RankParseError> {
        self.policy = policy;
        self.reprocess()
    }

    fn reprocess(&mut self) -> Vec<RankParseError> {
        let Processed {
            items,
            rank_failures,
        } = process_with_report(&self.raw, self.policy);
        self.items = items;
        self.dirty = true;
        rank_failures
    }
}
