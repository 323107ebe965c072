//! Catalog core: records, the ordering pipeline and the pure store state machine.
mod effect;
mod msg;
pub mod pipeline;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use pipeline::{process, process_with_report, OrderPolicy, Processed};
pub use record::{RankParseError, Record, RANK_PREFIX};
pub use state::{CycleId, CycleStatus, StoreSnapshot, StoreState};
pub use update::update;
pub use view_model::{CatalogViewModel, GroupView, ItemRowView};
