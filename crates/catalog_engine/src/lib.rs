//! Catalog engine: network fetching and the observable store.
mod fetch;
mod store;
mod types;
mod wire;

pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_BASE_URL, DEFAULT_ENDPOINT};
pub use store::{Store, StoreWatcher};
pub use types::{FailureKind, FetchError, StoreClosed, USER_MESSAGE_PREFIX};
pub use wire::decode_records;
