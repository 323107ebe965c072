//! Observable catalog state driven by background fetch cycles.
//!
//! The [`Store`] is the single writer. It feeds messages through the pure
//! [`catalog_core::update`] function and publishes the resulting state on a
//! `tokio::sync::watch` channel; any number of [`StoreWatcher`]s read
//! snapshots from it.
//!
//! Lock order is always `in_flight` first, then the watch channel. Every
//! write checks the session token under both locks, which is what makes
//! [`Store::shutdown`] final.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use catalog_core::{
    update, CatalogViewModel, CycleId, CycleStatus, Effect, Msg, OrderPolicy, Record,
    StoreSnapshot, StoreState,
};
use catalog_logging::{catalog_debug, catalog_info, catalog_warn};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{Fetcher, StoreClosed};

pub struct Store {
    shared: Arc<Shared>,
}

struct Shared {
    fetcher: Arc<dyn Fetcher>,
    state_tx: watch::Sender<StoreState>,
    session: CancellationToken,
    // Token of the cycle whose network call may still be running.
    in_flight: Mutex<Option<CancellationToken>>,
}

impl Store {
    /// Creates the store and starts the first cycle on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start(fetcher: Arc<dyn Fetcher>, policy: OrderPolicy) -> Self {
        let (state_tx, _) = watch::channel(StoreState::new(policy));
        let store = Self {
            shared: Arc::new(Shared {
                fetcher,
                state_tx,
                session: CancellationToken::new(),
                in_flight: Mutex::new(None),
            }),
        };
        store.refresh();
        store
    }

    /// Runs another cycle. A cycle still in flight is cancelled and its result discarded.
    pub fn refresh(&self) {
        self.shared.dispatch(Msg::RefreshRequested);
    }

    /// Re-orders the last fetched records without going back to the network.
    pub fn set_policy(&self, policy: OrderPolicy) {
        self.shared.dispatch(Msg::PolicyChanged(policy));
    }

    pub fn subscribe(&self) -> StoreWatcher {
        StoreWatcher {
            rx: self.shared.state_tx.subscribe(),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.shared.state_tx.borrow().snapshot()
    }

    /// Ends the session: cancels the in-flight cycle and freezes the state.
    ///
    /// Once this returns no further update is published, even by a fetch
    /// that completes afterwards. Calling it again is harmless.
    pub fn shutdown(&self) {
        let mut in_flight = self.shared.lock_in_flight();
        if self.shared.session.is_cancelled() {
            return;
        }
        self.shared.session.cancel();
        if let Some(token) = in_flight.take() {
            token.cancel();
        }
        catalog_info!("Store shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shared.session.is_cancelled()
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Shared {
    fn lock_in_flight(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(self: &Arc<Self>, msg: Msg) {
        let mut in_flight = self.lock_in_flight();
        let effects = self.apply(None, msg);
        self.run_effects(&mut in_flight, effects);
    }

    /// Applies `msg` unless the session or the given cycle has been cancelled.
    fn apply(&self, cycle_token: Option<&CancellationToken>, msg: Msg) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.state_tx.send_if_modified(|state| {
            if self.session.is_cancelled() || cycle_token.is_some_and(|t| t.is_cancelled()) {
                return false;
            }
            let (mut next, produced) = update(std::mem::take(state), msg);
            let changed = next.consume_dirty();
            *state = next;
            effects = produced;
            changed
        });
        effects
    }

    fn run_effects(
        self: &Arc<Self>,
        in_flight: &mut Option<CancellationToken>,
        effects: Vec<Effect>,
    ) {
        for effect in effects {
            match effect {
                Effect::CancelInFlight => {
                    if let Some(token) = in_flight.take() {
                        catalog_debug!("Cancelling superseded cycle");
                        token.cancel();
                    }
                }
                Effect::StartFetch { cycle } => {
                    let token = self.session.child_token();
                    if let Some(previous) = in_flight.replace(token.clone()) {
                        previous.cancel();
                    }
                    self.spawn_cycle(cycle, token);
                }
                Effect::ReportRankFailures(failures) => {
                    catalog_warn!(
                        "{} records have no integer rank and were placed last in their group",
                        failures.len()
                    );
                    for failure in &failures {
                        catalog_debug!("{failure}");
                    }
                }
            }
        }
    }

    fn spawn_cycle(self: &Arc<Self>, cycle: CycleId, token: CancellationToken) {
        catalog_info!("Cycle {cycle} started");
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    catalog_debug!("Cycle {cycle} cancelled before the fetch completed");
                    return;
                }
                result = shared.fetcher.fetch_all() => result,
            };

            let msg = match result {
                Ok(records) => {
                    catalog_info!("Cycle {cycle} received {} records", records.len());
                    Msg::FetchSucceeded { cycle, records }
                }
                Err(err) => {
                    catalog_warn!("Cycle {cycle} failed: {err}");
                    Msg::FetchFailed {
                        cycle,
                        message: err.user_message(),
                    }
                }
            };

            let mut in_flight = shared.lock_in_flight();
            let effects = shared.apply(Some(&token), msg);
            shared.run_effects(&mut in_flight, effects);
        });
    }
}

/// Read side of a [`Store`]. Cheap to clone; each clone tracks changes on its own.
#[derive(Clone)]
pub struct StoreWatcher {
    rx: watch::Receiver<StoreState>,
}

impl StoreWatcher {
    pub fn snapshot(&self) -> StoreSnapshot {
        self.rx.borrow().snapshot()
    }

    pub fn view(&self) -> CatalogViewModel {
        self.rx.borrow().view()
    }

    pub fn items(&self) -> Vec<Record> {
        self.rx.borrow().items().to_vec()
    }

    pub fn error(&self) -> Option<String> {
        self.rx.borrow().error().map(str::to_string)
    }

    pub fn status(&self) -> CycleStatus {
        self.rx.borrow().status()
    }

    /// Waits for the next published change and returns the new state.
    pub async fn changed(&mut self) -> Result<StoreSnapshot, StoreClosed> {
        self.rx.changed().await.map_err(|_| StoreClosed)?;
        Ok(self.rx.borrow_and_update().snapshot())
    }

    /// Waits until the current cycle has published items or an error.
    pub async fn settled(&mut self) -> Result<StoreSnapshot, StoreClosed> {
        let state = self
            .rx
            .wait_for(|state| state.status().is_settled())
            .await
            .map_err(|_| StoreClosed)?;
        Ok(state.snapshot())
    }
}
