// crates/tailorfind-core/src/screen.rs

//! # Directory Screen
//!
//! One activation of the tailor list: a record fetch and a location fix run
//! as independent one-shot tasks, each publishing its latest value into a
//! `watch` cell. The handle owns the query and filter selection and
//! re-derives the result list whenever any input changed.

use crate::engine::{Deriver, FilterOutcome};
use crate::filter::{FilterCatalog, FilterSelection};
use crate::source::{acquire_location, load_records, LocationState, RecordState};
use crate::traits::{LocationProvider, RecordProvider};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct DirectoryScreen {
    record_provider: Arc<dyn RecordProvider>,
    records_tx: Arc<watch::Sender<RecordState>>,
    records_rx: watch::Receiver<RecordState>,
    /// Bumped on every retry; a fetch only publishes while it still matches.
    fetch_generation: Arc<AtomicU64>,
    location_rx: watch::Receiver<LocationState>,
    location_closed: bool,
    record_task: JoinHandle<()>,
    location_task: JoinHandle<()>,
    catalog: FilterCatalog,
    selection: FilterSelection,
    query: String,
    deriver: Deriver,
}

impl DirectoryScreen {
    /// Start both sources concurrently. Must be called inside a tokio runtime.
    pub fn activate(
        records: Arc<dyn RecordProvider>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        let (records_tx, records_rx) = watch::channel(RecordState::Loading);
        let records_tx = Arc::new(records_tx);
        let (location_tx, location_rx) = watch::channel(LocationState::Idle);

        let fetch_generation = Arc::new(AtomicU64::new(0));
        let record_task = spawn_fetch(
            Arc::clone(&records),
            Arc::clone(&records_tx),
            Arc::clone(&fetch_generation),
            0,
        );
        let location_task = tokio::spawn(async move {
            acquire_location(location.as_ref(), &location_tx).await;
        });
        info!("Directory screen activated");

        Self {
            record_provider: records,
            records_tx,
            records_rx,
            fetch_generation,
            location_rx,
            location_closed: false,
            record_task,
            location_task,
            catalog: FilterCatalog::default(),
            selection: FilterSelection::none(),
            query: String::new(),
            deriver: Deriver::new(),
        }
    }

    /// Replace the filter catalog. Clears the current selection.
    pub fn with_catalog(mut self, catalog: FilterCatalog) -> Self {
        self.catalog = catalog;
        self.selection.clear();
        self
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Toggle the catalog filter `id`; `false` if the id is unknown.
    pub fn toggle_filter(&mut self, id: &str) -> bool {
        let known = self.selection.toggle_id(&self.catalog, id);
        debug!(id, known, active = ?self.selection.active_id(), "Filter toggled");
        known
    }

    pub fn clear_filter(&mut self) {
        self.selection.clear();
    }

    pub fn records(&self) -> RecordState {
        self.records_rx.borrow().clone()
    }

    pub fn location(&self) -> LocationState {
        self.location_rx.borrow().clone()
    }

    /// Current result list, re-derived only if an input changed since the
    /// last call.
    pub fn outcome(&mut self) -> Arc<FilterOutcome> {
        let records = self.records_rx.borrow_and_update().clone();
        let location = self.location_rx.borrow_and_update().clone();
        self.deriver
            .outcome(&records, &self.query, self.selection.active(), &location)
    }

    /// Wait until either source publishes a value not yet seen by
    /// [`DirectoryScreen::outcome`].
    ///
    /// Does not return once both sources are finished; check
    /// [`DirectoryScreen::is_settled`] first.
    pub async fn changed(&mut self) {
        loop {
            tokio::select! {
                res = self.records_rx.changed() => {
                    if res.is_ok() {
                        return;
                    }
                }
                res = self.location_rx.changed(), if !self.location_closed => {
                    match res {
                        Ok(()) => return,
                        Err(_) => self.location_closed = true,
                    }
                }
            }
        }
    }

    /// Neither the record fetch nor the location acquisition is in flight.
    pub fn is_settled(&self) -> bool {
        !self.records_rx.borrow().is_loading() && !self.location_rx.borrow().is_pending()
    }

    /// Wait for both sources to finish, then derive.
    pub async fn settled(&mut self) -> Arc<FilterOutcome> {
        let _ = self.records_rx.wait_for(|s| !s.is_loading()).await;
        if self.location_rx.wait_for(|s| !s.is_pending()).await.is_err() {
            self.location_closed = true;
        }
        self.outcome()
    }

    /// Drop the current record set and fetch again. The previous set is not
    /// kept while the new fetch is in flight.
    pub fn retry_records(&mut self) {
        self.record_task.abort();
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.records_tx.send_replace(RecordState::Loading);
        self.record_task = spawn_fetch(
            Arc::clone(&self.record_provider),
            Arc::clone(&self.records_tx),
            Arc::clone(&self.fetch_generation),
            generation,
        );
        info!(generation, "Retrying tailor fetch");
    }

    /// Abandon whatever is still in flight.
    pub fn deactivate(self) {
        drop(self);
    }

    /// Number of real derivations so far.
    pub fn derivations(&self) -> u64 {
        self.deriver.derivations()
    }
}

impl Drop for DirectoryScreen {
    fn drop(&mut self) {
        self.record_task.abort();
        self.location_task.abort();
        debug!("Directory screen deactivated");
    }
}

/// Run one fetch and publish its result, unless a newer fetch has been
/// started in the meantime. `abort` alone cannot stop a task that is already
/// past its last await point.
fn spawn_fetch(
    provider: Arc<dyn RecordProvider>,
    sink: Arc<watch::Sender<RecordState>>,
    current: Arc<AtomicU64>,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let state = load_records(provider.as_ref()).await;
        let published = sink.send_if_modified(|slot| {
            if current.load(Ordering::SeqCst) != generation {
                return false;
            }
            *slot = state;
            true
        });
        if !published {
            debug!(generation, "Discarding superseded tailor fetch");
        }
    })
}
