//! Aggregation engine: one request end to end.
//!
//! validate id -> snapshot -> fetch (no lock held) -> merge -> average.

use std::sync::Arc;

use common::{window_average, CategoryId, Error, WindowReport};
use numbers_client::NumberSource;
use tracing::debug;

use crate::store::WindowStore;

/// Orchestrates window requests over a shared store and a number source.
#[derive(Clone)]
pub struct Aggregator {
    store: Arc<WindowStore>,
    source: Arc<dyn NumberSource>,
}

impl Aggregator {
    pub fn new(store: Arc<WindowStore>, source: Arc<dyn NumberSource>) -> Self {
        Self { store, source }
    }

    pub fn store(&self) -> &WindowStore {
        &self.store
    }

    /// Handle a raw category token from the request path.
    ///
    /// Only an unknown token fails; provider outages yield an unchanged
    /// window and an empty `fetched_numbers`.
    pub async fn handle(&self, raw_id: &str) -> Result<WindowReport, Error> {
        let category: CategoryId = raw_id.parse()?;
        Ok(self.aggregate(category).await)
    }

    pub async fn aggregate(&self, category: CategoryId) -> WindowReport {
        let previous = self.store.snapshot().await;

        let fetched = self.source.fetch(category).await.into_numbers();

        let merge = self.store.merge_and_evict(&fetched).await;
        debug!(
            "{}: fetched={} inserted={} evicted={} window={}",
            category,
            fetched.len(),
            merge.inserted.len(),
            merge.evicted.len(),
            merge.window.len()
        );

        let average = window_average(&merge.window);

        WindowReport {
            previous_window_state: previous,
            current_window_state: merge.window,
            fetched_numbers: fetched,
            average,
        }
    }
}
