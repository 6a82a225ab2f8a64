use crate::error::ServiceError;
use crate::services::{InventoryCandidate, InventorySearch};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// What one call to [`SearchCoordinator::query`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    /// Fresh results for the latest query text.
    Results(Vec<InventoryCandidate>),
    /// A newer query was issued (or the coordinator was invalidated) while
    /// this one was pending; the caller must not render anything from it.
    Superseded,
}

/// Debounced search-as-you-type against the inventory endpoint.
///
/// Every call takes a generation ticket. The debounce window suppresses the
/// request entirely when a newer keystroke lands first, and a response that
/// arrives after a newer query has been issued is discarded. Display order is
/// therefore last-issued-query-wins, not last-to-arrive.
pub struct SearchCoordinator<S> {
    client: S,
    debounce: Duration,
    generation: AtomicU64,
}

impl<S: InventorySearch> SearchCoordinator<S> {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

    pub fn new(client: S) -> Self {
        Self::with_debounce(client, Self::DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(client: S, debounce: Duration) -> Self {
        Self {
            client,
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    /// Runs one debounced query for the current input text.
    ///
    /// Transport errors are only surfaced when the query is still the latest;
    /// a stale error is as irrelevant as a stale result.
    pub async fn query(&self, text: &str) -> Result<SearchResponse, ServiceError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;
        if self.is_stale(ticket) {
            debug!(query = text, "debounced: newer input arrived before dispatch");
            return Ok(SearchResponse::Superseded);
        }

        let outcome = self.client.search(text).await;
        if self.is_stale(ticket) {
            debug!(query = text, "discarding stale search response");
            return Ok(SearchResponse::Superseded);
        }
        Ok(SearchResponse::Results(outcome?))
    }

    /// Invalidates every in-flight query, e.g. when the search box closes
    /// mid-request. Late arrivals resolve to [`SearchResponse::Superseded`]
    /// instead of touching any state.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != ticket
    }
}
