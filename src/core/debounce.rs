use crate::core::browse::BrowseState;
use crate::domain::model::{SortOrder, VenueRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the list screen renders at a given moment.
#[derive(Debug, Clone, Default)]
pub struct BrowseSnapshot {
    pub query: String,
    pub sort_order: SortOrder,
    pub searching: bool,
    pub venues: Vec<Arc<VenueRecord>>,
}

struct Inner {
    browse: BrowseState,
    generation: u64,
    searching: bool,
    pending: Option<JoinHandle<()>>,
}

impl Inner {
    fn snapshot(&self) -> BrowseSnapshot {
        BrowseSnapshot {
            query: self.browse.query().to_string(),
            sort_order: self.browse.sort_order(),
            searching: self.searching,
            venues: self.browse.displayed().to_vec(),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

struct Shared {
    state: Mutex<Inner>,
    updates: watch::Sender<BrowseSnapshot>,
}

impl Shared {
    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(inner.snapshot());
    }
}

/// [`BrowseState`] behind a search debounce.
///
/// Every call to [`Self::search`] supersedes the previous one: the older
/// timer is aborted, and a timer that already woke checks its generation
/// under the lock before touching the list, so results are never applied out
/// of order.
pub struct DebouncedBrowser {
    shared: Arc<Shared>,
    delay: Duration,
}

impl DebouncedBrowser {
    pub fn new(state: BrowseState, delay: Duration) -> Self {
        let inner = Inner {
            browse: state,
            generation: 0,
            searching: false,
            pending: None,
        };
        let (updates, _) = watch::channel(inner.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(inner),
                updates,
            }),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn search(&self, query: &str) {
        let mut inner = self.shared.state.lock().await;
        inner.cancel_pending();
        inner.generation += 1;
        inner.browse.set_query(query);
        inner.searching = true;
        self.shared.publish(&inner);

        let generation = inner.generation;
        let shared = Arc::clone(&self.shared);
        let delay = self.delay;
        let query = query.to_string();

        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut inner = shared.state.lock().await;
            if inner.generation != generation {
                tracing::trace!(%query, "discarding superseded search");
                return;
            }
            inner.browse.apply_query(&query);
            inner.searching = false;
            inner.pending = None;
            shared.publish(&inner);
        }));
    }

    pub async fn clear_search(&self) {
        self.search("").await;
    }

    /// Applies the latest query now instead of waiting for the timer.
    pub async fn flush(&self) {
        let mut inner = self.shared.state.lock().await;
        if !inner.searching {
            return;
        }
        inner.cancel_pending();
        inner.generation += 1;
        let query = inner.browse.query().to_string();
        inner.browse.apply_query(&query);
        inner.searching = false;
        self.shared.publish(&inner);
    }

    pub async fn toggle_sort(&self) -> SortOrder {
        let mut inner = self.shared.state.lock().await;
        let order = inner.browse.toggle_sort();
        if !order.is_sorted() && inner.searching {
            // the typed query is now applied, so the timer has nothing left to do
            inner.cancel_pending();
            inner.generation += 1;
            inner.searching = false;
        }
        self.shared.publish(&inner);
        order
    }

    pub async fn replace_venues(&self, venues: Vec<Arc<VenueRecord>>) {
        let mut inner = self.shared.state.lock().await;
        inner.browse.replace_venues(venues);
        self.shared.publish(&inner);
    }

    pub async fn snapshot(&self) -> BrowseSnapshot {
        self.shared.state.lock().await.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowseSnapshot> {
        self.shared.updates.subscribe()
    }
}

impl Drop for DebouncedBrowser {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.state.try_lock() {
            inner.cancel_pending();
        }
    }
}
