use crate::core::filter::filter_venues;
use crate::core::ranking::sort_by_distance;
use crate::domain::model::{SortOrder, VenueRecord};
use std::sync::Arc;

/// Query and sort state of the venue list screen.
///
/// `displayed` is always the filter result for `applied_query`, ranked by
/// `sort_order` when a direction is selected.
#[derive(Debug, Clone, Default)]
pub struct BrowseState {
    full: Vec<Arc<VenueRecord>>,
    query: String,
    applied_query: String,
    sort_order: SortOrder,
    filtered: Vec<Arc<VenueRecord>>,
    displayed: Vec<Arc<VenueRecord>>,
}

impl BrowseState {
    pub fn new(venues: Vec<Arc<VenueRecord>>) -> Self {
        Self {
            filtered: venues.clone(),
            displayed: venues.clone(),
            full: venues,
            ..Self::default()
        }
    }

    /// Swaps in a freshly fetched collection, keeping query and sort.
    pub fn replace_venues(&mut self, venues: Vec<Arc<VenueRecord>>) {
        self.full = venues;
        self.refilter();
        self.rerank();
    }

    /// Records the query the user is typing and resets the sort. The
    /// displayed list is left alone until [`Self::apply_query`].
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.sort_order = SortOrder::None;
    }

    pub fn apply_query(&mut self, query: &str) {
        self.set_query(query);
        self.applied_query = query.to_string();
        self.refilter();
        self.displayed = self.filtered.clone();
        tracing::debug!(
            query = %self.applied_query,
            matches = self.displayed.len(),
            "applied venue search"
        );
    }

    /// Advances the sort cycle and returns the new order.
    ///
    /// Returning to unsorted filters the full list with the typed query,
    /// which also settles a query that has not been applied yet.
    pub fn toggle_sort(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.next();
        if self.sort_order.is_sorted() {
            self.rerank();
        } else {
            // back to the filter order, nothing to unsort
            self.applied_query = self.query.clone();
            self.refilter();
            self.displayed = self.filtered.clone();
        }
        tracing::debug!(order = %self.sort_order, "toggled venue sort");
        self.sort_order
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn applied_query(&self) -> &str {
        &self.applied_query
    }

    pub fn is_query_pending(&self) -> bool {
        self.query != self.applied_query
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn displayed(&self) -> &[Arc<VenueRecord>] {
        &self.displayed
    }

    pub fn full(&self) -> &[Arc<VenueRecord>] {
        &self.full
    }

    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    fn refilter(&mut self) {
        self.filtered = filter_venues(&self.full, &self.applied_query);
    }

    fn rerank(&mut self) {
        self.displayed = match self.sort_order {
            SortOrder::None => self.filtered.clone(),
            SortOrder::Ascending => sort_by_distance(&self.filtered, true),
            SortOrder::Descending => sort_by_distance(&self.filtered, false),
        };
    }
}
