use crate::core::browse::BrowseState;
use crate::core::debounce::DebouncedBrowser;
use crate::core::favourites::{favourite_venues, FavouritesManager};
use crate::core::filter::filter_venues;
use crate::core::ranking::sort_by_distance;
use crate::core::{ConfigProvider, KeyValueStore, VenueSource};
use crate::domain::model::{FavouriteIds, SortOrder, VenueCatalog, VenueRecord};
use std::sync::Arc;
use std::time::Instant;

/// A venue together with whether the user has favourited it.
#[derive(Debug, Clone)]
pub struct VenueListing {
    pub venue: Arc<VenueRecord>,
    pub is_favourite: bool,
}

/// Wires the venue source, the favourites store and the configuration
/// together for one user session.
pub struct VenueService<S: VenueSource, K: KeyValueStore + Clone, C: ConfigProvider> {
    source: S,
    store: K,
    config: C,
}

impl<S: VenueSource, K: KeyValueStore + Clone, C: ConfigProvider> VenueService<S, K, C> {
    pub fn new(source: S, store: K, config: C) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Fetches the venue list. A failed fetch is logged and yields an empty
    /// catalog so the caller can still render.
    pub async fn fetch_catalog(&self) -> VenueCatalog {
        let start = Instant::now();
        match self.source.fetch_venues().await {
            Ok(venues) => {
                tracing::info!(
                    source = self.source.name(),
                    count = venues.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "fetched venues"
                );
                VenueCatalog::new(venues)
            }
            Err(e) => {
                tracing::error!(source = self.source.name(), "Failed to load venues: {}", e);
                VenueCatalog::empty()
            }
        }
    }

    pub fn favourites(&self) -> FavouritesManager<K> {
        FavouritesManager::new(self.store.clone(), self.config.favourites_key())
            .with_undo_window(self.config.undo_window())
    }

    pub fn browser(&self, catalog: &VenueCatalog) -> DebouncedBrowser {
        DebouncedBrowser::new(
            BrowseState::new(catalog.venues.clone()),
            self.config.debounce(),
        )
    }

    /// One-shot search over `catalog`: filter, then rank when a direction is
    /// given.
    pub async fn list(&self, catalog: &VenueCatalog, query: &str, sort: SortOrder) -> Vec<VenueListing> {
        let favourites = self.favourites().load().await;

        let filtered = filter_venues(&catalog.venues, query);
        let ordered = match sort {
            SortOrder::None => filtered,
            SortOrder::Ascending => sort_by_distance(&filtered, true),
            SortOrder::Descending => sort_by_distance(&filtered, false),
        };

        annotate(ordered, &favourites)
    }

    pub async fn favourite_listings(&self, catalog: &VenueCatalog) -> Vec<VenueListing> {
        let favourites = self.favourites().load().await;
        annotate(favourite_venues(&catalog.venues, &favourites), &favourites)
    }
}

fn annotate(venues: Vec<Arc<VenueRecord>>, favourites: &FavouriteIds) -> Vec<VenueListing> {
    venues
        .into_iter()
        .map(|venue| VenueListing {
            is_favourite: favourites.contains(venue.id),
            venue,
        })
        .collect()
}
