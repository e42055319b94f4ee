//! Browse nearby sports venues: fetch the venue list, search and sort it by
//! distance, and keep a persisted list of favourites.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{HttpVenueSource, JsonFileStore};
pub use crate::core::browse::BrowseState;
pub use crate::core::debounce::{BrowseSnapshot, DebouncedBrowser};
pub use crate::core::favourites::{favourite_venues, FavouritesManager, UndoToken};
pub use crate::core::filter::filter_venues;
pub use crate::core::ranking::sort_by_distance;
pub use crate::core::service::{VenueListing, VenueService};
pub use crate::domain::model::{FavouriteIds, SortOrder, VenueCatalog, VenueRecord};
pub use crate::utils::error::{Result, VenueError};
