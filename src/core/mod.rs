pub mod browse;
pub mod debounce;
pub mod favourites;
pub mod filter;
pub mod ranking;
pub mod service;

pub use crate::domain::model::{FavouriteIds, SortOrder, VenueCatalog, VenueRecord};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore, VenueSource};
pub use crate::utils::error::Result;
