// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod storage;

pub use http::HttpVenueSource;
pub use storage::JsonFileStore;
