use crate::domain::model::VenueRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Local string key-value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn favourites_key(&self) -> &str;
    fn debounce(&self) -> Duration;
    fn undo_window(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
}

#[async_trait]
pub trait VenueSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_venues(&self) -> Result<Vec<VenueRecord>>;
}
