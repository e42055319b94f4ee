use crate::core::KeyValueStore;
use crate::domain::model::{FavouriteIds, VenueRecord};
use crate::utils::error::{Result, VenueError};
use std::borrow::Borrow;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_FAVOURITES_KEY: &str = "favorites";
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// Handle for reverting one favourite removal.
#[derive(Debug, Clone)]
pub struct UndoToken {
    pub removed_id: i64,
    previous: FavouriteIds,
    expires_at: Instant,
}

impl UndoToken {
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct FavouritesManager<K: KeyValueStore> {
    store: K,
    key: String,
    undo_window: Duration,
}

impl<K: KeyValueStore> FavouritesManager<K> {
    pub fn new(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            undo_window: DEFAULT_UNDO_WINDOW,
        }
    }

    pub fn with_undo_window(mut self, undo_window: Duration) -> Self {
        self.undo_window = undo_window;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn try_load(&self) -> Result<FavouriteIds> {
        match self.store.get(&self.key).await? {
            Some(raw) => {
                let ids: FavouriteIds = serde_json::from_str(&raw)?;
                // collecting drops duplicates a hand-edited file may contain
                Ok(ids.iter().collect())
            }
            None => Ok(FavouriteIds::new()),
        }
    }

    /// Loads the persisted favourites, falling back to an empty set when the
    /// store cannot be read or holds something unparseable.
    pub async fn load(&self) -> FavouriteIds {
        match self.try_load().await {
            Ok(ids) => {
                tracing::debug!(count = ids.len(), key = %self.key, "loaded favourites");
                ids
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to load favourites: {}", e);
                FavouriteIds::new()
            }
        }
    }

    pub async fn save(&self, ids: &FavouriteIds) -> Result<()> {
        let raw = serde_json::to_string(ids)?;
        self.store.set(&self.key, &raw).await?;
        tracing::debug!(count = ids.len(), key = %self.key, "saved favourites");
        Ok(())
    }

    pub fn toggle(&self, venue_id: i64, ids: &FavouriteIds) -> FavouriteIds {
        let mut updated = ids.clone();
        updated.toggle(venue_id);
        updated
    }

    pub fn is_favourite(&self, venue_id: i64, ids: &FavouriteIds) -> bool {
        ids.contains(venue_id)
    }

    /// Toggles `venue_id` in the persisted set. A read failure is returned
    /// as-is so the stored list is never overwritten from an empty fallback.
    pub async fn toggle_and_save(&self, venue_id: i64) -> Result<FavouriteIds> {
        let current = self.try_load().await?;
        let updated = self.toggle(venue_id, &current);
        self.save(&updated).await?;
        tracing::info!(
            venue_id,
            favourite = updated.contains(venue_id),
            "toggled favourite"
        );
        Ok(updated)
    }

    /// Removes `venue_id` and persists the result. The returned token can
    /// restore the previous set until the undo window closes.
    pub async fn remove_with_undo(
        &self,
        venue_id: i64,
        ids: &FavouriteIds,
    ) -> Result<(FavouriteIds, UndoToken)> {
        let mut updated = ids.clone();
        updated.remove(venue_id);
        self.save(&updated).await?;

        let token = UndoToken {
            removed_id: venue_id,
            previous: ids.clone(),
            expires_at: Instant::now() + self.undo_window,
        };
        Ok((updated, token))
    }

    /// Removes the most recently favourited venue, if any.
    pub async fn remove_last_with_undo(&self) -> Result<Option<(FavouriteIds, UndoToken)>> {
        let current = self.try_load().await?;
        match current.last_added() {
            Some(venue_id) => {
                let removed = self.remove_with_undo(venue_id, &current).await?;
                tracing::info!(venue_id, "removed last favourite");
                Ok(Some(removed))
            }
            None => Ok(None),
        }
    }

    pub async fn undo(&self, token: UndoToken) -> Result<FavouriteIds> {
        if token.is_expired() {
            return Err(VenueError::UndoExpired);
        }
        self.save(&token.previous).await?;
        tracing::info!(venue_id = token.removed_id, "restored favourite");
        Ok(token.previous)
    }
}

/// Resolves favourite ids to venues, most recently favourited first. Ids
/// without a matching venue are skipped.
pub fn favourite_venues<T>(venues: &[T], ids: &FavouriteIds) -> Vec<T>
where
    T: Borrow<VenueRecord> + Clone,
{
    ids.iter()
        .rev()
        .filter_map(|id| venues.iter().find(|&venue| venue.borrow().id == id).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Clone, Default)]
    struct MockStore {
        values: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MockStore {
        async fn raw(&self, key: &str) -> Option<String> {
            self.values.lock().await.get(key).cloned()
        }
    }

    impl KeyValueStore for MockStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values
                .lock()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Serves writes normally but can be switched to fail every read.
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: MockStore,
        fail_reads: Arc<AtomicBool>,
    }

    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(VenueError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Interrupted,
                    "keychain busy",
                )));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value).await
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(VenueError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "keychain locked",
            )))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(VenueError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "keychain locked",
            )))
        }
    }

    fn manager() -> (MockStore, FavouritesManager<MockStore>) {
        let store = MockStore::default();
        (store.clone(), FavouritesManager::new(store, DEFAULT_FAVOURITES_KEY))
    }

    #[tokio::test]
    async fn test_missing_key_loads_empty() {
        let (_, favourites) = manager();
        assert!(favourites.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_and_save_round_trip() {
        let (store, favourites) = manager();
        assert_ok!(favourites.toggle_and_save(4).await);
        assert_ok!(favourites.toggle_and_save(9).await);
        assert_eq!(store.raw("favorites").await.as_deref(), Some("[4,9]"));

        let ids = favourites.toggle_and_save(4).await.unwrap();
        assert_eq!(ids.as_slice(), &[9]);
        assert_eq!(favourites.load().await, ids);
        assert!(favourites.is_favourite(9, &ids));
        assert!(!favourites.is_favourite(4, &ids));
    }

    #[tokio::test]
    async fn test_corrupt_value_degrades_to_empty() {
        let (store, favourites) = manager();
        store.set("favorites", "{not json").await.unwrap();
        assert!(favourites.try_load().await.is_err());
        assert!(favourites.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_in_store_are_dropped() {
        let (store, favourites) = manager();
        store.set("favorites", "[3,1,3,2,1]").await.unwrap();
        assert_eq!(favourites.load().await.as_slice(), &[3, 1, 2]);
    }

    #[tokio::test]
    async fn test_broken_store() {
        let favourites = FavouritesManager::new(BrokenStore, "favorites");
        assert!(favourites.load().await.is_empty());
        assert_err!(favourites.save(&FavouriteIds::new()).await);
        assert_err!(favourites.toggle_and_save(1).await);
    }

    #[tokio::test]
    async fn test_toggle_after_failed_read_keeps_stored_list() {
        let store = FlakyStore::default();
        let favourites = FavouritesManager::new(store.clone(), "favorites");
        store.set("favorites", "[1,2,3]").await.unwrap();
        store.fail_reads.store(true, Ordering::SeqCst);

        assert_err!(favourites.toggle_and_save(4).await);
        assert_eq!(store.inner.raw("favorites").await.as_deref(), Some("[1,2,3]"));

        store.fail_reads.store(false, Ordering::SeqCst);
        let ids = favourites.toggle_and_save(4).await.unwrap();
        assert_eq!(ids.as_slice(), &[1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_corrupt_value_blocks_toggle() {
        let (store, favourites) = manager();
        store.set("favorites", "{not json").await.unwrap();
        assert_err!(favourites.toggle_and_save(4).await);
        assert_eq!(store.raw("favorites").await.as_deref(), Some("{not json"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_last_removes_most_recent_and_can_be_undone() {
        let (_, favourites) = manager();
        assert!(favourites.remove_last_with_undo().await.unwrap().is_none());

        let ids: FavouriteIds = [5, 8, 2].into_iter().collect();
        favourites.save(&ids).await.unwrap();

        let (updated, token) = favourites.remove_last_with_undo().await.unwrap().unwrap();
        assert_eq!(token.removed_id, 2);
        assert_eq!(updated.as_slice(), &[5, 8]);
        assert_eq!(favourites.load().await, updated);

        let restored = favourites.undo(token).await.unwrap();
        assert_eq!(restored.as_slice(), &[5, 8, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_inside_window_restores_previous_set() {
        let (_, favourites) = manager();
        let ids: FavouriteIds = [1, 2, 3].into_iter().collect();
        favourites.save(&ids).await.unwrap();

        let (updated, token) = favourites.remove_with_undo(2, &ids).await.unwrap();
        assert_eq!(updated.as_slice(), &[1, 3]);
        assert_eq!(favourites.load().await, updated);

        tokio::time::sleep(Duration::from_secs(4)).await;
        let restored = favourites.undo(token).await.unwrap();
        assert_eq!(restored.as_slice(), &[1, 2, 3]);
        assert_eq!(favourites.load().await, restored);
    }

    #[tokio::test(start_paused = true)]
    async fn test_undo_after_window_fails() {
        let (_, favourites) = manager();
        let favourites = favourites.with_undo_window(Duration::from_secs(2));
        let ids: FavouriteIds = [7].into_iter().collect();

        let (_, token) = favourites.remove_with_undo(7, &ids).await.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(token.is_expired());
        assert!(matches!(
            favourites.undo(token).await,
            Err(VenueError::UndoExpired)
        ));
        assert!(favourites.load().await.is_empty());
    }

    #[test]
    fn test_favourite_venues_most_recent_first() {
        let venues = vec![
            VenueRecord::new(1, "Arena A", "", 5.0),
            VenueRecord::new(2, "Arena B", "", 2.0),
            VenueRecord::new(3, "Arena C", "", 2.0),
        ];
        let ids: FavouriteIds = [3, 99, 1].into_iter().collect();

        let resolved: Vec<i64> = favourite_venues(&venues, &ids).iter().map(|v| v.id).collect();
        assert_eq!(resolved, vec![1, 3]);
    }
}
