use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A sports venue as served by the remote venue API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "kilometres", alias = "distanceKm")]
    pub distance_km: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favourite: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<BTreeMap<String, f64>>,
}

impl VenueRecord {
    pub fn new(id: i64, name: impl Into<String>, address: impl Into<String>, distance_km: f64) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            distance_km,
            rating: 0.0,
            sports: Vec::new(),
            logo: None,
            featured: None,
            favourite: None,
            price: None,
        }
    }

    pub fn with_sports<I, S>(mut self, sports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sports = sports.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive substring match against name, address and sport tags.
    ///
    /// `lower_query` must already be lower-cased.
    pub fn matches_lowercase(&self, lower_query: &str) -> bool {
        self.name.to_lowercase().contains(lower_query)
            || self.address.to_lowercase().contains(lower_query)
            || self
                .sports
                .iter()
                .any(|sport| sport.to_lowercase().contains(lower_query))
    }
}

/// Display ordering of the venue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// none -> ascending -> descending -> none
    pub fn next(self) -> Self {
        match self {
            SortOrder::None => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
        }
    }

    pub fn is_sorted(self) -> bool {
        self != SortOrder::None
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SortOrder::None => "⇅",
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortOrder::None => "none",
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        };
        f.write_str(label)
    }
}

/// Favourite venue ids in insertion order, most recently added last.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavouriteIds(Vec<i64>);

impl FavouriteIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }

    /// Removes `id` if present, otherwise appends it. Returns whether the id
    /// is a favourite afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.remove(id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| *existing != id);
        self.0.len() != before
    }

    pub fn last_added(&self) -> Option<i64> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

impl FromIterator<i64> for FavouriteIds {
    /// Later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut ids = Vec::new();
        for id in iter {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self(ids)
    }
}

/// One fetch of the remote venue list.
#[derive(Debug, Clone)]
pub struct VenueCatalog {
    pub venues: Vec<Arc<VenueRecord>>,
    pub fetched_at: DateTime<Utc>,
}

impl VenueCatalog {
    pub fn new(venues: Vec<VenueRecord>) -> Self {
        Self {
            venues: venues.into_iter().map(Arc::new).collect(),
            fetched_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Arc<VenueRecord>> {
        self.venues.iter().find(|venue| venue.id == id)
    }
}
