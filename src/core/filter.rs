use crate::domain::model::VenueRecord;
use std::borrow::Borrow;

/// Keeps venues whose name, address or any sport tag contains `query`,
/// ignoring case. Input order is preserved.
///
/// An empty or whitespace-only query returns every venue, so clearing the
/// search box restores the full list. The query itself is not trimmed.
pub fn filter_venues<T>(venues: &[T], query: &str) -> Vec<T>
where
    T: Borrow<VenueRecord> + Clone,
{
    if query.trim().is_empty() {
        return venues.to_vec();
    }

    let lower_query = query.to_lowercase();
    venues
        .iter()
        .filter(|&venue| venue.borrow().matches_lowercase(&lower_query))
        .cloned()
        .collect()
}
