use crate::domain::model::VenueRecord;
use std::borrow::Borrow;

/// Orders venues by `distance_km` with a middle-pivot three-way quicksort.
///
/// Venues with equal distances keep their input order in both directions,
/// since the equal partition is never reordered. Works on owned records as
/// well as `&VenueRecord` or `Arc<VenueRecord>` handles; only the handles are
/// cloned.
///
/// Distances are compared exactly. Callers are expected to pass finite,
/// non-negative distances (see [`crate::utils::validation::validate_venue`]);
/// other inputs still terminate but their placement is unspecified.
pub fn sort_by_distance<T>(venues: &[T], ascending: bool) -> Vec<T>
where
    T: Borrow<VenueRecord> + Clone,
{
    if venues.len() <= 1 {
        return venues.to_vec();
    }

    let pivot_index = venues.len() / 2;
    let pivot = venues[pivot_index].borrow().distance_km;

    let mut less = Vec::new();
    let mut equal = Vec::new();
    let mut greater = Vec::new();

    for (index, venue) in venues.iter().enumerate() {
        let distance = venue.borrow().distance_km;
        if index == pivot_index || distance == pivot {
            equal.push(venue.clone());
        } else if distance < pivot {
            less.push(venue.clone());
        } else {
            greater.push(venue.clone());
        }
    }

    let (head, tail) = if ascending {
        (less, greater)
    } else {
        (greater, less)
    };

    let mut sorted = sort_by_distance(&head, ascending);
    sorted.reserve(venues.len() - sorted.len());
    sorted.extend(equal);
    sorted.extend(sort_by_distance(&tail, ascending));
    sorted
}
