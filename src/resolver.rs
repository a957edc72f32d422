//! Delay lookup over a decoded feed.

use serde::Serialize;

use crate::gtfs_rt::FeedMessage;

/// Outcome of looking a trip up in a feed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DelayResult {
    /// Departure delay in whole minutes; negative when early.
    MinutesLate(i32),
    /// The feed holds no usable departure delay for the trip.
    NoData,
}

/// Finds the departure delay of `trip_id` in `feed`.
///
/// Entities are scanned in document order. The first one whose trip update
/// names `trip_id` and whose first stop time update carries a departure delay
/// decides the result; later entities are not looked at. Matching entities
/// without such a delay are passed over.
pub fn resolve(feed: &FeedMessage, trip_id: &str) -> DelayResult {
    feed.entity
        .iter()
        .find_map(|entity| {
            let update = entity.trip_update.as_ref()?;
            if update.trip.trip_id.as_deref() != Some(trip_id) {
                return None;
            }
            update.stop_time_update.first()?.departure.as_ref()?.delay
        })
        .map(|seconds| DelayResult::MinutesLate(seconds_to_minutes(seconds)))
        .unwrap_or(DelayResult::NoData)
}

/// Whole minutes in `seconds`, truncated toward zero.
pub fn seconds_to_minutes(seconds: i32) -> i32 {
    seconds / 60
}
