//! The lookup interface offered to presentation layers.
//!
//! Route and trip browsing is served from the in-memory [`ScheduleIndex`]
//! and works offline. Lateness goes to the configured [`LatenessSource`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::LatenessError;
use crate::schedule::{Route, ScheduleIndex, Trip};
use crate::source::{LatenessReport, LatenessSource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id.clone(),
            short_name: route.short_name.clone(),
            long_name: route.long_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub id: String,
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.clone(),
        }
    }
}

/// Schedule browsing plus realtime lateness, shared by every request.
#[derive(Clone)]
pub struct Lookup {
    schedule: Arc<ScheduleIndex>,
    source: Arc<dyn LatenessSource>,
}

impl Lookup {
    pub fn new(schedule: Arc<ScheduleIndex>, source: Arc<dyn LatenessSource>) -> Self {
        Self { schedule, source }
    }

    pub fn schedule(&self) -> &ScheduleIndex {
        &self.schedule
    }

    /// Rail routes in file order.
    pub fn get_routes(&self) -> Vec<RouteSummary> {
        self.schedule
            .routes_all()
            .iter()
            .map(RouteSummary::from)
            .collect()
    }

    /// Trips of `route_id` in file order; empty for unknown routes.
    pub fn get_trips(&self, route_id: &str) -> Vec<TripSummary> {
        self.schedule
            .trips_for_route(route_id)
            .into_iter()
            .map(TripSummary::from)
            .collect()
    }

    /// Current lateness of `trip_id`.
    ///
    /// # Errors
    ///
    /// Any [`LatenessError`] from the source. Failures are logged here and
    /// affect only this call.
    #[tracing::instrument(skip(self))]
    pub async fn get_lateness(&self, trip_id: &str) -> Result<LatenessReport, LatenessError> {
        match self.source.lateness(trip_id).await {
            Ok(report) => {
                info!(result = ?report.result, "Lateness resolved");
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "Lateness lookup failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::MockClient;
    use crate::fetch::RealtimeClient;
    use crate::gtfs_rt::FeedMessage;
    use crate::resolver::DelayResult;
    use crate::source::{LiveFeed, StubFeed};

    fn schedule() -> Arc<ScheduleIndex> {
        let routes = vec![
            Route {
                id: "ZZ".into(),
                short_name: "T1".into(),
                long_name: "North Shore".into(),
            },
            Route {
                id: "AA".into(),
                short_name: "T2".into(),
                long_name: "Inner West".into(),
            },
        ];
        let trips = vec![
            Trip {
                route_id: "AA".into(),
                id: "a-1".into(),
            },
            Trip {
                route_id: "ZZ".into(),
                id: "z-1".into(),
            },
            Trip {
                route_id: "AA".into(),
                id: "a-2".into(),
            },
        ];
        Arc::new(ScheduleIndex::new(routes, trips))
    }

    fn stub_lookup() -> Lookup {
        Lookup::new(schedule(), Arc::new(StubFeed::new(FeedMessage::default())))
    }

    #[test]
    fn test_get_routes_in_file_order() {
        let routes = stub_lookup().get_routes();
        let names: Vec<_> = routes.iter().map(|r| r.short_name.as_str()).collect();
        assert_eq!(names, vec!["T1", "T2"]);
        assert_eq!(routes[0].id, "ZZ");
    }

    #[test]
    fn test_get_trips() {
        let lookup = stub_lookup();
        assert_eq!(
            lookup.get_trips("AA"),
            vec![
                TripSummary { id: "a-1".into() },
                TripSummary { id: "a-2".into() },
            ]
        );
        assert!(lookup.get_trips("unknown").is_empty());
    }

    #[tokio::test]
    async fn test_get_lateness_no_data_from_empty_stub() {
        let report = stub_lookup().get_lateness("a-1").await.unwrap();
        assert_eq!(report.result, DelayResult::NoData);
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_network() {
        let http = Arc::new(MockClient::ok(Vec::new()));
        let client = RealtimeClient::new(http.clone(), "http://feed.test/".parse().unwrap());
        let lookup = Lookup::new(schedule(), Arc::new(LiveFeed::new(client, None)));

        let err = lookup.get_lateness("a-1").await.unwrap_err();

        assert!(matches!(err, LatenessError::AuthMissing));
        assert_eq!(http.calls(), 0);
        // browsing still works without a credential
        assert_eq!(lookup.get_routes().len(), 2);
    }

    #[test]
    fn test_route_summary_json() {
        let json = serde_json::to_value(&stub_lookup().get_routes()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "ZZ", "shortName": "T1", "longName": "North Shore"})
        );
    }
}
