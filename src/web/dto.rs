//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resolver::DelayResult;
use crate::source::LatenessReport;

#[derive(Debug, Deserialize)]
pub struct TripsQuery {
    #[serde(default)]
    pub route: String,
}

#[derive(Debug, Deserialize)]
pub struct LatenessQuery {
    #[serde(default)]
    pub trip: String,
}

/// `{tripId, minutesLate, feedTimestamp}` or `{tripId, noData: true, feedTimestamp}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LatenessResponse {
    pub trip_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_late: Option<i32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data: bool,
    pub feed_timestamp: Option<DateTime<Utc>>,
}

impl LatenessResponse {
    pub fn new(trip_id: impl Into<String>, report: LatenessReport) -> Self {
        let (minutes_late, no_data) = match report.result {
            DelayResult::MinutesLate(minutes) => (Some(minutes), false),
            DelayResult::NoData => (None, true),
        };
        Self {
            trip_id: trip_id.into(),
            minutes_late,
            no_data,
            feed_timestamp: report.feed_timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
