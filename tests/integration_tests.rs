use std::sync::Arc;

use train_late::lookup::Lookup;
use train_late::parser::parse_feed;
use train_late::resolver::{DelayResult, resolve};
use train_late::schedule::ScheduleIndex;
use train_late::source::StubFeed;

const ROUTES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/routes.txt");
const TRIPS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/trips.txt");
const FEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_nswtrains.pb");

#[test]
fn test_feed_fixture_decodes() {
    let bytes = include_bytes!("fixtures/sample_nswtrains.pb");
    let feed = parse_feed(bytes).expect("Failed to parse feed");

    assert_eq!(feed.header.gtfs_realtime_version, "2.0");
    assert_eq!(feed.entity.len(), 4);
    assert_eq!(resolve(&feed, "T1.101"), DelayResult::MinutesLate(5));
    assert_eq!(resolve(&feed, "T2.200"), DelayResult::MinutesLate(-2));
}

#[test]
fn test_schedule_fixture_loads_rail_only() {
    let schedule = ScheduleIndex::load(ROUTES, TRIPS).expect("Failed to load schedule");

    let names: Vec<_> = schedule
        .routes_all()
        .iter()
        .map(|r| r.short_name.as_str())
        .collect();
    assert_eq!(names, vec!["T1", "T2"]);
    assert_eq!(schedule.trip_count(), 4);
    assert_eq!(schedule.orphaned_trip_count(), 1);
}

#[tokio::test]
async fn test_full_pipeline() {
    let schedule = Arc::new(ScheduleIndex::load(ROUTES, TRIPS).unwrap());
    let source = Arc::new(StubFeed::from_path(FEED).unwrap());
    let lookup = Lookup::new(schedule, source);

    let routes = lookup.get_routes();
    assert_eq!(routes[0].id, "NTH_2a");
    assert_eq!(routes[0].long_name, "North Shore & Western Line");

    let trips: Vec<_> = lookup
        .get_trips(&routes[0].id)
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(trips, vec!["T1.100", "T1.101"]);

    let late = lookup.get_lateness("T1.101").await.unwrap();
    assert_eq!(late.result, DelayResult::MinutesLate(5));
    assert!(late.feed_timestamp.is_some());

    let no_updates = lookup.get_lateness("T1.100").await.unwrap();
    assert_eq!(no_updates.result, DelayResult::NoData);

    let unknown = lookup.get_lateness("B199.1").await.unwrap();
    assert_eq!(unknown.result, DelayResult::NoData);
}
