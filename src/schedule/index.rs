use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::loader::{Route, Trip, load_routes, load_trips};
use crate::error::ScheduleError;

/// Immutable, in-memory view of the static schedule.
///
/// Built once before serving and shared read-only afterwards. Trips whose
/// route id names no loaded route are kept but cannot be reached by browsing
/// from [`ScheduleIndex::routes_all`].
#[derive(Debug, Default)]
pub struct ScheduleIndex {
    routes: Vec<Route>,
    trips: Vec<Trip>,
    trips_by_route: HashMap<String, Vec<usize>>,
}

impl ScheduleIndex {
    pub fn new(routes: Vec<Route>, trips: Vec<Trip>) -> Self {
        let mut trips_by_route: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, trip) in trips.iter().enumerate() {
            trips_by_route
                .entry(trip.route_id.clone())
                .or_default()
                .push(pos);
        }

        Self {
            routes,
            trips,
            trips_by_route,
        }
    }

    /// Loads both reference files and indexes them.
    ///
    /// # Errors
    ///
    /// Any [`ScheduleError`] from either file; nothing is returned partially.
    pub fn load(
        routes_path: impl AsRef<Path>,
        trips_path: impl AsRef<Path>,
    ) -> Result<Self, ScheduleError> {
        let routes = load_routes(routes_path)?;
        let trips = load_trips(trips_path)?;
        let index = Self::new(routes, trips);

        debug!(
            orphaned_trips = index.orphaned_trip_count(),
            "Trips without a rail route"
        );
        Ok(index)
    }

    /// All routes in file order.
    pub fn routes_all(&self) -> &[Route] {
        &self.routes
    }

    /// Trips of `route_id` in file order. Empty for unknown ids.
    pub fn trips_for_route(&self, route_id: &str) -> Vec<&Trip> {
        self.trips_by_route
            .get(route_id)
            .map(|positions| positions.iter().map(|&pos| &self.trips[pos]).collect())
            .unwrap_or_default()
    }

    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    /// Number of trips whose route id matches no loaded route.
    pub fn orphaned_trip_count(&self) -> usize {
        self.trips_by_route
            .iter()
            .filter(|(route_id, _)| self.route(route_id).is_none())
            .map(|(_, positions)| positions.len())
            .sum()
    }
}
