//! Static schedule: rail routes and their trips, loaded once at startup.
//!
//! [`loader`] reads the reference CSV files. [`ScheduleIndex`] owns the
//! loaded records and answers route and trip browsing queries.

mod index;
pub mod loader;

pub use index::ScheduleIndex;
pub use loader::{RAIL_MODES, Route, Trip};
