//! CSV readers for the static `routes.txt` and `trips.txt` reference files.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::ScheduleError;

/// Values of the routes mode column that denote rail service.
///
/// Case-sensitive. Every other value is a bus, ferry or light rail route and is
/// dropped at load time.
pub const RAIL_MODES: [&str; 2] = ["x0001", "X0000"];

/// A rail route from `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: String,
    pub short_name: String,
    pub long_name: String,
}

/// A scheduled trip from `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub route_id: String,
    pub id: String,
}

/// Returns `true` if `mode` is one of the [`RAIL_MODES`].
pub fn is_rail_mode(mode: &str) -> bool {
    RAIL_MODES.contains(&mode)
}

/// Reads the rail routes from a routes file, in file order.
///
/// Columns 0, 2 and 3 are the id, short name and long name; column 1 is the
/// mode checked against [`RAIL_MODES`].
///
/// # Errors
///
/// [`ScheduleError::SourceUnavailable`] if the file cannot be opened and
/// [`ScheduleError::MalformedRecord`] on the first undecodable data row.
pub fn load_routes(path: impl AsRef<Path>) -> Result<Vec<Route>, ScheduleError> {
    let path = path.as_ref();
    let mut routes = Vec::new();
    let mut skipped = 0usize;

    read_rows(path, |record| {
        match parse_route(record)? {
            Some(route) => routes.push(route),
            None => skipped += 1,
        }
        Ok(())
    })?;

    debug!(path = %path.display(), skipped, "Dropped non-rail routes");
    info!(path = %path.display(), count = routes.len(), "Routes loaded");
    Ok(routes)
}

/// Reads every trip from a trips file, in file order.
///
/// Columns 0 and 2 are the route id and trip id. No rows are filtered out.
///
/// # Errors
///
/// Same as [`load_routes`].
pub fn load_trips(path: impl AsRef<Path>) -> Result<Vec<Trip>, ScheduleError> {
    let path = path.as_ref();
    let mut trips = Vec::new();

    read_rows(path, |record| {
        trips.push(parse_trip(record)?);
        Ok(())
    })?;

    info!(path = %path.display(), count = trips.len(), "Trips loaded");
    Ok(trips)
}

/// Maps a routes row to a [`Route`], or `None` when the row is not rail.
fn parse_route(record: &StringRecord) -> Result<Option<Route>, String> {
    if !is_rail_mode(column(record, 1)?) {
        return Ok(None);
    }

    Ok(Some(Route {
        id: column(record, 0)?.to_string(),
        short_name: column(record, 2)?.to_string(),
        long_name: column(record, 3)?.to_string(),
    }))
}

fn parse_trip(record: &StringRecord) -> Result<Trip, String> {
    Ok(Trip {
        route_id: column(record, 0)?.to_string(),
        id: column(record, 2)?.to_string(),
    })
}

fn column(record: &StringRecord, index: usize) -> Result<&str, String> {
    record
        .get(index)
        .ok_or_else(|| format!("missing column {index} (row has {} fields)", record.len()))
}

/// Feeds each data row of `path` to `on_row`, skipping the header.
///
/// The first row is discarded whether or not it decodes. Later rows must have
/// the same field count as the first one.
fn read_rows<F>(path: &Path, mut on_row: F) -> Result<(), ScheduleError>
where
    F: FnMut(&StringRecord) -> Result<(), String>,
{
    let file = File::open(path).map_err(|source| ScheduleError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
    let mut records = reader.records();
    let _header = records.next();

    for result in records {
        let record = result.map_err(|e| ScheduleError::MalformedRecord {
            path: path.to_path_buf(),
            line: e.position().map(|p| p.line()).unwrap_or_default(),
            message: e.to_string(),
        })?;

        on_row(&record).map_err(|message| ScheduleError::MalformedRecord {
            path: path.to_path_buf(),
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            message,
        })?;
    }

    Ok(())
}
