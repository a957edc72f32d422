//! Protobuf parser for GTFS Realtime feeds.

use prost::Message;

use crate::error::LatenessError;
use crate::gtfs_rt::FeedMessage;

/// Decodes a protobuf-encoded GTFS-RT [`FeedMessage`] from raw bytes.
///
/// Absent optional fields are normal and decode to `None`. The input is only
/// borrowed for the duration of the call.
///
/// # Errors
///
/// Returns [`LatenessError::Decode`] if the bytes are not valid protobuf for a
/// `FeedMessage`.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedMessage, LatenessError> {
    Ok(FeedMessage::decode(bytes)?)
}
