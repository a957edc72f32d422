//! Error types for schedule loading and real-time lookups.
//!
//! [`ScheduleError`] is fatal at startup: without a schedule there is nothing
//! to serve. [`LatenessError`] is scoped to a single lookup and leaves the
//! schedule and every other request untouched.

use std::path::PathBuf;

/// Failures while reading the reference route and trip files.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be decoded as tabular text or lacks a required column.
    #[error("malformed record in {} at line {line}: {message}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

/// Failures of a single real-time lateness lookup.
#[derive(Debug, thiserror::Error)]
pub enum LatenessError {
    /// No feed credential is configured.
    #[error("feed API key not configured (set TFNWS_API_KEY)")]
    AuthMissing,

    /// The credential cannot be sent as an HTTP header value.
    #[error("feed API key is not a valid header value")]
    InvalidCredential,

    /// Transport failure while sending the request or reading the body.
    #[error("feed request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("feed returned status {status}")]
    UpstreamStatus { status: u16 },

    /// The body is not a valid GTFS Realtime message.
    #[error("feed decode failed: {0}")]
    Decode(#[from] prost::DecodeError),
}
