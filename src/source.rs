//! Where lateness answers come from.
//!
//! [`LiveFeed`] fetches and decodes the realtime feed on every call.
//! [`StubFeed`] answers from one feed snapshot decoded up front, for offline
//! development and demos. Both resolve through [`resolve`].

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::LatenessError;
use crate::fetch::{HttpClient, RealtimeClient};
use crate::gtfs_rt::FeedMessage;
use crate::parser::parse_feed;
use crate::resolver::{DelayResult, resolve};

/// A trip's delay together with the time of the snapshot it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatenessReport {
    pub result: DelayResult,
    /// Creation time from the feed header, when the producer sets one.
    pub feed_timestamp: Option<DateTime<Utc>>,
}

impl LatenessReport {
    pub fn from_feed(feed: &FeedMessage, trip_id: &str) -> Self {
        Self {
            result: resolve(feed, trip_id),
            feed_timestamp: feed
                .header
                .timestamp
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }
}

/// Answers "how late is this trip?".
#[async_trait]
pub trait LatenessSource: Send + Sync {
    async fn lateness(&self, trip_id: &str) -> Result<LatenessReport, LatenessError>;
}

/// Feed-backed source. Every call is a fresh fetch; nothing is cached.
pub struct LiveFeed<C> {
    client: RealtimeClient<C>,
    credential: Option<String>,
}

impl<C: HttpClient> LiveFeed<C> {
    pub fn new(client: RealtimeClient<C>, credential: Option<String>) -> Self {
        Self { client, credential }
    }
}

#[async_trait]
impl<C: HttpClient> LatenessSource for LiveFeed<C> {
    #[tracing::instrument(skip(self))]
    async fn lateness(&self, trip_id: &str) -> Result<LatenessReport, LatenessError> {
        let bytes = self.client.fetch_feed(self.credential.as_deref()).await?;
        let feed = parse_feed(&bytes)?;
        debug!(entity_count = feed.entity.len(), "Feed parsed");
        Ok(LatenessReport::from_feed(&feed, trip_id))
    }
}

/// Fixed-snapshot source.
pub struct StubFeed {
    feed: FeedMessage,
}

impl StubFeed {
    pub fn new(feed: FeedMessage) -> Self {
        Self { feed }
    }

    /// Decodes a GTFS-RT protobuf file once.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading stub feed {}", path.display()))?;
        let feed = parse_feed(&bytes)
            .with_context(|| format!("decoding stub feed {}", path.display()))?;
        debug!(path = %path.display(), entity_count = feed.entity.len(), "Stub feed loaded");
        Ok(Self::new(feed))
    }
}

#[async_trait]
impl LatenessSource for StubFeed {
    async fn lateness(&self, trip_id: &str) -> Result<LatenessReport, LatenessError> {
        Ok(LatenessReport::from_feed(&self.feed, trip_id))
    }
}
