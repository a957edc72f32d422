//! Environment-driven settings.
//!
//! `.env` is loaded by the binary before [`Settings::from_env`] runs. Only the
//! realtime lookups need a credential; schedule browsing works without one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Url;
use tracing::{info, warn};

use crate::fetch::{BasicClient, DEFAULT_FEED_URL, RealtimeClient};
use crate::source::{LatenessSource, LiveFeed, StubFeed};

pub const API_KEY_VAR: &str = "TFNWS_API_KEY";
pub const FEED_URL_VAR: &str = "FEED_URL";
pub const FEED_FILE_VAR: &str = "FEED_FILE";
pub const LOG_FILE_PATH_VAR: &str = "LOG_FILE_PATH";

const DEFAULT_LOG_FILE_PATH: &str = "logs/train_late.log";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Feed credential sent as `Authorization: apikey <key>`.
    pub api_key: Option<String>,
    pub feed_url: String,
    /// When set, lateness is answered from this GTFS-RT file instead of the live feed.
    pub feed_file: Option<PathBuf>,
    pub log_file_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable lookup. Empty values count as unset.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| get(name).filter(|value| !value.is_empty());

        Self {
            api_key: get(API_KEY_VAR),
            feed_url: get(FEED_URL_VAR).unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            feed_file: get(FEED_FILE_VAR).map(PathBuf::from),
            log_file_path: get(LOG_FILE_PATH_VAR)
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string())
                .into(),
        }
    }

    /// Picks the lateness source: the stub when a feed file is configured,
    /// the live feed otherwise.
    pub fn lateness_source(&self) -> Result<Arc<dyn LatenessSource>> {
        if let Some(path) = &self.feed_file {
            info!(path = %path.display(), "Using stub feed");
            return Ok(Arc::new(StubFeed::from_path(path)?));
        }

        let url = self
            .feed_url
            .parse::<Url>()
            .with_context(|| format!("invalid feed URL '{}'", self.feed_url))?;
        if self.api_key.is_none() {
            warn!("{API_KEY_VAR} not set, lateness lookups will fail");
        }
        info!(url = %self.feed_url, "Using live feed");

        let client = RealtimeClient::new(BasicClient::new(), url);
        Ok(Arc::new(LiveFeed::new(client, self.api_key.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s.api_key, None);
        assert_eq!(s.feed_url, DEFAULT_FEED_URL);
        assert_eq!(s.feed_file, None);
        assert_eq!(s.log_file_path, PathBuf::from("logs/train_late.log"));
    }

    #[test]
    fn test_values_and_empty_as_unset() {
        let s = settings(&[
            (API_KEY_VAR, "abc"),
            (FEED_URL_VAR, "http://localhost:9000/feed"),
            (FEED_FILE_VAR, ""),
        ]);
        assert_eq!(s.api_key.as_deref(), Some("abc"));
        assert_eq!(s.feed_url, "http://localhost:9000/feed");
        assert_eq!(s.feed_file, None);

        assert_eq!(settings(&[(API_KEY_VAR, "")]).api_key, None);
    }

    #[test]
    fn test_live_source_without_key_still_builds() {
        assert!(settings(&[]).lateness_source().is_ok());
    }

    #[test]
    fn test_bad_feed_url_is_rejected() {
        let result = settings(&[(FEED_URL_VAR, "not a url")]).lateness_source();
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_stub_file_is_rejected() {
        let result = settings(&[(FEED_FILE_VAR, "/no/such/feed.pb")]).lateness_source();
        assert!(result.is_err());
    }
}
