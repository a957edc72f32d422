//! Recording [`HttpClient`] for tests. Never touches the network.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::http;
use reqwest::header::AUTHORIZATION;

use super::client::HttpClient;

pub(crate) struct MockClient {
    status: u16,
    body: Vec<u8>,
    calls: AtomicUsize,
    last_authorization: Mutex<Option<String>>,
    last_url: Mutex<Option<String>>,
}

impl MockClient {
    pub(crate) fn ok(body: Vec<u8>) -> Self {
        Self::with_status(200, body)
    }

    pub(crate) fn with_status(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body,
            calls: AtomicUsize::new(0),
            last_authorization: Mutex::new(None),
            last_url: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    pub(crate) fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_authorization.lock().unwrap() = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self.last_url.lock().unwrap() = Some(req.url().to_string());

        let resp = http::Response::builder()
            .status(self.status)
            .body(self.body.clone())
            .unwrap();
        Ok(reqwest::Response::from(resp))
    }
}
