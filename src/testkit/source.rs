//! Scripted payload source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::FetchError;
use crate::port::PayloadSource;

/// A [`PayloadSource`] that replays scripted responses per URL.
///
/// Responses for a URL are served in order; the last one repeats once the
/// script runs out. An unscripted URL yields a network error.
#[derive(Default)]
pub struct StubSource {
    scripts: Mutex<HashMap<String, Vec<Result<Value, FetchError>>>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a response to the script for `url`.
    pub fn with_response(self, url: &str, response: Result<Value, FetchError>) -> Self {
        self.push(url, response);
        self
    }

    pub fn push(&self, url: &str, response: Result<Value, FetchError>) {
        self.scripts
            .lock()
            .entry(url.to_string())
            .or_default()
            .push(response);
    }

    /// Number of `get_json` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayloadSource for StubSource {
    async fn get_json(&self, url: &str, _timeout: Option<Duration>) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut scripts = self.scripts.lock();
        match scripts.get_mut(url) {
            Some(script) if script.len() > 1 => script.remove(0),
            Some(script) if !script.is_empty() => script[0].clone(),
            _ => Err(FetchError::Network {
                url: url.to_string(),
                reason: "no scripted response".to_string(),
            }),
        }
    }
}
