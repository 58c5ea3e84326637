//! Unified fetcher: one configurable path for every reporting endpoint.
//!
//! An [`Endpoint`] carries the URL, cache TTL, request timeout and the
//! failure policy. [`Fetcher::fetch`] serves a fresh cached snapshot when
//! one exists, otherwise GETs the endpoint, validates the envelope, and
//! caches the unwrapped payload. Failures are never cached.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::cache::{Snapshot, SnapshotCache};
use super::envelope::{open_envelope, Payload};
use crate::error::FetchError;
use crate::port::PayloadSource;

/// What a failed fetch means for the dashboard that asked for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The dashboard cannot continue; the error propagates.
    #[default]
    Fatal,
    /// Report the error and continue with an empty table.
    Degrade,
}

/// A resolved reporting endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub url: String,
    pub ttl: Duration,
    /// `None` leaves the request unbounded.
    pub timeout: Option<Duration>,
    pub on_failure: FailurePolicy,
    /// Reject envelopes that carry no `status` field.
    pub require_status: bool,
}

/// Result of a fetch under a [`FailurePolicy::Degrade`] policy.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Ready(Snapshot),
    Degraded(FetchError),
}

pub struct Fetcher<S> {
    source: S,
    cache: SnapshotCache,
}

impl<S: PayloadSource> Fetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: SnapshotCache::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Fetch `endpoint`, honouring its TTL and failure policy.
    ///
    /// Returns `Err` only under [`FailurePolicy::Fatal`].
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<FetchOutcome, FetchError> {
        if let Some(snapshot) = self.cache.get_fresh(&endpoint.url, endpoint.ttl) {
            debug!(
                endpoint = endpoint.name,
                version = snapshot.version,
                "Serving cached payload"
            );
            return Ok(FetchOutcome::Ready(snapshot));
        }

        match self.load(endpoint).await {
            Ok(data) => {
                let snapshot = self.cache.insert(&endpoint.url, data);
                info!(
                    endpoint = endpoint.name,
                    url = %endpoint.url,
                    version = snapshot.version,
                    "Fetched payload"
                );
                Ok(FetchOutcome::Ready(snapshot))
            }
            Err(err) => match endpoint.on_failure {
                FailurePolicy::Fatal => {
                    error!(endpoint = endpoint.name, error = %err, "Fetch failed");
                    Err(err)
                }
                FailurePolicy::Degrade => {
                    warn!(endpoint = endpoint.name, error = %err, "Fetch failed, continuing without data");
                    Ok(FetchOutcome::Degraded(err))
                }
            },
        }
    }

    async fn load(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        let body = self
            .source
            .get_json(&endpoint.url, endpoint.timeout)
            .await?;

        match open_envelope(&endpoint.url, body, endpoint.require_status)? {
            Payload::Records(data) => Ok(data),
            Payload::DecodeFailure(reason) => Err(FetchError::Decode {
                url: endpoint.url.clone(),
                reason,
            }),
        }
    }
}
