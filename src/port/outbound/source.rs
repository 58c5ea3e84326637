//! Source port for raw reporting payloads.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Fetches the raw JSON body of a reporting endpoint.
///
/// Implementations own the transport. They report unreachable hosts,
/// timeouts and non-2xx statuses as [`FetchError::Network`] or
/// [`FetchError::Status`], and a body that is not JSON as
/// [`FetchError::Envelope`]. Envelope validation happens upstream.
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// GET `url` and parse the body as JSON. `None` leaves the request
    /// without a deadline.
    async fn get_json(&self, url: &str, timeout: Option<Duration>) -> Result<Value, FetchError>;
}
