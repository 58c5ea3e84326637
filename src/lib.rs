//! Retaildash - retail inventory and sales dashboards.
//!
//! Two reporting APIs (store inventory, monthly sales) feed a one-way
//! pipeline: fetch, normalize, filter by facets, aggregate into charts, and
//! hand the page to a renderer.
//!
//! # Architecture
//!
//! - **`domain`** - Normalized rows, facets, grouping primitives, chart and
//!   page descriptions
//! - **`port`** - `PayloadSource` (raw JSON GET) and `PageRenderer`
//! - **`application`** - Envelope decoding, the cached fetcher, normalizers,
//!   dashboard page builders, memoized filtering
//! - **`adapter`** - reqwest client and the CLI
//! - **`infrastructure`** - Configuration and logging
//!
//! # Example
//!
//! ```no_run
//! use retaildash::adapter::outbound::http::ApiClient;
//! use retaildash::application::{DashboardKind, Session};
//! use retaildash::infrastructure::config::Config;
//!
//! # async fn run() -> retaildash::error::Result<()> {
//! let config = Config::parse_toml("")?;
//! let session = Session::new(ApiClient::from_config(&config.http));
//! let dataset = session.inventory(&config.endpoint(DashboardKind::Inventory)).await?;
//! println!("{} inventory rows", dataset.rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `testkit` - Stub payload source and canned payloads for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
