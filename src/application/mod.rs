//! Application services (use cases).
//!
//! The pipeline runs one way: fetch → normalize → filter → aggregate.

pub mod cache;
pub mod dashboard;
pub mod envelope;
pub mod fetcher;
pub mod normalize;
pub mod session;

pub use dashboard::{DashboardKind, Dataset};
pub use fetcher::{Endpoint, FailurePolicy, FetchOutcome, Fetcher};
pub use session::Session;
