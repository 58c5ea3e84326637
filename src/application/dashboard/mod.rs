//! Dashboard pages: the charts each view draws from a filtered table.

pub mod inventory;
pub mod memo;
pub mod sales;

use std::sync::Arc;
use std::time::Duration;

use super::fetcher::FailurePolicy;
use crate::domain::aggregate::Grouped;
use crate::domain::sales::period_key;
use crate::error::FetchError;

pub use inventory::{InventoryFocus, InventoryView};
pub use memo::FilteredView;
pub use sales::SalesView;

/// The two dashboards and their built-in endpoint defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardKind {
    Inventory,
    Sales,
}

impl DashboardKind {
    pub const ALL: [Self; 2] = [Self::Inventory, Self::Sales];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Sales => "sales",
        }
    }

    #[must_use]
    pub const fn default_url(self) -> &'static str {
        match self {
            Self::Inventory => "https://unforus.net/UNIQ/reporting-apis/api_retail_stores.php",
            Self::Sales => "https://bookish-winner-seven.vercel.app/api/dashboard",
        }
    }

    #[must_use]
    pub const fn default_ttl(self) -> Duration {
        match self {
            Self::Inventory => Duration::from_secs(600),
            Self::Sales => Duration::from_secs(300),
        }
    }

    /// Inventory requests are unbounded; sales requests give up after 10s.
    #[must_use]
    pub const fn default_timeout(self) -> Option<Duration> {
        match self {
            Self::Inventory => None,
            Self::Sales => Some(Duration::from_secs(10)),
        }
    }

    #[must_use]
    pub const fn default_policy(self) -> FailurePolicy {
        match self {
            Self::Inventory => FailurePolicy::Degrade,
            Self::Sales => FailurePolicy::Fatal,
        }
    }

    /// Only the inventory API wraps its data in a `status` envelope.
    #[must_use]
    pub const fn requires_status(self) -> bool {
        matches!(self, Self::Inventory)
    }
}

/// A normalized table tied to the snapshot it was built from.
#[derive(Debug, Clone)]
pub struct Dataset<R> {
    /// Snapshot version; 0 for a degraded, empty dataset.
    pub version: u64,
    pub rows: Arc<Vec<R>>,
    pub warnings: Vec<String>,
    /// The fetch failure behind a degraded dataset.
    pub failure: Option<FetchError>,
}

impl<R> Dataset<R> {
    pub fn new(version: u64, rows: Vec<R>, warnings: Vec<String>) -> Self {
        Self {
            version,
            rows: Arc::new(rows),
            warnings,
            failure: None,
        }
    }

    /// Empty dataset standing in for a failed fetch.
    pub fn degraded(failure: FetchError) -> Self {
        Self {
            version: 0,
            rows: Arc::new(Vec::new()),
            warnings: Vec::new(),
            failure: Some(failure),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Order groups chronologically by their leading `Mon YYYY` key.
pub(crate) fn chronological(grouped: Grouped) -> Grouped {
    grouped.sort_by(|a, b| period_key(&a.keys[0]).cmp(&period_key(&b.keys[0])))
}
