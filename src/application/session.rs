//! One dashboard session: fetch, normalize, and filter on demand.
//!
//! Normalized tables are rebuilt only when the fetcher hands back a new
//! snapshot version; filtered subsets are memoized per facet selection.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use super::dashboard::{Dataset, FilteredView};
use super::fetcher::{Endpoint, FailurePolicy, FetchOutcome, Fetcher};
use super::normalize::{normalize_inventory, normalize_sales, Normalized, RawInventory, RawSales};
use crate::domain::{InventoryFacets, InventoryItem, SaleRecord, SalesFacets};
use crate::error::FetchError;
use crate::port::PayloadSource;

pub struct Session<S> {
    fetcher: Fetcher<S>,
    inventory: Mutex<Option<Dataset<InventoryItem>>>,
    sales: Mutex<Option<Dataset<SaleRecord>>>,
    inventory_views: FilteredView<InventoryItem, InventoryFacets>,
    sales_views: FilteredView<SaleRecord, SalesFacets>,
}

impl<S: PayloadSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            fetcher: Fetcher::new(source),
            inventory: Mutex::new(None),
            sales: Mutex::new(None),
            inventory_views: FilteredView::new(),
            sales_views: FilteredView::new(),
        }
    }

    pub fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    /// The normalized inventory table.
    pub async fn inventory(&self, endpoint: &Endpoint) -> Result<Dataset<InventoryItem>, FetchError> {
        self.load::<RawInventory, _>(endpoint, &self.inventory, normalize_inventory)
            .await
    }

    /// The normalized sales table.
    pub async fn sales(&self, endpoint: &Endpoint) -> Result<Dataset<SaleRecord>, FetchError> {
        self.load::<RawSales, _>(endpoint, &self.sales, |raw: &RawSales| normalize_sales(raw))
            .await
    }

    pub fn filter_inventory(
        &self,
        dataset: &Dataset<InventoryItem>,
        facets: &InventoryFacets,
    ) -> Arc<Vec<InventoryItem>> {
        self.inventory_views.get(dataset, facets)
    }

    pub fn filter_sales(
        &self,
        dataset: &Dataset<SaleRecord>,
        facets: &SalesFacets,
    ) -> Arc<Vec<SaleRecord>> {
        self.sales_views.get(dataset, facets)
    }

    async fn load<T, R>(
        &self,
        endpoint: &Endpoint,
        slot: &Mutex<Option<Dataset<R>>>,
        normalize: impl Fn(&T) -> Normalized<R>,
    ) -> Result<Dataset<R>, FetchError>
    where
        T: DeserializeOwned,
        R: Clone,
    {
        let snapshot = match self.fetcher.fetch(endpoint).await? {
            FetchOutcome::Ready(snapshot) => snapshot,
            FetchOutcome::Degraded(err) => return Ok(Dataset::degraded(err)),
        };

        if let Some(dataset) = slot
            .lock()
            .as_ref()
            .filter(|dataset| dataset.version == snapshot.version)
        {
            debug!(endpoint = endpoint.name, version = snapshot.version, "Reusing normalized table");
            return Ok(dataset.clone());
        }

        let raw: T = match snapshot.decode(&endpoint.url) {
            Ok(raw) => raw,
            Err(err) => {
                self.fetcher.cache().invalidate(&endpoint.url);
                return degrade(endpoint, err);
            }
        };
        let Normalized { rows, warnings } = normalize(&raw);
        let dataset = Dataset::new(snapshot.version, rows, warnings);
        *slot.lock() = Some(dataset.clone());
        Ok(dataset)
    }
}

fn degrade<R>(endpoint: &Endpoint, err: FetchError) -> Result<Dataset<R>, FetchError> {
    match endpoint.on_failure {
        FailurePolicy::Fatal => Err(err),
        FailurePolicy::Degrade => {
            warn!(endpoint = endpoint.name, error = %err, "Payload unusable, continuing without data");
            Ok(Dataset::degraded(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{payload, StubSource};
    use std::time::Duration;

    fn endpoint(on_failure: FailurePolicy) -> Endpoint {
        Endpoint {
            name: "inventory",
            url: "https://reports.test/stores".into(),
            ttl: Duration::from_secs(600),
            timeout: None,
            on_failure,
            require_status: true,
        }
    }

    #[tokio::test]
    async fn test_normalized_table_is_reused_within_ttl() {
        let endpoint = endpoint(FailurePolicy::Fatal);
        let source = StubSource::new().with_response(
            &endpoint.url,
            Ok(payload::inventory_envelope(payload::inventory_stores())),
        );
        let session = Session::new(source);

        let first = session.inventory(&endpoint).await.unwrap();
        let second = session.inventory(&endpoint).await.unwrap();

        assert!(Arc::ptr_eq(&first.rows, &second.rows));
        assert_eq!(first.rows.len(), 5);
        assert_eq!(session.fetcher().source().calls(), 1);
    }

    #[tokio::test]
    async fn test_wrong_shape_follows_policy() {
        let shape = Ok(payload::inventory_envelope(serde_json::json!([1, 2, 3])));

        let fatal = endpoint(FailurePolicy::Fatal);
        let session = Session::new(StubSource::new().with_response(&fatal.url, shape.clone()));
        assert!(matches!(
            session.inventory(&fatal).await,
            Err(FetchError::Envelope { .. })
        ));

        let degrade = endpoint(FailurePolicy::Degrade);
        let session = Session::new(StubSource::new().with_response(&degrade.url, shape));
        let dataset = session.inventory(&degrade).await.unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.failure.is_some());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_refetched() {
        let endpoint = endpoint(FailurePolicy::Degrade);
        let source = StubSource::new()
            .with_response(
                &endpoint.url,
                Ok(payload::inventory_envelope(serde_json::json!([1, 2, 3]))),
            )
            .with_response(
                &endpoint.url,
                Ok(payload::inventory_envelope(payload::inventory_stores())),
            );
        let session = Session::new(source);

        let bad = session.inventory(&endpoint).await.unwrap();
        assert!(bad.is_empty());
        assert!(session.fetcher().cache().is_empty());

        let good = session.inventory(&endpoint).await.unwrap();
        assert_eq!(good.rows.len(), 5);
        assert!(good.failure.is_none());
        assert_eq!(session.fetcher().source().calls(), 2);
    }
}
