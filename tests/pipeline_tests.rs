//! End-to-end pipeline tests: scripted payload -> normalized table ->
//! filtered subset -> dashboard page.

use std::time::Duration;

use retaildash::application::dashboard::{inventory, sales, InventoryFocus, InventoryView, SalesView};
use retaildash::application::{Endpoint, FailurePolicy, Session};
use retaildash::domain::aggregate::group_sum;
use retaildash::domain::{
    ChartBody, Facet, InventoryDim, InventoryFacets, InventoryMeasure, SalesFacets,
};
use retaildash::error::FetchError;
use retaildash::testkit::{payload, StubSource};
use rust_decimal_macros::dec;
use serde_json::json;

const INVENTORY_URL: &str = "https://reports.test/stores";
const SALES_URL: &str = "https://reports.test/sales";

fn inventory_endpoint(ttl: Duration, on_failure: FailurePolicy) -> Endpoint {
    Endpoint {
        name: "inventory",
        url: INVENTORY_URL.into(),
        ttl,
        timeout: None,
        on_failure,
        require_status: true,
    }
}

fn sales_endpoint() -> Endpoint {
    Endpoint {
        name: "sales",
        url: SALES_URL.into(),
        ttl: Duration::from_secs(300),
        timeout: Some(Duration::from_secs(10)),
        on_failure: FailurePolicy::Fatal,
        require_status: false,
    }
}

fn two_store_payload() -> serde_json::Value {
    json!({
        "Store A": [{"category": "Tops", "count": "5"}],
        "Store B": [{"category": "Tops", "count": 3}]
    })
}

#[tokio::test]
async fn inventory_example_totals_by_category() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(payload::inventory_envelope(two_store_payload())),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Degrade);

    let dataset = session.inventory(&endpoint).await.unwrap();
    assert_eq!(dataset.rows.len(), 2);
    assert!(dataset
        .rows
        .iter()
        .all(|row| row.category.as_deref() == Some("Tops")));

    let by_category = group_sum(&dataset.rows, &[InventoryDim::Category], InventoryMeasure::Count);
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category.rows[0].keys, vec!["Tops".to_string()]);
    assert_eq!(by_category.rows[0].values, vec![dec!(8)]);
}

#[tokio::test]
async fn inventory_accepts_string_encoded_data() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(payload::inventory_envelope_encoded(&two_store_payload())),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Fatal);

    let dataset = session.inventory(&endpoint).await.unwrap();
    assert_eq!(dataset.rows.len(), 2);
    assert!(dataset.failure.is_none());
}

#[tokio::test]
async fn inventory_undecodable_string_degrades_to_empty() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(json!({"status": "success", "data": "{not json"})),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Degrade);

    let dataset = session.inventory(&endpoint).await.unwrap();
    assert!(dataset.is_empty());
    assert!(matches!(dataset.failure, Some(FetchError::Decode { .. })));
}

#[tokio::test]
async fn inventory_error_status_is_reported() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(json!({"status": "error", "data": {}})),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Fatal);

    let err = session.inventory(&endpoint).await.unwrap_err();
    assert!(matches!(err, FetchError::Envelope { .. }));
    assert!(err.to_string().contains("error"));
}

#[tokio::test]
async fn cached_snapshot_is_served_within_ttl() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(payload::inventory_envelope(two_store_payload())),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Fatal);

    let first = session.inventory(&endpoint).await.unwrap();
    let second = session.inventory(&endpoint).await.unwrap();
    assert_eq!(first.version, second.version);
    assert_eq!(session.fetcher().source().calls(), 1);
}

#[tokio::test]
async fn zero_ttl_refetches_and_invalidates_filtered_views() {
    let source = StubSource::new()
        .with_response(INVENTORY_URL, Ok(payload::inventory_envelope(two_store_payload())))
        .with_response(
            INVENTORY_URL,
            Ok(payload::inventory_envelope(json!({
                "Store A": [{"category": "Tops", "count": 1}]
            }))),
        );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::ZERO, FailurePolicy::Fatal);
    let facets = InventoryFacets {
        category: Facet::Only("Tops".into()),
        ..InventoryFacets::default()
    };

    let first = session.inventory(&endpoint).await.unwrap();
    let first_view = session.filter_inventory(&first, &facets);
    assert_eq!(first_view.len(), 2);

    let second = session.inventory(&endpoint).await.unwrap();
    assert!(second.version > first.version);
    let second_view = session.filter_inventory(&second, &facets);
    assert_eq!(second_view.len(), 1);
    assert_eq!(session.fetcher().source().calls(), 2);
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let source = StubSource::new()
        .with_response(
            INVENTORY_URL,
            Err(FetchError::Network {
                url: INVENTORY_URL.into(),
                reason: "connection refused".into(),
            }),
        )
        .with_response(INVENTORY_URL, Ok(payload::inventory_envelope(two_store_payload())));
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Degrade);

    let degraded = session.inventory(&endpoint).await.unwrap();
    assert!(degraded.is_empty());
    assert!(degraded.failure.as_ref().is_some_and(FetchError::is_network));

    let recovered = session.inventory(&endpoint).await.unwrap();
    assert_eq!(recovered.rows.len(), 2);
}

#[tokio::test]
async fn inventory_pages_over_empty_selection_show_no_data() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(payload::inventory_envelope(payload::inventory_stores())),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Fatal);
    let dataset = session.inventory(&endpoint).await.unwrap();

    let facets = InventoryFacets {
        store: Facet::Only("No Such Store".into()),
        ..InventoryFacets::default()
    };
    let filtered = session.filter_inventory(&dataset, &facets);
    assert!(filtered.is_empty());

    for view in [InventoryView::Overview, InventoryView::Stores, InventoryView::Products] {
        let page = inventory::build_page(
            view,
            &dataset.rows,
            &filtered,
            &facets,
            &InventoryFocus::default(),
        );
        assert!(
            page.charts.iter().all(|chart| !matches!(chart.body, ChartBody::Table(_))),
            "{view:?} drew a table over an empty selection"
        );
    }
}

#[tokio::test]
async fn sales_trends_page_orders_months_chronologically() {
    let source = StubSource::new().with_response(
        SALES_URL,
        Ok(payload::sales_envelope(payload::sales_records())),
    );
    let session = Session::new(source);
    let dataset = session.sales(&sales_endpoint()).await.unwrap();
    assert_eq!(dataset.rows.len(), 6);

    let facets = SalesFacets::default();
    let filtered = session.filter_sales(&dataset, &facets);
    let page = sales::build_page(SalesView::Trends, &dataset.rows, &filtered, &facets);

    let monthly = page
        .find("Monthly Quantity Trend")
        .and_then(|chart| chart.table())
        .unwrap();
    let months: Vec<_> = monthly.rows.iter().map(|row| row.keys[0].as_str()).collect();
    assert_eq!(months, vec!["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]);

    let growth = page
        .find("Month-over-Month Quantity Growth (%)")
        .and_then(|chart| chart.table())
        .unwrap();
    assert_eq!(growth.len(), monthly.len() - 1);
    // Nov 2 -> Dec 4
    assert_eq!(growth.rows[0].values[0], dec!(100));
}

#[tokio::test]
async fn sales_fetch_failure_propagates() {
    let source = StubSource::new().with_response(
        SALES_URL,
        Err(FetchError::Status {
            url: SALES_URL.into(),
            status: 500,
        }),
    );
    let session = Session::new(source);

    let err = session.sales(&sales_endpoint()).await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            url: SALES_URL.into(),
            status: 500
        }
    );
}

#[tokio::test]
async fn malformed_inventory_record_keeps_other_stores() {
    let source = StubSource::new().with_response(
        INVENTORY_URL,
        Ok(payload::inventory_envelope(json!({
            "Store A": [{"count": 1}, null],
            "Store B": [{"count": 2}]
        }))),
    );
    let session = Session::new(source);
    let endpoint = inventory_endpoint(Duration::from_secs(600), FailurePolicy::Degrade);

    let dataset = session.inventory(&endpoint).await.unwrap();
    assert!(dataset.failure.is_none());
    assert_eq!(dataset.rows.len(), 2);
    assert!(dataset.warnings.iter().any(|w| w.contains("not objects")));
}
