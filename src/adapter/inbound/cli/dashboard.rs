//! Handlers for the `inventory` and `sales` commands.

use std::future::Future;

use tracing::info;

use super::command::{InventoryArgs, SalesArgs, YearArg};
use super::output;
use super::render::TerminalRenderer;
use crate::adapter::outbound::http::ApiClient;
use crate::application::dashboard::{inventory, sales, InventoryFocus};
use crate::application::{DashboardKind, Dataset, Session};
use crate::domain::facet::{
    latest_year, ALL_CATEGORIES, ALL_COLLECTIONS, ALL_GENDERS, ALL_MONTHS, ALL_STORES,
};
use crate::domain::{Facet, InventoryFacets, Notice, Page, SaleRecord, SalesFacets};
use crate::error::{Error, FetchError, Result};
use crate::infrastructure::config::Config;
use crate::port::{PageRenderer, PayloadSource};

/// Execute `retaildash inventory`.
pub async fn execute_inventory(config: &Config, args: &InventoryArgs) -> Result<()> {
    let session = Session::new(ApiClient::from_config(&config.http));
    let page = inventory_page(&session, config, args).await?;
    TerminalRenderer.render(&page)
}

/// Execute `retaildash sales`.
pub async fn execute_sales(config: &Config, args: &SalesArgs) -> Result<()> {
    let session = Session::new(ApiClient::from_config(&config.http));
    let page = sales_page(&session, config, args).await?;
    TerminalRenderer.render(&page)
}

pub(crate) async fn inventory_page<S: PayloadSource>(
    session: &Session<S>,
    config: &Config,
    args: &InventoryArgs,
) -> Result<Page> {
    let endpoint = config.endpoint(DashboardKind::Inventory);
    let dataset = with_spinner("Loading inventory data", session.inventory(&endpoint)).await?;
    check_dataset(&dataset, DashboardKind::Inventory)?;

    let facets = inventory_facets(args);
    let filtered = session.filter_inventory(&dataset, &facets);
    info!(rows = dataset.rows.len(), selected = filtered.len(), "Building inventory page");

    let focus = InventoryFocus {
        store: args.focus_store.clone(),
        category: args.focus_category.clone(),
        collection: args.focus_collection.clone(),
    };
    let page = inventory::build_page(
        args.view.into(),
        &dataset.rows,
        &filtered,
        &facets,
        &focus,
    );
    Ok(with_warnings(page, &dataset.warnings))
}

pub(crate) async fn sales_page<S: PayloadSource>(
    session: &Session<S>,
    config: &Config,
    args: &SalesArgs,
) -> Result<Page> {
    let endpoint = config.endpoint(DashboardKind::Sales);
    let dataset = with_spinner("Loading sales data", session.sales(&endpoint)).await?;
    check_dataset(&dataset, DashboardKind::Sales)?;

    let facets = sales_facets(args, &dataset.rows);
    let filtered = session.filter_sales(&dataset, &facets);
    info!(rows = dataset.rows.len(), selected = filtered.len(), "Building sales page");

    let page = sales::build_page(args.view.into(), &dataset.rows, &filtered, &facets);
    Ok(with_warnings(page, &dataset.warnings))
}

/// Facet selection from the inventory flags.
pub fn inventory_facets(args: &InventoryArgs) -> InventoryFacets {
    InventoryFacets {
        store: Facet::parse(args.store.as_deref(), ALL_STORES),
        category: Facet::parse(args.category.as_deref(), ALL_CATEGORIES),
        collection: Facet::parse(args.collection.as_deref(), ALL_COLLECTIONS),
        gender: Facet::parse(args.gender.as_deref(), ALL_GENDERS),
    }
}

/// Facet selection from the sales flags. Without `--year` the latest year
/// in the data is selected.
pub fn sales_facets(args: &SalesArgs, rows: &[SaleRecord]) -> SalesFacets {
    let year = match args.year {
        Some(YearArg::All) => Facet::All,
        Some(YearArg::Year(year)) => Facet::Only(year),
        None => latest_year(rows).map_or(Facet::All, Facet::Only),
    };
    SalesFacets {
        year,
        month: Facet::parse(args.month.as_deref(), ALL_MONTHS),
        store: Facet::parse(args.store.as_deref(), ALL_STORES),
        category: Facet::parse(args.category.as_deref(), ALL_CATEGORIES),
    }
}

/// Surface a degraded fetch; an empty table halts the dashboard. Normalizer
/// warnings are printed here only when there is no page to carry them.
pub(crate) fn check_dataset<R>(dataset: &Dataset<R>, kind: DashboardKind) -> Result<()> {
    if let Some(failure) = &dataset.failure {
        output::error(&format!("Failed to load {} data: {failure}", kind.name()));
    }
    if dataset.is_empty() {
        for warning in &dataset.warnings {
            output::warning(warning);
        }
        return Err(Error::NoData {
            dashboard: kind.name(),
        });
    }
    Ok(())
}

/// Normalizer warnings lead the page notices.
fn with_warnings(mut page: Page, warnings: &[String]) -> Page {
    let mut notices: Vec<Notice> = warnings.iter().cloned().map(Notice::Warning).collect();
    notices.append(&mut page.notices);
    page.notices = notices;
    page
}

/// Await a fetch behind a spinner.
pub(crate) async fn with_spinner<T, F>(message: &str, fetch: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, FetchError>>,
{
    let pb = output::spinner(message);
    match fetch.await {
        Ok(value) => {
            output::spinner_done(&pb);
            Ok(value)
        }
        Err(err) => {
            output::spinner_fail(&pb, message);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{payload, StubSource};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn config() -> Config {
        let mut config = Config::default();
        config.inventory.url = Some("https://reports.test/stores".into());
        config.sales.url = Some("https://reports.test/sales".into());
        config
    }

    fn record(year: i32) -> SaleRecord {
        let date = NaiveDate::from_ymd_opt(year, 6, 1).unwrap();
        SaleRecord::new("Store A", Some("Jeans".into()), date, 1, dec!(10), dec!(10))
    }

    #[test]
    fn test_sales_year_defaults_to_latest() {
        let rows = vec![record(2023), record(2025), record(2024)];
        let facets = sales_facets(&SalesArgs::default(), &rows);
        assert_eq!(facets.year, Facet::Only(2025));

        let all = SalesArgs {
            year: Some(YearArg::All),
            ..SalesArgs::default()
        };
        assert_eq!(sales_facets(&all, &rows).year, Facet::All);
    }

    #[test]
    fn test_inventory_wildcard_flags() {
        let args = InventoryArgs {
            store: Some("All Stores".into()),
            category: Some("Tops".into()),
            ..InventoryArgs::default()
        };
        let facets = inventory_facets(&args);
        assert!(facets.store.is_all());
        assert_eq!(facets.category, Facet::Only("Tops".into()));
        assert!(facets.gender.is_all());
    }

    #[tokio::test]
    async fn test_inventory_page_from_stub() {
        let config = config();
        let source = StubSource::new().with_response(
            "https://reports.test/stores",
            Ok(payload::inventory_envelope(payload::inventory_stores())),
        );
        let session = Session::new(source);
        let page = inventory_page(&session, &config, &InventoryArgs::default())
            .await
            .unwrap();
        assert_eq!(page.title, "Inventory Overview");
        assert!(page.find("Total Inventory by Store").is_some());
    }

    #[tokio::test]
    async fn test_missing_columns_become_page_warnings() {
        let config = config();
        let source = StubSource::new().with_response(
            "https://reports.test/stores",
            Ok(payload::inventory_envelope(serde_json::json!({
                "Store A": [{"category": "Tops", "count": 2}]
            }))),
        );
        let session = Session::new(source);
        let page = inventory_page(&session, &config, &InventoryArgs::default())
            .await
            .unwrap();
        assert!(matches!(page.notices.first(), Some(Notice::Warning(_))));
    }

    #[tokio::test]
    async fn test_degraded_inventory_halts_with_no_data() {
        let config = config();
        let source = StubSource::new().with_response(
            "https://reports.test/stores",
            Err(FetchError::Status {
                url: "https://reports.test/stores".into(),
                status: 503,
            }),
        );
        let session = Session::new(source);
        let err = inventory_page(&session, &config, &InventoryArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoData { dashboard: "inventory" }));
    }

    #[tokio::test]
    async fn test_sales_fetch_failure_is_fatal() {
        let config = config();
        let source = StubSource::new().with_response(
            "https://reports.test/sales",
            Err(FetchError::Network {
                url: "https://reports.test/sales".into(),
                reason: "timed out".into(),
            }),
        );
        let session = Session::new(source);
        let err = sales_page(&session, &config, &SalesArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(FetchError::Network { .. })));
    }

    #[tokio::test]
    async fn test_sales_page_from_stub() {
        let config = config();
        let source = StubSource::new().with_response(
            "https://reports.test/sales",
            Ok(payload::sales_envelope(payload::sales_records())),
        );
        let session = Session::new(source);
        let args = SalesArgs {
            year: Some(YearArg::All),
            ..SalesArgs::default()
        };
        let page = sales_page(&session, &config, &args).await.unwrap();
        assert_eq!(page.title, "Sales Overview");
        assert_eq!(page.metrics.len(), 3);
    }
}
