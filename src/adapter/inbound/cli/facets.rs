//! Handler for `retaildash facets`.

use serde_json::json;

use super::command::DashboardArg;
use super::dashboard::{check_dataset, with_spinner};
use super::output;
use crate::adapter::outbound::http::ApiClient;
use crate::application::{DashboardKind, Session};
use crate::domain::facet::{inventory_options, sales_options, FacetOptions};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::PayloadSource;

/// Execute `retaildash facets <dashboard>`.
pub async fn execute(config: &Config, dashboard: DashboardArg) -> Result<()> {
    let session = Session::new(ApiClient::from_config(&config.http));
    let options = facet_options(&session, config, dashboard).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "facets",
            "facets": options,
        }));
        return Ok(());
    }

    for facet in &options {
        output::section(facet.facet);
        output::lines(&facet.options.join("\n"));
    }
    Ok(())
}

pub(crate) async fn facet_options<S: PayloadSource>(
    session: &Session<S>,
    config: &Config,
    dashboard: DashboardArg,
) -> Result<Vec<FacetOptions>> {
    match dashboard {
        DashboardArg::Inventory => {
            let endpoint = config.endpoint(DashboardKind::Inventory);
            let dataset =
                with_spinner("Loading inventory data", session.inventory(&endpoint)).await?;
            check_dataset(&dataset, DashboardKind::Inventory)?;
            Ok(inventory_options(&dataset.rows))
        }
        DashboardArg::Sales => {
            let endpoint = config.endpoint(DashboardKind::Sales);
            let dataset = with_spinner("Loading sales data", session.sales(&endpoint)).await?;
            check_dataset(&dataset, DashboardKind::Sales)?;
            Ok(sales_options(&dataset.rows))
        }
    }
}
