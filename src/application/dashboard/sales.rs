//! Sales dashboard pages.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::chronological;
use crate::domain::aggregate::{
    aggregate, cumulative, distinct, group_sum, growth_rates, mean, percent_change, sum,
    GroupRow, Grouped, Reduce, TOP_N,
};
use crate::domain::chart::{format_amount, format_count, format_percent};
use crate::domain::facet::{filter, Facet};
use crate::domain::sales::{calendar_index, MONTHS};
use crate::domain::{Chart, ChartKind, Page, SaleRecord, SalesDim, SalesFacets, SalesMeasure, NO_DATA};

const QUANTITY: SalesMeasure = SalesMeasure::Quantity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SalesView {
    #[default]
    Overview,
    Stores,
    Products,
    Trends,
}

/// Build one sales page. KPIs compare `filtered` against the previous
/// period taken from `all`.
pub fn build_page(
    view: SalesView,
    all: &[SaleRecord],
    filtered: &[SaleRecord],
    facets: &SalesFacets,
) -> Page {
    let title = match view {
        SalesView::Overview => "Sales Overview",
        SalesView::Stores => "Store Performance Analysis",
        SalesView::Products => "Product Analytics",
        SalesView::Trends => "Time-Based Analysis",
    };
    let mut page = Page::new(title);
    key_metrics(&mut page, all, filtered, facets);

    if filtered.is_empty() {
        page.info(NO_DATA);
        return page;
    }

    match view {
        SalesView::Overview => overview(&mut page, filtered),
        SalesView::Stores => stores(&mut page, filtered, facets),
        SalesView::Products => products(&mut page, filtered, facets),
        SalesView::Trends => trends(&mut page, filtered),
    }
    page
}

/// The facet selection for the period before the selected one.
///
/// A selected month steps back one month (January to the previous
/// December); otherwise the year steps back. With no year selected there
/// is no previous period.
#[must_use]
pub fn previous_period(facets: &SalesFacets) -> Option<SalesFacets> {
    let Facet::Only(year) = facets.year else {
        return None;
    };
    let (year, month) = match &facets.month {
        Facet::All => (year - 1, Facet::All),
        Facet::Only(month) => match calendar_index(month)? {
            0 => (year - 1, Facet::Only(MONTHS[11].to_string())),
            index => (year, Facet::Only(MONTHS[index - 1].to_string())),
        },
    };
    Some(SalesFacets {
        year: Facet::Only(year),
        month,
        ..facets.clone()
    })
}

/// Items sold, average price and total sales, each with a delta against the
/// previous period under the same store and category selection.
fn key_metrics(page: &mut Page, all: &[SaleRecord], filtered: &[SaleRecord], facets: &SalesFacets) {
    let items = sum(filtered, QUANTITY);
    let price = mean(filtered, SalesMeasure::AveragePrice);
    let value = sum(filtered, SalesMeasure::Value);

    let previous = previous_period(facets)
        .map(|prev| filter(all, &prev))
        .filter(|rows| !rows.is_empty());
    let delta = |current: Option<Decimal>, previous: Option<Decimal>| {
        percent_change(current?, previous?).map(format_percent)
    };

    let prev_items = previous.as_deref().map(|rows| sum(rows, QUANTITY));
    let prev_price = previous
        .as_deref()
        .and_then(|rows| mean(rows, SalesMeasure::AveragePrice));
    let prev_value = previous
        .as_deref()
        .map(|rows| sum(rows, SalesMeasure::Value));

    page.metric_with_delta("Items Sold", format_count(items), delta(Some(items), prev_items));
    page.metric_with_delta("Avg. Price", rupees(price), delta(price, prev_price));
    page.metric_with_delta("Total Sales", rupees(Some(value)), delta(Some(value), prev_value));
}

fn rupees(amount: Option<Decimal>) -> String {
    amount.map_or_else(|| "N/A".to_string(), |amount| format!("₹{}", format_amount(amount)))
}

fn overview(page: &mut Page, rows: &[SaleRecord]) {
    page.chart(Chart::grouped(
        "Percentage of Items Sold by Store",
        ChartKind::Pie,
        group_sum(rows, &[SalesDim::Store], QUANTITY).sort_desc(),
    ));
    page.chart(Chart::grouped(
        "Items Sold by Product Category",
        ChartKind::Bar,
        group_sum(rows, &[SalesDim::Category], QUANTITY).sort_desc(),
    ));
    page.chart(Chart::grouped(
        "Monthly Quantity Sold",
        ChartKind::Line,
        monthly(rows),
    ));
    page.chart(Chart::grouped(
        "Top 10 Products by Quantity Sold",
        ChartKind::Bar,
        top_products(rows),
    ));
}

fn stores(page: &mut Page, rows: &[SaleRecord], facets: &SalesFacets) {
    let store = facets.store.value();
    page.title = match store {
        Some(store) => format!("Store Performance Analysis: {store}"),
        None => "Store Performance Analysis: All Stores".to_string(),
    };

    let best_seller = group_sum(rows, &[SalesDim::Item], QUANTITY)
        .sort_desc()
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.keys.into_iter().next())
        .unwrap_or_else(|| "N/A".to_string());

    page.metric("Total Items Sold", format_count(sum(rows, QUANTITY)));
    page.metric("Total Sales", rupees(Some(sum(rows, SalesMeasure::Value))));
    page.metric("Unique Products", distinct(rows, SalesDim::Item).len().to_string());
    page.metric("Categories", distinct(rows, SalesDim::Category).len().to_string());
    page.metric("Average Price", rupees(mean(rows, SalesMeasure::AveragePrice)));
    page.metric("Highest Quantity Item", best_seller);

    match store {
        None => {
            page.chart(Chart::grouped(
                "Monthly Quantity Sold by Store",
                ChartKind::Line,
                chronological(group_sum(rows, &[SalesDim::MonthYear, SalesDim::Store], QUANTITY)),
            ));
            page.chart(Chart::grouped(
                "Quantity Distribution by Store",
                ChartKind::Pie,
                group_sum(rows, &[SalesDim::Store], QUANTITY),
            ));
        }
        Some(store) => {
            page.chart(Chart::grouped(
                format!("Monthly Quantity Sold: {store}"),
                ChartKind::Bar,
                monthly(rows),
            ));
            page.chart(Chart::grouped(
                format!("Category Distribution for {store}"),
                ChartKind::Pie,
                group_sum(rows, &[SalesDim::Category], QUANTITY),
            ));
        }
    }

    page.chart(Chart::grouped(
        "Product Category Quantities by Store",
        ChartKind::StackedBar,
        group_sum(rows, &[SalesDim::Store, SalesDim::Category], QUANTITY),
    ));
}

fn products(page: &mut Page, rows: &[SaleRecord], facets: &SalesFacets) {
    page.chart(Chart::grouped(
        "Product Category Quantity Distribution",
        ChartKind::Pie,
        group_sum(rows, &[SalesDim::Category], QUANTITY).sort_desc(),
    ));
    page.chart(Chart::grouped(
        "Top 10 Products by Quantity Sold",
        ChartKind::Bar,
        top_products(rows),
    ));
    page.chart(Chart::grouped(
        "Monthly Quantity Trend by Product Category",
        ChartKind::Line,
        chronological(group_sum(rows, &[SalesDim::MonthYear, SalesDim::Category], QUANTITY)),
    ));
    page.chart(Chart::grouped(
        "Quantity vs. Price by Product Category",
        ChartKind::Scatter,
        aggregate(
            rows,
            &[SalesDim::Category],
            &[
                (SalesMeasure::AveragePrice, Reduce::Mean),
                (SalesMeasure::Quantity, Reduce::Sum),
                (SalesMeasure::Value, Reduce::Sum),
            ],
        ),
    ));

    if let Some(category) = facets.category.value() {
        page.chart(Chart::grouped(
            format!("Quantity of {category} by Store"),
            ChartKind::Pie,
            group_sum(rows, &[SalesDim::Store], QUANTITY).sort_desc(),
        ));
        page.chart(Chart::grouped(
            format!("Top Items in {category} by Quantity"),
            ChartKind::Bar,
            top_products(rows),
        ));
    }
}

fn trends(page: &mut Page, rows: &[SaleRecord]) {
    let monthly = monthly(rows);

    let growth = (monthly.len() > 1).then(|| month_over_month(&monthly));
    page.chart(Chart::grouped("Monthly Quantity Trend", ChartKind::Line, monthly));
    if let Some(growth) = growth {
        page.chart(Chart::grouped(
            "Month-over-Month Quantity Growth (%)",
            ChartKind::Bar,
            growth,
        ));
    }

    let seasonal = group_sum(rows, &[SalesDim::Year, SalesDim::MonthName], QUANTITY)
        .sort_by(calendar_order);
    let running = cumulative_by_year(&seasonal);
    page.chart(Chart::grouped(
        "Quantity by Month (Year-over-Year Comparison)",
        ChartKind::Line,
        seasonal,
    ));
    page.chart(Chart::grouped(
        "Cumulative Quantity by Year",
        ChartKind::Line,
        running,
    ));

    page.chart(Chart::grouped(
        "Quantity Distribution by Month",
        ChartKind::Bar,
        group_sum(rows, &[SalesDim::MonthName], QUANTITY)
            .sort_by(|a, b| calendar_index(&a.keys[0]).cmp(&calendar_index(&b.keys[0]))),
    ));
}

fn monthly(rows: &[SaleRecord]) -> Grouped {
    chronological(group_sum(rows, &[SalesDim::MonthYear], QUANTITY))
}

fn top_products(rows: &[SaleRecord]) -> Grouped {
    group_sum(rows, &[SalesDim::Item], QUANTITY)
        .sort_desc()
        .top(TOP_N)
}

/// Growth of each month over the one before; months after a zero are left out.
fn month_over_month(monthly: &Grouped) -> Grouped {
    let rates = growth_rates(&monthly.column(0));
    Grouped {
        dims: monthly.dims.clone(),
        measures: vec!["growth_rate"],
        rows: monthly
            .rows
            .iter()
            .skip(1)
            .zip(rates)
            .filter_map(|(row, rate)| {
                rate.map(|rate| GroupRow {
                    keys: row.keys.clone(),
                    values: vec![rate],
                })
            })
            .collect(),
    }
}

/// Order `(year, month_name)` groups by year, then calendar month.
fn calendar_order(a: &GroupRow, b: &GroupRow) -> Ordering {
    let key = |row: &GroupRow| {
        (
            row.keys[0].parse::<i32>().unwrap_or_default(),
            calendar_index(&row.keys[1]),
        )
    };
    key(a).cmp(&key(b))
}

/// Running quantity within each year of a calendar-ordered seasonal table.
fn cumulative_by_year(seasonal: &Grouped) -> Grouped {
    let mut rows = Vec::with_capacity(seasonal.len());
    let mut start = 0;
    while start < seasonal.rows.len() {
        let year = &seasonal.rows[start].keys[0];
        let end = seasonal.rows[start..]
            .iter()
            .position(|row| &row.keys[0] != year)
            .map_or(seasonal.rows.len(), |offset| start + offset);
        let chunk = &seasonal.rows[start..end];
        let values: Vec<Decimal> = chunk.iter().map(|row| row.values[0]).collect();
        rows.extend(chunk.iter().zip(cumulative(&values)).map(|(row, total)| GroupRow {
            keys: row.keys.clone(),
            values: vec![total],
        }));
        start = end;
    }
    Grouped {
        dims: seasonal.dims.clone(),
        measures: vec!["cumulative_quantity"],
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sale(store: &str, item: &str, y: i32, m: u32, qty: u64, price: Decimal) -> SaleRecord {
        let date = NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        SaleRecord::new(store, Some(item.into()), date, qty, price, price * Decimal::from(qty))
    }

    fn table() -> Vec<SaleRecord> {
        vec![
            sale("Store A", "Slim Jeans", 2024, 12, 10, dec!(50)),
            sale("Store A", "Slim Jeans", 2025, 1, 15, dec!(50)),
            sale("Store B", "Canvas Tote", 2025, 2, 12, dec!(20)),
            sale("Store A", "Campaign Hat", 2025, 2, 0, dec!(30)),
        ]
    }

    fn year(y: i32) -> SalesFacets {
        SalesFacets {
            year: Facet::Only(y),
            ..SalesFacets::default()
        }
    }

    #[test]
    fn test_previous_period() {
        let jan = SalesFacets {
            month: Facet::Only("Jan".into()),
            store: Facet::Only("Store A".into()),
            ..year(2025)
        };
        let prev = previous_period(&jan).unwrap();
        assert_eq!(prev.year, Facet::Only(2024));
        assert_eq!(prev.month, Facet::Only("Dec".into()));
        assert_eq!(prev.store, Facet::Only("Store A".into()));

        let mar = SalesFacets {
            month: Facet::Only("Mar".into()),
            ..year(2025)
        };
        assert_eq!(previous_period(&mar).unwrap().month, Facet::Only("Feb".into()));

        assert_eq!(previous_period(&year(2025)).unwrap().year, Facet::Only(2024));
        assert!(previous_period(&SalesFacets::default()).is_none());
    }

    #[test]
    fn test_kpi_deltas() {
        let rows = table();
        let facets = SalesFacets {
            month: Facet::Only("Jan".into()),
            ..year(2025)
        };
        let filtered = filter(&rows, &facets);
        let page = build_page(SalesView::Overview, &rows, &filtered, &facets);

        assert_eq!(page.metrics[0].label, "Items Sold");
        assert_eq!(page.metrics[0].value, "15");
        assert_eq!(page.metrics[0].delta.as_deref(), Some("+50.0%"));
        assert_eq!(page.metrics[1].value, "₹50.00");
        assert_eq!(page.metrics[1].delta.as_deref(), Some("0.0%"));
        assert_eq!(page.metrics[2].value, "₹750.00");
    }

    #[test]
    fn test_no_delta_without_previous_period() {
        let rows = table();
        let facets = year(2024);
        let filtered = filter(&rows, &facets);
        let page = build_page(SalesView::Overview, &rows, &filtered, &facets);
        assert!(page.metrics.iter().all(|m| m.delta.is_none()));
    }

    #[test]
    fn test_monthly_is_chronological() {
        let rows = table();
        let page = build_page(SalesView::Trends, &rows, &rows, &SalesFacets::default());

        let monthly = page.find("Monthly Quantity Trend").unwrap().table().unwrap();
        let labels: Vec<&str> = monthly.rows.iter().map(|r| r.keys[0].as_str()).collect();
        assert_eq!(labels, vec!["Dec 2024", "Jan 2025", "Feb 2025"]);

        let growth = page
            .find("Month-over-Month Quantity Growth (%)")
            .unwrap()
            .table()
            .unwrap();
        assert_eq!(growth.rows.len(), 2);
        assert_eq!(growth.rows[0].values, vec![dec!(50)]);
        assert_eq!(growth.rows[1].values, vec![dec!(-20)]);
    }

    #[test]
    fn test_seasonal_and_cumulative() {
        let rows = table();
        let page = build_page(SalesView::Trends, &rows, &rows, &SalesFacets::default());

        let seasonal = page
            .find("Quantity by Month (Year-over-Year Comparison)")
            .unwrap()
            .table()
            .unwrap();
        let keys: Vec<(String, String)> = seasonal
            .rows
            .iter()
            .map(|r| (r.keys[0].clone(), r.keys[1].clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2024".into(), "Dec".into()),
                ("2025".into(), "Jan".into()),
                ("2025".into(), "Feb".into()),
            ]
        );

        let running = page.find("Cumulative Quantity by Year").unwrap().table().unwrap();
        assert_eq!(running.column(0), vec![dec!(10), dec!(15), dec!(27)]);

        let by_month = page.find("Quantity Distribution by Month").unwrap().table().unwrap();
        let months: Vec<&str> = by_month.rows.iter().map(|r| r.keys[0].as_str()).collect();
        assert_eq!(months, vec!["Jan", "Feb", "Dec"]);
    }

    #[test]
    fn test_single_month_has_no_growth_chart() {
        let rows = table();
        let facets = SalesFacets {
            month: Facet::Only("Feb".into()),
            ..year(2025)
        };
        let filtered = filter(&rows, &facets);
        let page = build_page(SalesView::Trends, &rows, &filtered, &facets);
        assert!(page.find("Month-over-Month Quantity Growth (%)").is_none());
    }

    #[test]
    fn test_store_view_for_one_store() {
        let rows = table();
        let facets = SalesFacets {
            store: Facet::Only("Store A".into()),
            ..SalesFacets::default()
        };
        let filtered = filter(&rows, &facets);
        let page = build_page(SalesView::Stores, &rows, &filtered, &facets);

        assert_eq!(page.title, "Store Performance Analysis: Store A");
        let best = page.metrics.iter().find(|m| m.label == "Highest Quantity Item").unwrap();
        assert_eq!(best.value, "Slim Jeans");
        assert_eq!(page.find("Monthly Quantity Sold: Store A").unwrap().kind, ChartKind::Bar);
        assert!(page.find("Category Distribution for Store A").is_some());
    }

    #[test]
    fn test_products_category_detail() {
        let rows = table();
        let facets = SalesFacets {
            category: Facet::Only("Jeans".into()),
            ..SalesFacets::default()
        };
        let filtered = filter(&rows, &facets);
        let page = build_page(SalesView::Products, &rows, &filtered, &facets);

        let scatter = page
            .find("Quantity vs. Price by Product Category")
            .unwrap()
            .table()
            .unwrap();
        assert_eq!(scatter.measures, vec!["average_price", "total_quantity", "total_value"]);
        assert_eq!(scatter.rows[0].values, vec![dec!(50), dec!(25), dec!(1250)]);
        assert!(page.find("Top Items in Jeans by Quantity").is_some());
    }

    #[test]
    fn test_every_view_handles_empty_subset() {
        let rows = table();
        let facets = year(2030);
        for view in [SalesView::Overview, SalesView::Stores, SalesView::Products, SalesView::Trends] {
            let page = build_page(view, &rows, &[], &facets);
            assert!(page.charts.is_empty());
            assert_eq!(page.metrics[1].value, "N/A");
            assert_eq!(page.notices, vec![crate::domain::Notice::Info(NO_DATA.into())]);
        }
    }
}
