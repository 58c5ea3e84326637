//! Sales normalizer: flat record list to the sales table.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{categorical, coerce_count, coerce_decimal, Normalized};
use crate::domain::sales::{month_year_label, placeholder_date};
use crate::domain::{SaleRecord, UNKNOWN};

/// Raw sales payload: one object per store, item and month.
pub type RawSales = Vec<Value>;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a calendar date, timestamp, or year-month string.
///
/// Year-month forms (`2025-01`, `Jan 2025`, `January 2025`) resolve to the
/// first of the month.
#[must_use]
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| {
            let padded = format!("01 {raw}");
            NaiveDate::parse_from_str(&padded, "%d %b %Y")
                .or_else(|_| NaiveDate::parse_from_str(&padded, "%d %B %Y"))
                .ok()
        })
}

/// Build the sales table from raw records.
///
/// A missing or unreadable `month` falls back to a placeholder date and is
/// reported once in the warnings. Entries that are not objects are skipped.
pub fn normalize_sales(raw: &[Value]) -> Normalized<SaleRecord> {
    let mut warnings = Vec::new();
    let records: Vec<&Map<String, Value>> = raw.iter().filter_map(Value::as_object).collect();
    let skipped = raw.len() - records.len();
    if skipped > 0 {
        warn!(records = skipped, "Skipping malformed sales records");
        warnings.push(format!("{skipped} sales record(s) are not objects and were skipped."));
    }

    let placeholder = placeholder_date();
    let has_month = records.iter().any(|record| record.contains_key("month"));

    if !records.is_empty() && !has_month {
        warn!("Column 'month' absent from sales payload");
        warnings.push(format!(
            "No 'month' field found in data. Using {} for every record.",
            month_year_label(placeholder)
        ));
    }

    let mut unreadable = 0usize;
    let rows: Vec<SaleRecord> = records
        .iter()
        .map(|record| {
            let date = match record.get("month") {
                Some(Value::String(month)) => parse_month(month),
                _ => None,
            };
            let date = date.unwrap_or_else(|| {
                if has_month {
                    unreadable += 1;
                }
                placeholder
            });

            let store = categorical(record.get("store_name"))
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| UNKNOWN.to_string());
            let item_name = match record.get("item_name") {
                Some(Value::String(name)) => Some(name.clone()),
                _ => None,
            };

            SaleRecord::new(
                store,
                item_name,
                date,
                coerce_count(record.get("total_quantity")),
                coerce_decimal(record.get("average_price")),
                coerce_decimal(record.get("total_value")),
            )
        })
        .collect();

    if unreadable > 0 {
        warn!(records = unreadable, "Unreadable sales month values");
        warnings.push(format!(
            "{unreadable} record(s) have an unreadable 'month'. Using {} for them.",
            month_year_label(placeholder)
        ));
    }

    debug!(rows = rows.len(), "Normalized sales");
    Normalized { rows, warnings }
}
