//! Chart and page descriptions handed to a renderer.
//!
//! A [`Page`] is what one dashboard view produces for the current facet
//! selection: headline metrics, notices, and an ordered list of charts. The
//! renderer decides how to draw them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::aggregate::{Axis, Grouped, Matrix};
use crate::error::ChartError;

/// Message shown when a chart's table has no rows.
pub const NO_DATA: &str = "No data available with the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    StackedBar,
    Pie,
    Line,
    Scatter,
    Heatmap,
    Treemap,
    Sunburst,
    ParallelCoordinates,
}

impl ChartKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::StackedBar => "stacked bar",
            Self::Pie => "pie",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Heatmap => "heatmap",
            Self::Treemap => "treemap",
            Self::Sunburst => "sunburst",
            Self::ParallelCoordinates => "parallel coordinates",
        }
    }
}

/// Data behind a chart, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartBody {
    Table(Grouped),
    Matrix(Matrix),
    Axes { axes: Vec<Axis> },
    /// Informational placeholder: the selection produced nothing to plot.
    NoData { message: String },
    /// The chart could not be built from the current subset.
    Failed { message: String },
}

impl ChartBody {
    /// Table body; an empty table becomes a no-data placeholder.
    pub fn from_grouped(grouped: Grouped) -> Self {
        if grouped.is_empty() {
            Self::NoData {
                message: NO_DATA.to_string(),
            }
        } else {
            Self::Table(grouped)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub body: ChartBody,
}

impl Chart {
    pub fn new(title: impl Into<String>, kind: ChartKind, body: ChartBody) -> Self {
        Self {
            title: title.into(),
            kind,
            body,
        }
    }

    pub fn no_data(title: impl Into<String>, kind: ChartKind, message: &str) -> Self {
        Self::new(
            title,
            kind,
            ChartBody::NoData {
                message: message.to_string(),
            },
        )
    }

    /// Chart over a grouped table; an empty table becomes a no-data placeholder.
    pub fn grouped(title: impl Into<String>, kind: ChartKind, grouped: Grouped) -> Self {
        Self::new(title, kind, ChartBody::from_grouped(grouped))
    }

    /// Chart whose construction may fail; failures become warnings.
    pub fn attempt(
        title: impl Into<String>,
        kind: ChartKind,
        context: &str,
        body: Result<ChartBody, ChartError>,
    ) -> Self {
        match body {
            Ok(body) => Self::new(title, kind, body),
            Err(err) => Self::new(
                title,
                kind,
                ChartBody::Failed {
                    message: format!("{context}: {err}"),
                },
            ),
        }
    }

    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self.body, ChartBody::NoData { .. })
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.body, ChartBody::Failed { .. })
    }

    /// The grouped table, when the chart has one.
    #[must_use]
    pub const fn table(&self) -> Option<&Grouped> {
        match &self.body {
            ChartBody::Table(grouped) => Some(grouped),
            _ => None,
        }
    }
}

/// A headline number with an optional change versus the previous period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// One rendered view of a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub metrics: Vec<Metric>,
    pub notices: Vec<Notice>,
    pub charts: Vec<Chart>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            metrics: Vec::new(),
            notices: Vec::new(),
            charts: Vec::new(),
        }
    }

    pub fn metric(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.metric_with_delta(label, value, None);
    }

    pub fn metric_with_delta(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
        delta: Option<String>,
    ) {
        self.metrics.push(Metric {
            label: label.into(),
            value: value.into(),
            delta,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Info(message.into()));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Warning(message.into()));
    }

    pub fn chart(&mut self, chart: Chart) {
        self.charts.push(chart);
    }

    /// Find a chart by title.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<&Chart> {
        self.charts.iter().find(|chart| chart.title == title)
    }
}

/// Format a whole number with thousands separators.
pub fn format_count(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    group_thousands(&rounded.trunc().to_string())
}

/// Format an amount with two decimals and thousands separators.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");
    match text.split_once('.') {
        Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
        None => group_thousands(&text),
    }
}

/// Format a signed percentage with one decimal, e.g. `+12.5%`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() || rounded.is_zero() {
        ""
    } else {
        "+"
    };
    format!("{sign}{rounded:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(dec!(0)), "0");
        assert_eq!(format_count(dec!(999)), "999");
        assert_eq!(format_count(dec!(1234567)), "1,234,567");
    }

    #[test]
    fn test_format_amount_two_decimals() {
        assert_eq!(format_amount(dec!(1234.5)), "1,234.50");
        assert_eq!(format_amount(dec!(-9876543.219)), "-9,876,543.22");
    }

    #[test]
    fn test_format_percent_sign() {
        assert_eq!(format_percent(dec!(12.34)), "+12.3%");
        assert_eq!(format_percent(dec!(-20)), "-20.0%");
        assert_eq!(format_percent(dec!(0)), "0.0%");
    }

    #[test]
    fn test_empty_grouped_becomes_no_data() {
        let grouped = Grouped {
            dims: vec!["store_name"],
            measures: vec!["count"],
            rows: Vec::new(),
        };
        let chart = Chart::grouped("Inventory by Store", ChartKind::Bar, grouped);
        assert!(chart.is_no_data());
        assert!(chart.table().is_none());
    }

    #[test]
    fn test_attempt_turns_error_into_warning() {
        let chart = Chart::attempt(
            "Hierarchy",
            ChartKind::Sunburst,
            "Could not create sunburst chart",
            Err(ChartError::EmptyPath),
        );
        assert_eq!(
            chart.body,
            ChartBody::Failed {
                message: "Could not create sunburst chart: hierarchy path is empty".into()
            }
        );
    }

    #[test]
    fn test_page_serializes_body_tag() {
        let mut page = Page::new("Overview");
        page.chart(Chart::no_data("Empty", ChartKind::Pie, NO_DATA));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["charts"][0]["body"]["type"], "no_data");
        assert_eq!(json["charts"][0]["kind"], "pie");
    }
}
