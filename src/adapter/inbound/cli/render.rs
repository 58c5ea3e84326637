//! Terminal renderer for dashboard pages.
//!
//! Human mode draws metrics as labeled fields and each chart as a rounded
//! table of the data behind it. JSON mode emits the whole page as one
//! `{"type": "page", ...}` line.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::Style;

use super::output;
use crate::domain::aggregate::{Axis, Grouped, Matrix};
use crate::domain::chart::{format_amount, format_count};
use crate::domain::{Chart, ChartBody, Notice, Page};
use crate::error::Result;
use crate::port::PageRenderer;

/// Rows of a parallel-coordinates table shown without `-v`.
const AXIS_PREVIEW_ROWS: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl PageRenderer for TerminalRenderer {
    fn render(&self, page: &Page) -> Result<()> {
        if output::is_json() {
            output::json_line("page", serde_json::to_value(page)?);
            return Ok(());
        }

        output::section(&page.title);
        for metric in &page.metrics {
            match &metric.delta {
                Some(delta) if delta.starts_with('-') => output::field(
                    &metric.label,
                    format!("{} ({})", metric.value, output::negative(delta)),
                ),
                Some(delta) => output::field(
                    &metric.label,
                    format!("{} ({})", metric.value, output::positive(delta)),
                ),
                None => output::field(&metric.label, &metric.value),
            }
        }
        for notice in &page.notices {
            match notice {
                Notice::Info(message) => output::note(message),
                Notice::Warning(message) => output::warning(message),
            }
        }

        let row_limit = if output::verbosity() > 0 {
            usize::MAX
        } else {
            AXIS_PREVIEW_ROWS
        };
        for chart in &page.charts {
            render_chart(chart, row_limit);
        }
        Ok(())
    }
}

fn render_chart(chart: &Chart, row_limit: usize) {
    output::section(&format!(
        "{} {}",
        chart.title,
        output::highlight(format!("[{}]", chart.kind.label()))
    ));
    match &chart.body {
        ChartBody::NoData { message } => output::note(message),
        ChartBody::Failed { message } => output::warning(message),
        body => {
            if let Some((table, hidden)) = chart_table(body, row_limit) {
                output::lines(&table);
                if hidden > 0 {
                    output::hint(&format!("{hidden} more rows, use -v to show all"));
                }
            }
        }
    }
}

/// Draw the data behind a chart; the count is of rows left out.
pub(crate) fn chart_table(body: &ChartBody, row_limit: usize) -> Option<(String, usize)> {
    let (builder, hidden) = match body {
        ChartBody::Table(grouped) => (grouped_table(grouped), 0),
        ChartBody::Matrix(matrix) => (matrix_table(matrix), 0),
        ChartBody::Axes { axes } => axes_table(axes, row_limit),
        ChartBody::NoData { .. } | ChartBody::Failed { .. } => return None,
    };
    let mut table = builder.build();
    table.with(Style::rounded());
    Some((table.to_string(), hidden))
}

fn grouped_table(grouped: &Grouped) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(
        grouped
            .dims
            .iter()
            .chain(grouped.measures.iter())
            .map(|name| name.to_string()),
    );
    for row in &grouped.rows {
        builder.push_record(
            row.keys
                .iter()
                .cloned()
                .chain(row.values.iter().map(|value| number(*value))),
        );
    }
    builder
}

fn matrix_table(matrix: &Matrix) -> Builder {
    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(format!("{} \\ {}", matrix.row_dim, matrix.column_dim))
            .chain(matrix.columns.iter().cloned()),
    );
    for (label, cells) in matrix.rows.iter().zip(&matrix.cells) {
        builder.push_record(
            std::iter::once(label.clone()).chain(cells.iter().map(|value| number(*value))),
        );
    }
    builder
}

fn axes_table(axes: &[Axis], row_limit: usize) -> (Builder, usize) {
    let mut builder = Builder::default();
    builder.push_record(axes.iter().map(|axis| axis.name.to_string()));

    let rows = axes.first().map_or(0, |axis| axis.values.len());
    for index in 0..rows.min(row_limit) {
        builder.push_record(axes.iter().map(|axis| axis_cell(axis, index)));
    }
    (builder, rows.saturating_sub(row_limit))
}

/// A categorical axis shows its label; the measure axis shows the number.
fn axis_cell(axis: &Axis, index: usize) -> String {
    let Some(Some(value)) = axis.values.get(index) else {
        return String::new();
    };
    if axis.labels.is_empty() {
        return number(*value);
    }
    value
        .to_usize()
        .and_then(|code| axis.labels.get(code))
        .cloned()
        .unwrap_or_default()
}

fn number(value: Decimal) -> String {
    if value.fract().is_zero() {
        format_count(value)
    } else {
        format_amount(value)
    }
}
