//! Grouping and reshaping primitives behind every chart.
//!
//! Every chart on both dashboards is a small table derived from a slice of
//! normalized rows: grouped by one or more categorical columns, with a
//! measure reduced by `sum` or `mean`. Rows whose grouping key is null are
//! left out of the groups, so totals are conserved only over columns that
//! are populated for every row.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ChartError;

/// Number of entries kept by "top N" charts.
pub const TOP_N: usize = 10;

/// A named column of a normalized table.
pub trait Column: Copy {
    fn name(self) -> &'static str;
}

/// A row that exposes categorical dimensions and numeric measures by column.
pub trait Record {
    type Dim: Column;
    type Measure: Column;

    /// Value of a categorical column, `None` when the row has no value.
    fn dim(&self, dim: Self::Dim) -> Option<Cow<'_, str>>;

    /// Value of a numeric column.
    fn measure(&self, measure: Self::Measure) -> Decimal;
}

/// Reduction applied to a measure within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    Sum,
    Mean,
}

/// One group: its key per dimension and one reduced value per measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub keys: Vec<String>,
    pub values: Vec<Decimal>,
}

/// Result of a group-by: a small table with key columns and measure columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grouped {
    pub dims: Vec<&'static str>,
    pub measures: Vec<&'static str>,
    pub rows: Vec<GroupRow>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: Decimal,
    count: u64,
}

impl Accumulator {
    fn push(&mut self, value: Decimal) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(self, reduce: Reduce) -> Decimal {
        match reduce {
            Reduce::Sum => self.sum,
            Reduce::Mean if self.count == 0 => Decimal::ZERO,
            Reduce::Mean => self.sum / Decimal::from(self.count),
        }
    }
}

/// Group `rows` by `dims` and reduce each of `measures`.
///
/// Groups come back ordered by key, like a sorted group-by.
pub fn aggregate<R: Record>(
    rows: &[R],
    dims: &[R::Dim],
    measures: &[(R::Measure, Reduce)],
) -> Grouped {
    let mut groups: BTreeMap<Vec<String>, Vec<Accumulator>> = BTreeMap::new();

    'rows: for row in rows {
        let mut keys = Vec::with_capacity(dims.len());
        for dim in dims {
            match row.dim(*dim) {
                Some(value) => keys.push(value.into_owned()),
                None => continue 'rows,
            }
        }

        let accumulators = groups
            .entry(keys)
            .or_insert_with(|| vec![Accumulator::default(); measures.len()]);
        for (acc, (measure, _)) in accumulators.iter_mut().zip(measures) {
            acc.push(row.measure(*measure));
        }
    }

    Grouped {
        dims: dims.iter().map(|d| d.name()).collect(),
        measures: measures.iter().map(|(m, _)| m.name()).collect(),
        rows: groups
            .into_iter()
            .map(|(keys, accs)| GroupRow {
                keys,
                values: accs
                    .into_iter()
                    .zip(measures)
                    .map(|(acc, (_, reduce))| acc.finish(*reduce))
                    .collect(),
            })
            .collect(),
    }
}

/// Group by `dims` and sum a single measure.
pub fn group_sum<R: Record>(rows: &[R], dims: &[R::Dim], measure: R::Measure) -> Grouped {
    aggregate(rows, dims, &[(measure, Reduce::Sum)])
}

impl Grouped {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Sort descending by the first measure. Ties keep key order.
    #[must_use]
    pub fn sort_desc(mut self) -> Self {
        self.rows.sort_by(|a, b| {
            let a = a.values.first().copied().unwrap_or_default();
            let b = b.values.first().copied().unwrap_or_default();
            b.cmp(&a)
        });
        self
    }

    /// Keep the first `n` groups.
    #[must_use]
    pub fn top(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    /// Reorder groups with a custom comparator.
    #[must_use]
    pub fn sort_by<F>(mut self, compare: F) -> Self
    where
        F: FnMut(&GroupRow, &GroupRow) -> Ordering,
    {
        self.rows.sort_by(compare);
        self
    }

    /// Sum of the measure at `index` across all groups.
    #[must_use]
    pub fn total(&self, index: usize) -> Decimal {
        self.rows
            .iter()
            .filter_map(|row| row.values.get(index))
            .copied()
            .sum()
    }

    /// Values of the measure at `index`, in group order.
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<Decimal> {
        self.rows
            .iter()
            .map(|row| row.values.get(index).copied().unwrap_or_default())
            .collect()
    }
}

/// Sum a measure over all rows.
pub fn sum<R: Record>(rows: &[R], measure: R::Measure) -> Decimal {
    rows.iter().map(|row| row.measure(measure)).sum()
}

/// Mean of a measure over all rows; `None` for an empty slice.
pub fn mean<R: Record>(rows: &[R], measure: R::Measure) -> Option<Decimal> {
    if rows.is_empty() {
        return None;
    }
    Some(sum(rows, measure) / Decimal::from(rows.len()))
}

/// Sorted distinct non-null values of a column.
pub fn distinct<R: Record>(rows: &[R], dim: R::Dim) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.dim(dim).map(Cow::into_owned))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// True when at least one row has a value in `dim`.
pub fn has_values<R: Record>(rows: &[R], dim: R::Dim) -> bool {
    rows.iter().any(|row| row.dim(dim).is_some())
}

/// Category-by-category matrix of a summed measure; absent cells are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub row_dim: &'static str,
    pub column_dim: &'static str,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<Decimal>>,
}

/// Pivot two categorical columns into a matrix of summed `measure`.
pub fn pivot<R: Record>(
    rows: &[R],
    row_dim: R::Dim,
    column_dim: R::Dim,
    measure: R::Measure,
) -> Result<Matrix, ChartError> {
    let grouped = group_sum(rows, &[row_dim, column_dim], measure);
    if grouped.is_empty() {
        let column = if has_values(rows, row_dim) {
            column_dim.name()
        } else {
            row_dim.name()
        };
        return Err(ChartError::EmptyDimension { column });
    }

    let row_labels: Vec<String> = grouped
        .rows
        .iter()
        .map(|g| g.keys[0].clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column_labels: Vec<String> = grouped
        .rows
        .iter()
        .map(|g| g.keys[1].clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut cells = vec![vec![Decimal::ZERO; column_labels.len()]; row_labels.len()];
    for group in &grouped.rows {
        let (Ok(r), Ok(c)) = (
            row_labels.binary_search(&group.keys[0]),
            column_labels.binary_search(&group.keys[1]),
        ) else {
            continue;
        };
        cells[r][c] = group.values[0];
    }

    Ok(Matrix {
        row_dim: row_dim.name(),
        column_dim: column_dim.name(),
        rows: row_labels,
        columns: column_labels,
        cells,
    })
}

/// Nested-path aggregate for treemaps and sunbursts.
pub fn hierarchy<R: Record>(
    rows: &[R],
    path: &[R::Dim],
    measure: R::Measure,
) -> Result<Grouped, ChartError> {
    if path.is_empty() {
        return Err(ChartError::EmptyPath);
    }
    Ok(group_sum(rows, path, measure))
}

/// Period-over-period growth in percent.
///
/// The result has one entry per element after the first. An entry is `None`
/// when the previous value is zero.
pub fn growth_rates(series: &[Decimal]) -> Vec<Option<Decimal>> {
    series
        .windows(2)
        .map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            if previous.is_zero() {
                None
            } else {
                Some((current - previous) / previous * Decimal::ONE_HUNDRED)
            }
        })
        .collect()
}

/// Running total of a series.
pub fn cumulative(series: &[Decimal]) -> Vec<Decimal> {
    series
        .iter()
        .scan(Decimal::ZERO, |total, value| {
            *total += *value;
            Some(*total)
        })
        .collect()
}

/// Percent change from `previous` to `current`; `None` unless `previous > 0`.
pub fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous > Decimal::ZERO {
        Some((current - previous) / previous * Decimal::ONE_HUNDRED)
    } else {
        None
    }
}

/// One axis of a parallel-coordinates plot.
///
/// Categorical axes carry their labels and encode each row as the label's
/// index; the measure axis has no labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub name: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<Option<Decimal>>,
}

/// Minimum number of axes for a parallel-coordinates plot.
pub const MIN_PARALLEL_AXES: usize = 3;

/// Build parallel-coordinate axes from the populated `dims` plus `measure`.
pub fn parallel_axes<R: Record>(
    rows: &[R],
    dims: &[R::Dim],
    measure: R::Measure,
) -> Result<Vec<Axis>, ChartError> {
    let mut axes: Vec<Axis> = dims
        .iter()
        .filter(|dim| has_values(rows, **dim))
        .map(|dim| {
            let labels = distinct(rows, *dim);
            let values = rows
                .iter()
                .map(|row| {
                    row.dim(*dim).and_then(|value| {
                        labels
                            .binary_search_by(|label| label.as_str().cmp(value.as_ref()))
                            .ok()
                            .map(Decimal::from)
                    })
                })
                .collect();
            Axis {
                name: dim.name(),
                labels,
                values,
            }
        })
        .collect();

    axes.push(Axis {
        name: measure.name(),
        labels: Vec::new(),
        values: rows.iter().map(|row| Some(row.measure(measure))).collect(),
    });

    if axes.len() < MIN_PARALLEL_AXES {
        return Err(ChartError::NotEnoughDimensions {
            required: MIN_PARALLEL_AXES,
            found: axes.len(),
        });
    }
    Ok(axes)
}
