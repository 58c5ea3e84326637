//! Facets: user-selected equality constraints on one column each.
//!
//! A facet is either the wildcard ("All Stores", "All Months", ...) or one
//! exact value. A facet set admits a row only when every facet does.

use std::borrow::Borrow;

use serde::Serialize;

use super::aggregate::distinct;
use super::inventory::{InventoryDim, InventoryItem};
use super::sales::{SaleRecord, SalesDim, MONTHS};

pub const ALL_STORES: &str = "All Stores";
pub const ALL_CATEGORIES: &str = "All Categories";
pub const ALL_COLLECTIONS: &str = "All Collections";
pub const ALL_GENDERS: &str = "All Genders";
pub const ALL_YEARS: &str = "All Years";
pub const ALL_MONTHS: &str = "All Months";

/// A single-choice filter with a wildcard state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Facet<T> {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    /// Equality test against a column value; a null value never matches.
    pub fn admits<U>(&self, value: Option<&U>) -> bool
    where
        T: Borrow<U>,
        U: PartialEq + ?Sized,
    {
        match self {
            Self::All => true,
            Self::Only(expected) => value.is_some_and(|v| expected.borrow() == v),
        }
    }
}

impl Facet<String> {
    /// Parse a facet from user input; absent, `all`, or the wildcard label
    /// select everything.
    pub fn parse(raw: Option<&str>, wildcard: &str) -> Self {
        match raw.map(str::trim) {
            None => Self::All,
            Some(value) if is_wildcard(value, wildcard) => Self::All,
            Some(value) => Self::Only(value.to_string()),
        }
    }
}

pub(crate) fn is_wildcard(value: &str, wildcard: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case(wildcard)
}

/// A conjunction of facets over one row type.
pub trait FacetSet<R> {
    fn admits(&self, row: &R) -> bool;
}

/// Rows admitted by every facet, as a new table.
pub fn filter<R: Clone, F: FacetSet<R>>(rows: &[R], facets: &F) -> Vec<R> {
    rows.iter().filter(|row| facets.admits(row)).cloned().collect()
}

/// Facet selection on the inventory dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InventoryFacets {
    pub store: Facet<String>,
    pub category: Facet<String>,
    pub collection: Facet<String>,
    pub gender: Facet<String>,
}

impl FacetSet<InventoryItem> for InventoryFacets {
    fn admits(&self, row: &InventoryItem) -> bool {
        self.store.admits(Some(row.store_name.as_str()))
            && self.category.admits(row.category.as_deref())
            && self.collection.admits(row.collection.as_deref())
            && self.gender.admits(row.gender.as_deref())
    }
}

/// Facet selection on the sales dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SalesFacets {
    pub year: Facet<i32>,
    pub month: Facet<String>,
    pub store: Facet<String>,
    pub category: Facet<String>,
}

impl FacetSet<SaleRecord> for SalesFacets {
    fn admits(&self, row: &SaleRecord) -> bool {
        self.year.admits(Some(&row.year))
            && self.month.admits(Some(row.month_name))
            && self.store.admits(Some(row.store_name.as_str()))
            && self.category.admits(Some(row.product_category.label()))
    }
}

/// Choices offered for one facet, wildcard first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub facet: &'static str,
    pub options: Vec<String>,
}

impl FacetOptions {
    fn new(facet: &'static str, wildcard: &str, values: Vec<String>) -> Self {
        let mut options = Vec::with_capacity(values.len() + 1);
        options.push(wildcard.to_string());
        options.extend(values);
        Self { facet, options }
    }
}

/// Facet choices for the inventory dashboard.
pub fn inventory_options(rows: &[InventoryItem]) -> Vec<FacetOptions> {
    vec![
        FacetOptions::new("store", ALL_STORES, distinct(rows, InventoryDim::Store)),
        FacetOptions::new("category", ALL_CATEGORIES, distinct(rows, InventoryDim::Category)),
        FacetOptions::new(
            "collection",
            ALL_COLLECTIONS,
            distinct(rows, InventoryDim::Collection),
        ),
        FacetOptions::new("gender", ALL_GENDERS, distinct(rows, InventoryDim::Gender)),
    ]
}

/// Facet choices for the sales dashboard. Years run newest first.
pub fn sales_options(rows: &[SaleRecord]) -> Vec<FacetOptions> {
    let mut years = distinct(rows, SalesDim::Year);
    years.reverse();
    vec![
        FacetOptions::new("year", ALL_YEARS, years),
        FacetOptions::new("month", ALL_MONTHS, MONTHS.iter().map(|m| m.to_string()).collect()),
        FacetOptions::new("store", ALL_STORES, distinct(rows, SalesDim::Store)),
        FacetOptions::new("category", ALL_CATEGORIES, distinct(rows, SalesDim::Category)),
    ]
}

/// Most recent year present in the sales table.
pub fn latest_year(rows: &[SaleRecord]) -> Option<i32> {
    rows.iter().map(|row| row.year).max()
}
