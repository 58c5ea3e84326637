//! Normalized inventory rows.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{Column, Record};

/// Sentinel for a categorical value that is absent from the source.
pub const UNKNOWN: &str = "Unknown";

/// Categorical columns of the inventory table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryDim {
    Store,
    Category,
    Collection,
    Gender,
    Size,
}

impl InventoryDim {
    /// Optional attribute columns, in hierarchy order.
    pub const ATTRIBUTES: [Self; 4] = [Self::Category, Self::Collection, Self::Gender, Self::Size];
}

impl Column for InventoryDim {
    fn name(self) -> &'static str {
        match self {
            Self::Store => "store_name",
            Self::Category => "category",
            Self::Collection => "collection",
            Self::Gender => "gender",
            Self::Size => "size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryMeasure {
    Count,
}

impl Column for InventoryMeasure {
    fn name(self) -> &'static str {
        "count"
    }
}

/// One stocked item line at one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    pub store_name: String,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub count: u64,
}

impl InventoryItem {
    /// Row with every optional attribute absent.
    pub fn new(store_name: impl Into<String>, count: u64) -> Self {
        Self {
            store_name: store_name.into(),
            category: None,
            collection: None,
            gender: None,
            size: None,
            count,
        }
    }

    #[must_use]
    pub fn attribute(&self, dim: InventoryDim) -> Option<&str> {
        match dim {
            InventoryDim::Store => Some(&self.store_name),
            InventoryDim::Category => self.category.as_deref(),
            InventoryDim::Collection => self.collection.as_deref(),
            InventoryDim::Gender => self.gender.as_deref(),
            InventoryDim::Size => self.size.as_deref(),
        }
    }

    pub(crate) fn attribute_mut(&mut self, dim: InventoryDim) -> Option<&mut Option<String>> {
        match dim {
            InventoryDim::Store => None,
            InventoryDim::Category => Some(&mut self.category),
            InventoryDim::Collection => Some(&mut self.collection),
            InventoryDim::Gender => Some(&mut self.gender),
            InventoryDim::Size => Some(&mut self.size),
        }
    }
}

impl Record for InventoryItem {
    type Dim = InventoryDim;
    type Measure = InventoryMeasure;

    fn dim(&self, dim: InventoryDim) -> Option<Cow<'_, str>> {
        self.attribute(dim).map(Cow::Borrowed)
    }

    fn measure(&self, _: InventoryMeasure) -> Decimal {
        Decimal::from(self.count)
    }
}
