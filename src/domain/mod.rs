//! Retail domain: normalized rows, facets, aggregation, and page descriptions.

pub mod aggregate;
pub mod chart;
pub mod facet;
pub mod inventory;
pub mod sales;

// Normalized rows
pub use inventory::{InventoryDim, InventoryItem, InventoryMeasure, UNKNOWN};
pub use sales::{ProductCategory, SaleRecord, SalesDim, SalesMeasure};

// Facets
pub use facet::{Facet, FacetOptions, FacetSet, InventoryFacets, SalesFacets};

// Pages
pub use chart::{Chart, ChartBody, ChartKind, Metric, Notice, Page, NO_DATA};
