//! Inventory dashboard pages.

use crate::domain::aggregate::{
    distinct, group_sum, has_values, hierarchy, parallel_axes, pivot, sum, TOP_N,
};
use crate::domain::chart::format_count;
use crate::domain::facet::{filter, Facet};
use crate::domain::{
    Chart, ChartBody, ChartKind, InventoryDim, InventoryFacets, InventoryItem, InventoryMeasure,
    Page, NO_DATA,
};
use crate::error::ChartError;

const COUNT: InventoryMeasure = InventoryMeasure::Count;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InventoryView {
    #[default]
    Overview,
    Stores,
    Products,
}

/// Drill-down choices used when the matching facet is the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFocus {
    pub store: Option<String>,
    pub category: Option<String>,
    pub collection: Option<String>,
}

/// Build one inventory page.
///
/// `all` is the whole normalized table and `filtered` the subset admitted
/// by `facets`. The store view drills into the full table when no store
/// facet is set.
pub fn build_page(
    view: InventoryView,
    all: &[InventoryItem],
    filtered: &[InventoryItem],
    facets: &InventoryFacets,
    focus: &InventoryFocus,
) -> Page {
    match view {
        InventoryView::Overview => overview(filtered),
        InventoryView::Stores => stores(all, filtered, facets, focus),
        InventoryView::Products => products(filtered, facets, focus),
    }
}

fn overview(rows: &[InventoryItem]) -> Page {
    let mut page = Page::new("Inventory Overview");
    if rows.is_empty() {
        page.info(NO_DATA);
        return page;
    }

    page.metric("Total Inventory Items", format_count(sum(rows, COUNT)));
    page.metric("Total Stores", distinct(rows, InventoryDim::Store).len().to_string());
    page.metric(
        "Product Categories",
        distinct(rows, InventoryDim::Category).len().to_string(),
    );
    page.metric(
        "Collections",
        distinct(rows, InventoryDim::Collection).len().to_string(),
    );

    page.chart(Chart::grouped(
        "Total Inventory by Store",
        ChartKind::Bar,
        group_sum(rows, &[InventoryDim::Store], COUNT).sort_desc(),
    ));
    page.chart(breakdown(
        rows,
        InventoryDim::Category,
        "Inventory Distribution by Category",
        ChartKind::Pie,
        true,
    ));
    page.chart(breakdown(
        rows,
        InventoryDim::Collection,
        "Inventory by Collection",
        ChartKind::Bar,
        true,
    ));
    page.chart(breakdown(
        rows,
        InventoryDim::Gender,
        "Inventory Distribution by Gender",
        ChartKind::Pie,
        false,
    ));
    page
}

/// Count by one attribute, or a placeholder when the attribute is never set.
fn breakdown(
    rows: &[InventoryItem],
    dim: InventoryDim,
    title: impl Into<String>,
    kind: ChartKind,
    descending: bool,
) -> Chart {
    if !has_values(rows, dim) {
        return Chart::no_data(title, kind, &missing(dim));
    }
    let grouped = group_sum(rows, &[dim], COUNT);
    let grouped = if descending { grouped.sort_desc() } else { grouped };
    Chart::grouped(title, kind, grouped)
}

fn missing(dim: InventoryDim) -> String {
    let name = match dim {
        InventoryDim::Store => "store",
        InventoryDim::Category => "category",
        InventoryDim::Collection => "collection",
        InventoryDim::Gender => "gender",
        InventoryDim::Size => "size",
    };
    format!("No {name} data available for visualization.")
}

fn stores(
    all: &[InventoryItem],
    filtered: &[InventoryItem],
    facets: &InventoryFacets,
    focus: &InventoryFocus,
) -> Page {
    let mut page = Page::new("Store Inventory Analysis");
    if filtered.is_empty() {
        page.info(NO_DATA);
        return page;
    }

    let (store, rows) = match &facets.store {
        Facet::Only(store) => (store.clone(), filtered.to_vec()),
        Facet::All => {
            let Some(store) = focus
                .store
                .clone()
                .or_else(|| distinct(all, InventoryDim::Store).into_iter().next())
            else {
                page.info(NO_DATA);
                return page;
            };
            let subset = filter(
                all,
                &InventoryFacets {
                    store: Facet::Only(store.clone()),
                    ..InventoryFacets::default()
                },
            );
            (store, subset)
        }
    };
    page.title = format!("Store Inventory Analysis: {store}");
    if rows.is_empty() {
        page.info(format!("No inventory recorded for {store}."));
        return page;
    }

    page.metric("Total Inventory", format_count(sum(&rows, COUNT)));
    page.metric(
        "Categories",
        distinct(&rows, InventoryDim::Category).len().to_string(),
    );
    page.metric(
        "Collections",
        distinct(&rows, InventoryDim::Collection).len().to_string(),
    );

    if has_values(&rows, InventoryDim::Category) && has_values(&rows, InventoryDim::Collection) {
        page.chart(Chart::attempt(
            format!("Category × Collection Heatmap for {store}"),
            ChartKind::Heatmap,
            "Could not create heatmap",
            pivot(&rows, InventoryDim::Category, InventoryDim::Collection, COUNT)
                .map(ChartBody::Matrix),
        ));
    }

    if has_values(&rows, InventoryDim::Collection) {
        page.chart(Chart::grouped(
            format!("Top 10 Collections in {store}"),
            ChartKind::Bar,
            group_sum(&rows, &[InventoryDim::Collection], COUNT)
                .sort_desc()
                .top(TOP_N),
        ));
        page.chart(breakdown(
            &rows,
            InventoryDim::Size,
            format!("Size Distribution in {store}"),
            ChartKind::Pie,
            true,
        ));
    }

    let mut path = vec![InventoryDim::Store];
    path.extend(
        InventoryDim::ATTRIBUTES
            .into_iter()
            .filter(|dim| has_values(&rows, *dim)),
    );
    page.chart(Chart::attempt(
        format!("Inventory Hierarchy in {store}"),
        ChartKind::Treemap,
        "Could not create treemap",
        hierarchy(&rows, &path, COUNT).map(ChartBody::from_grouped),
    ));
    page
}

fn products(rows: &[InventoryItem], facets: &InventoryFacets, focus: &InventoryFocus) -> Page {
    let mut page = Page::new("Product Category and Collection Analysis");
    if rows.is_empty() {
        page.info(NO_DATA);
        return page;
    }

    // Category drill-down
    match drill_down(rows, InventoryDim::Category, &facets.category, focus.category.as_deref()) {
        Drill::Unavailable => page.info("No category data available for analysis."),
        Drill::Empty(category) => page.info(format!(
            "No {category} products with the current filters."
        )),
        Drill::Subset(category, subset) => {
            page.chart(Chart::grouped(
                format!("Stores with {category} Products"),
                ChartKind::Bar,
                group_sum(&subset, &[InventoryDim::Store], COUNT).sort_desc(),
            ));
            if has_values(&subset, InventoryDim::Collection) {
                page.chart(Chart::grouped(
                    format!("Collections in {category} Category"),
                    ChartKind::Pie,
                    group_sum(&subset, &[InventoryDim::Collection], COUNT).sort_desc(),
                ));
            }
        }
    }

    // Collection drill-down
    match drill_down(
        rows,
        InventoryDim::Collection,
        &facets.collection,
        focus.collection.as_deref(),
    ) {
        Drill::Unavailable => page.info("No collection data available for analysis."),
        Drill::Empty(collection) => page.info(format!(
            "No {collection} collection items with the current filters."
        )),
        Drill::Subset(collection, subset) => {
            page.chart(Chart::grouped(
                format!("Stores with {collection} Collection"),
                ChartKind::Bar,
                group_sum(&subset, &[InventoryDim::Store], COUNT).sort_desc(),
            ));
            if has_values(&subset, InventoryDim::Size) {
                page.chart(Chart::grouped(
                    format!("Size Distribution in {collection} Collection"),
                    ChartKind::Pie,
                    group_sum(&subset, &[InventoryDim::Size], COUNT).sort_desc(),
                ));
            }
        }
    }

    page.chart(product_hierarchy(rows));
    page.chart(multi_dimensional(rows));
    page
}

enum Drill {
    Unavailable,
    Empty(String),
    Subset(String, Vec<InventoryItem>),
}

/// Pick the value to drill into: the facet, else the focus, else the first
/// value present.
fn drill_down(
    rows: &[InventoryItem],
    dim: InventoryDim,
    facet: &Facet<String>,
    focus: Option<&str>,
) -> Drill {
    if !has_values(rows, dim) {
        return Drill::Unavailable;
    }
    if let Facet::Only(value) = facet {
        return Drill::Subset(value.clone(), rows.to_vec());
    }

    let Some(value) = focus
        .map(str::to_string)
        .or_else(|| distinct(rows, dim).into_iter().next())
    else {
        return Drill::Unavailable;
    };
    let subset: Vec<InventoryItem> = rows
        .iter()
        .filter(|row| row.attribute(dim) == Some(value.as_str()))
        .cloned()
        .collect();
    if subset.is_empty() {
        Drill::Empty(value)
    } else {
        Drill::Subset(value, subset)
    }
}

fn product_hierarchy(rows: &[InventoryItem]) -> Chart {
    const TITLE: &str = "Product Hierarchy";
    let path: Vec<InventoryDim> = InventoryDim::ATTRIBUTES
        .into_iter()
        .filter(|dim| has_values(rows, *dim))
        .collect();
    if path.is_empty() {
        return Chart::no_data(
            TITLE,
            ChartKind::Sunburst,
            "Not enough hierarchical data available for visualization.",
        );
    }
    Chart::attempt(
        TITLE,
        ChartKind::Sunburst,
        "Could not create sunburst chart",
        hierarchy(rows, &path, COUNT).map(ChartBody::from_grouped),
    )
}

fn multi_dimensional(rows: &[InventoryItem]) -> Chart {
    const TITLE: &str = "Multi-Dimensional Product Analysis";
    let dims = [
        InventoryDim::Store,
        InventoryDim::Category,
        InventoryDim::Collection,
        InventoryDim::Gender,
        InventoryDim::Size,
    ];
    match parallel_axes(rows, &dims, COUNT) {
        Ok(axes) => Chart::new(TITLE, ChartKind::ParallelCoordinates, ChartBody::Axes { axes }),
        Err(ChartError::NotEnoughDimensions { .. }) => Chart::no_data(
            TITLE,
            ChartKind::ParallelCoordinates,
            "Not enough dimensions available for multi-dimensional analysis.",
        ),
        Err(err) => Chart::attempt(
            TITLE,
            ChartKind::ParallelCoordinates,
            "Could not create parallel coordinates",
            Err(err),
        ),
    }
}
