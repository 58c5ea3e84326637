//! Inventory normalizer: per-store item lists to one flat table.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::{categorical, coerce_count, Normalized};
use crate::domain::aggregate::Column;
use crate::domain::{InventoryDim, InventoryItem, UNKNOWN};

/// Raw inventory payload: store name to that store's item records.
/// Records stay untyped so one malformed entry cannot sink the payload.
pub type RawInventory = BTreeMap<String, Vec<Value>>;

/// Flatten `raw` into one row per item record.
///
/// The store name is the payload key with surrounding whitespace removed.
/// An optional column missing from every record is filled with
/// [`UNKNOWN`] for the whole table; a column present somewhere keeps its
/// per-row nulls. Entries that are not objects are skipped with a warning.
pub fn normalize_inventory(raw: &RawInventory) -> Normalized<InventoryItem> {
    let mut warnings = Vec::new();
    let skipped = raw
        .values()
        .flatten()
        .filter(|record| !record.is_object())
        .count();
    if skipped > 0 {
        warn!(records = skipped, "Skipping malformed inventory records");
        warnings.push(format!(
            "{skipped} inventory record(s) are not objects and were skipped."
        ));
    }

    let mut rows: Vec<InventoryItem> = raw
        .iter()
        .flat_map(|(store, items)| {
            let store = store.trim();
            items.iter().filter_map(Value::as_object).map(move |record| {
                let mut item = InventoryItem::new(store, coerce_count(record.get("count")));
                for dim in InventoryDim::ATTRIBUTES {
                    if let Some(slot) = item.attribute_mut(dim) {
                        *slot = categorical(record.get(dim.name()));
                    }
                }
                item
            })
        })
        .collect();

    if !rows.is_empty() {
        for dim in InventoryDim::ATTRIBUTES {
            let present = raw
                .values()
                .flatten()
                .filter_map(Value::as_object)
                .any(|record| record.contains_key(dim.name()));
            if present {
                continue;
            }
            warn!(column = dim.name(), "Column absent from inventory payload");
            warnings.push(format!(
                "No '{}' field found in inventory data; using '{UNKNOWN}'.",
                dim.name()
            ));
            for row in &mut rows {
                if let Some(slot) = row.attribute_mut(dim) {
                    *slot = Some(UNKNOWN.to_string());
                }
            }
        }
    }

    debug!(stores = raw.len(), rows = rows.len(), "Normalized inventory");
    Normalized { rows, warnings }
}
