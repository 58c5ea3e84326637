//! Canned response bodies shaped like the live reporting APIs.

use serde_json::{json, Value};

/// Inventory envelope wrapping `data` as a structured object.
pub fn inventory_envelope(data: Value) -> Value {
    json!({ "status": "success", "data": data })
}

/// Inventory envelope wrapping `data` as a JSON-encoded string.
pub fn inventory_envelope_encoded(data: &Value) -> Value {
    json!({ "status": "success", "data": data.to_string() })
}

/// A small two-store inventory payload.
pub fn inventory_stores() -> Value {
    json!({
        " Store A ": [
            {"category": "Tops", "collection": "Summer", "gender": "Women", "size": "M", "count": "5"},
            {"category": "Bottoms", "collection": "Denim", "gender": "Men", "size": "L", "count": 2},
            {"category": "Tops", "collection": "Denim", "size": "S", "count": 4.9}
        ],
        "Store B": [
            {"category": "Tops", "collection": "Summer", "gender": "Women", "size": "M", "count": 3},
            {"category": "Accessories", "gender": "Unisex", "count": "n/a"}
        ]
    })
}

/// One sales record.
pub fn sale(store: &str, item: &str, month: &str, quantity: u64, price: f64, value: f64) -> Value {
    json!({
        "store_name": store,
        "item_name": item,
        "month": month,
        "total_quantity": quantity,
        "average_price": price,
        "total_value": value,
    })
}

/// Sales envelope; the live API sends no `status` field.
pub fn sales_envelope(records: Vec<Value>) -> Value {
    json!({ "data": records })
}

/// A small sales payload spanning two years.
pub fn sales_records() -> Vec<Value> {
    vec![
        sale("Store A", "Kimono Gilet Jacket", "2024-11-01", 2, 100.0, 200.0),
        sale("Store A", "Slim Jeans", "2024-12-01", 4, 50.0, 200.0),
        sale("Store B ", "Canvas Tote", "2025-01-01", 10, 20.0, 200.0),
        sale("Store A", "Slim Jeans", "2025-01-01", 6, 50.0, 300.0),
        sale("Store B", "Campaign Hat", "2025-02-01", 3, 30.0, 90.0),
        sale("Store A", "Denim Shorts", "2025-02-01", 5, 40.0, 200.0),
    ]
}
