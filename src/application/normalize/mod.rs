//! JSON-to-table normalization.
//!
//! Normalizers never fail: values that cannot be coerced fall back to a
//! default, and absent columns are reported as warnings on the result.

pub mod inventory;
pub mod sales;

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

pub use inventory::{normalize_inventory, RawInventory};
pub use sales::{normalize_sales, parse_month, RawSales};

/// A normalized table plus the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<R> {
    pub rows: Vec<R>,
    pub warnings: Vec<String>,
}

impl<R> Normalized<R> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Coerce a count-like value to a non-negative integer.
///
/// Numbers and numeric strings truncate toward zero; booleans count as 0/1;
/// anything else, negatives included, is 0.
#[must_use]
pub fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_or(0, truncate),
        Some(Value::Bool(b)) => u64::from(*b),
        _ => 0,
    }
}

fn truncate(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}

/// Coerce a money-like value to a decimal; unparseable input is zero.
#[must_use]
pub fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            .unwrap_or_default(),
        Some(Value::String(s)) => {
            let s = s.trim();
            Decimal::from_str(s)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Decimal::from_f64))
                .unwrap_or_default()
        }
        _ => Decimal::ZERO,
    }
}

/// A categorical cell: strings as-is, scalars stringified, everything else null.
pub(crate) fn categorical(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
