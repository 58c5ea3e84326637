//! Normalized sales rows and the derived fields they carry.

use std::borrow::Cow;
use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{Column, Record};

/// Month abbreviations in calendar order.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Product family derived from an item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ProductCategory {
    KimonoJacket,
    GiletJacket,
    TruckerJacket,
    ToteBag,
    CampaignHats,
    Shorts,
    Jeans,
    Skirt,
    BottleSling,
    Dress,
    Other,
    Unknown,
}

/// Substring rules, evaluated top to bottom; the first match wins.
const CATEGORY_RULES: &[(&[&str], ProductCategory)] = &[
    (&["Kimono"], ProductCategory::KimonoJacket),
    (&["Gilet"], ProductCategory::GiletJacket),
    (&["TP Jacket", "Trucker Jacket"], ProductCategory::TruckerJacket),
    (&["Tote"], ProductCategory::ToteBag),
    (&["Hat"], ProductCategory::CampaignHats),
    (&["Shorts"], ProductCategory::Shorts),
    (&["Jeans"], ProductCategory::Jeans),
    (&["Skirt"], ProductCategory::Skirt),
    (&["Bottle"], ProductCategory::BottleSling),
    (&["DRESS"], ProductCategory::Dress),
];

impl ProductCategory {
    /// Classify an item by name. A missing name is `Unknown`.
    #[must_use]
    pub fn classify(item_name: Option<&str>) -> Self {
        let Some(name) = item_name else {
            return Self::Unknown;
        };
        CATEGORY_RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|needle| name.contains(needle)))
            .map_or(Self::Other, |(_, category)| *category)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::KimonoJacket => "Kimono Jacket",
            Self::GiletJacket => "Gilet Jacket",
            Self::TruckerJacket => "TP/Trucker Jacket",
            Self::ToteBag => "Tote Bag",
            Self::CampaignHats => "Campaign Hats",
            Self::Shorts => "Shorts",
            Self::Jeans => "Jeans",
            Self::Skirt => "Skirt",
            Self::BottleSling => "Bottle Sling",
            Self::Dress => "Dress",
            Self::Other => "Other",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-letter abbreviation of a month.
#[must_use]
pub fn month_abbrev(month: Month) -> &'static str {
    MONTHS[month.number_from_month() as usize - 1]
}

/// Position of a month abbreviation in the calendar, if it is one.
#[must_use]
pub fn calendar_index(abbrev: &str) -> Option<usize> {
    MONTHS.iter().position(|m| *m == abbrev)
}

/// Display label of a month, e.g. `Jan 2025`.
#[must_use]
pub fn month_year_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Parse a `Jan 2025` label back into a sortable `(year, month)` pair.
#[must_use]
pub fn period_key(label: &str) -> Option<(i32, u32)> {
    let (month, year) = label.split_once(' ')?;
    let month = calendar_index(month)? as u32 + 1;
    Some((year.trim().parse().ok()?, month))
}

/// Date used when a record carries no usable month.
#[must_use]
pub fn placeholder_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Categorical columns of the sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesDim {
    Store,
    Item,
    Category,
    MonthName,
    Year,
    MonthYear,
}

impl Column for SalesDim {
    fn name(self) -> &'static str {
        match self {
            Self::Store => "store_name",
            Self::Item => "item_name",
            Self::Category => "product_category",
            Self::MonthName => "month_name",
            Self::Year => "year",
            Self::MonthYear => "month_year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesMeasure {
    Quantity,
    AveragePrice,
    Value,
}

impl Column for SalesMeasure {
    fn name(self) -> &'static str {
        match self {
            Self::Quantity => "total_quantity",
            Self::AveragePrice => "average_price",
            Self::Value => "total_value",
        }
    }
}

/// One item's sales at one store for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub store_name: String,
    pub item_name: Option<String>,
    pub date: NaiveDate,
    pub month_name: &'static str,
    pub year: i32,
    pub month_year: String,
    pub total_quantity: u64,
    pub average_price: Decimal,
    pub total_value: Decimal,
    pub product_category: ProductCategory,
}

impl SaleRecord {
    /// Build a record, deriving the date parts and product category.
    pub fn new(
        store_name: impl Into<String>,
        item_name: Option<String>,
        date: NaiveDate,
        total_quantity: u64,
        average_price: Decimal,
        total_value: Decimal,
    ) -> Self {
        let product_category = ProductCategory::classify(item_name.as_deref());
        let month = Month::try_from(date.month() as u8).unwrap_or(Month::January);
        Self {
            store_name: store_name.into(),
            item_name,
            date,
            month_name: month_abbrev(month),
            year: date.year(),
            month_year: month_year_label(date),
            total_quantity,
            average_price,
            total_value,
            product_category,
        }
    }
}

impl Record for SaleRecord {
    type Dim = SalesDim;
    type Measure = SalesMeasure;

    fn dim(&self, dim: SalesDim) -> Option<Cow<'_, str>> {
        match dim {
            SalesDim::Store => Some(Cow::Borrowed(&self.store_name)),
            SalesDim::Item => self.item_name.as_deref().map(Cow::Borrowed),
            SalesDim::Category => Some(Cow::Borrowed(self.product_category.label())),
            SalesDim::MonthName => Some(Cow::Borrowed(self.month_name)),
            SalesDim::Year => Some(Cow::Owned(self.year.to_string())),
            SalesDim::MonthYear => Some(Cow::Borrowed(&self.month_year)),
        }
    }

    fn measure(&self, measure: SalesMeasure) -> Decimal {
        match measure {
            SalesMeasure::Quantity => Decimal::from(self.total_quantity),
            SalesMeasure::AveragePrice => self.average_price,
            SalesMeasure::Value => self.total_value,
        }
    }
}
