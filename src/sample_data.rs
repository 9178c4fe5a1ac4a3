//! Embedded sample datasets used by the fallback widget builder.
//!
//! Five per-product monthly series plus quarterly, regional and category
//! aggregates. Everything here is immutable; the combined "all products" view is
//! built once on first access.

use crate::widget::DataField;
use lazy_static::lazy_static;
use serde::Serialize;

/// One row of a sample dataset. Only `sales` is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDataPoint {
    pub month: Option<&'static str>,
    pub quarter: Option<&'static str>,
    pub year: Option<u32>,
    pub sales: f64,
    pub revenue: Option<f64>,
    pub expenses: Option<f64>,
    pub profit: Option<f64>,
    pub units: Option<f64>,
    pub customers: Option<f64>,
    pub product: Option<&'static str>,
    pub category: Option<&'static str>,
    pub region: Option<&'static str>,
}

impl SampleDataPoint {
    pub fn metric(&self, field: DataField) -> Option<f64> {
        match field {
            DataField::Sales => Some(self.sales),
            DataField::Revenue => self.revenue,
            DataField::Expenses => self.expenses,
            DataField::Profit => self.profit,
            DataField::Units => self.units,
            DataField::Customers => self.customers,
        }
    }

    /// Missing metrics count as zero.
    pub fn metric_or_zero(&self, field: DataField) -> f64 {
        self.metric(field).unwrap_or(0.0)
    }

    /// The row's identifying dimension: month, quarter, region or category, in that order.
    pub fn identifier(&self) -> &'static str {
        self.month
            .or(self.quarter)
            .or(self.region)
            .or(self.category)
            .unwrap_or("")
    }
}

macro_rules! monthly {
    ($product:literal, $category:literal, $region:literal;
     $( $month:literal => [$sales:literal, $revenue:literal, $expenses:literal, $profit:literal, $units:literal, $customers:literal] ),* $(,)?) => {
        &[ $( SampleDataPoint {
            month: Some($month),
            quarter: None,
            year: None,
            sales: $sales,
            revenue: Some($revenue),
            expenses: Some($expenses),
            profit: Some($profit),
            units: Some($units),
            customers: Some($customers),
            product: Some($product),
            category: Some($category),
            region: Some($region),
        } ),* ]
    };
}

pub static PRODUCT_A: &[SampleDataPoint] = monthly! {
    "Product A", "Electronics", "North";
    "Jan" => [2000.0, 5000.0, 3000.0, 2000.0, 100.0, 85.0],
    "Feb" => [2500.0, 6000.0, 3200.0, 2800.0, 125.0, 95.0],
    "Mar" => [1800.0, 4800.0, 2800.0, 2000.0, 90.0, 75.0],
    "Apr" => [2200.0, 5500.0, 3100.0, 2400.0, 110.0, 88.0],
    "May" => [3000.0, 7200.0, 4000.0, 3200.0, 150.0, 120.0],
    "Jun" => [2800.0, 6800.0, 3800.0, 3000.0, 140.0, 115.0],
    "Jul" => [3200.0, 7500.0, 4200.0, 3300.0, 160.0, 130.0],
    "Aug" => [2900.0, 7000.0, 3900.0, 3100.0, 145.0, 118.0],
    "Sep" => [2600.0, 6300.0, 3500.0, 2800.0, 130.0, 105.0],
    "Oct" => [3100.0, 7400.0, 4100.0, 3300.0, 155.0, 125.0],
    "Nov" => [3400.0, 8000.0, 4400.0, 3600.0, 170.0, 140.0],
    "Dec" => [3600.0, 8500.0, 4600.0, 3900.0, 180.0, 150.0],
};

pub static PRODUCT_B: &[SampleDataPoint] = monthly! {
    "Product B", "Clothing", "South";
    "Jan" => [1500.0, 4500.0, 2500.0, 2000.0, 75.0, 60.0],
    "Feb" => [1800.0, 5400.0, 2800.0, 2600.0, 90.0, 72.0],
    "Mar" => [2000.0, 6000.0, 3000.0, 3000.0, 100.0, 80.0],
    "Apr" => [1700.0, 5100.0, 2700.0, 2400.0, 85.0, 68.0],
    "May" => [2200.0, 6600.0, 3300.0, 3300.0, 110.0, 88.0],
    "Jun" => [2400.0, 7200.0, 3600.0, 3600.0, 120.0, 96.0],
};

pub static PRODUCT_C: &[SampleDataPoint] = monthly! {
    "Product C", "Home & Garden", "East";
    "Jan" => [1200.0, 3600.0, 2000.0, 1600.0, 60.0, 50.0],
    "Feb" => [1400.0, 4200.0, 2200.0, 2000.0, 70.0, 58.0],
    "Mar" => [1600.0, 4800.0, 2400.0, 2400.0, 80.0, 65.0],
    "Apr" => [1800.0, 5400.0, 2600.0, 2800.0, 90.0, 72.0],
    "May" => [2000.0, 6000.0, 2800.0, 3200.0, 100.0, 80.0],
    "Jun" => [2200.0, 6600.0, 3000.0, 3600.0, 110.0, 88.0],
    "Jul" => [2400.0, 7200.0, 3200.0, 4000.0, 120.0, 96.0],
    "Aug" => [2100.0, 6300.0, 2900.0, 3400.0, 105.0, 84.0],
    "Sep" => [1900.0, 5700.0, 2700.0, 3000.0, 95.0, 76.0],
    "Oct" => [2300.0, 6900.0, 3100.0, 3800.0, 115.0, 92.0],
    "Nov" => [2500.0, 7500.0, 3300.0, 4200.0, 125.0, 100.0],
    "Dec" => [2700.0, 8100.0, 3500.0, 4600.0, 135.0, 108.0],
};

pub static PRODUCT_D: &[SampleDataPoint] = monthly! {
    "Product D", "Sports", "West";
    "Jan" => [3000.0, 9000.0, 4500.0, 4500.0, 150.0, 120.0],
    "Feb" => [3200.0, 9600.0, 4800.0, 4800.0, 160.0, 128.0],
    "Mar" => [2800.0, 8400.0, 4200.0, 4200.0, 140.0, 112.0],
    "Apr" => [3500.0, 10500.0, 5250.0, 5250.0, 175.0, 140.0],
    "May" => [3800.0, 11400.0, 5700.0, 5700.0, 190.0, 152.0],
    "Jun" => [4000.0, 12000.0, 6000.0, 6000.0, 200.0, 160.0],
    "Jul" => [4200.0, 12600.0, 6300.0, 6300.0, 210.0, 168.0],
    "Aug" => [3900.0, 11700.0, 5850.0, 5850.0, 195.0, 156.0],
    "Sep" => [3600.0, 10800.0, 5400.0, 5400.0, 180.0, 144.0],
    "Oct" => [4100.0, 12300.0, 6150.0, 6150.0, 205.0, 164.0],
    "Nov" => [4400.0, 13200.0, 6600.0, 6600.0, 220.0, 176.0],
    "Dec" => [4600.0, 13800.0, 6900.0, 6900.0, 230.0, 184.0],
};

pub static PRODUCT_E: &[SampleDataPoint] = monthly! {
    "Product E", "Books", "Central";
    "Jan" => [1800.0, 5400.0, 2700.0, 2700.0, 90.0, 72.0],
    "Feb" => [2000.0, 6000.0, 3000.0, 3000.0, 100.0, 80.0],
    "Mar" => [1900.0, 5700.0, 2850.0, 2850.0, 95.0, 76.0],
    "Apr" => [2100.0, 6300.0, 3150.0, 3150.0, 105.0, 84.0],
    "May" => [2300.0, 6900.0, 3450.0, 3450.0, 115.0, 92.0],
    "Jun" => [2400.0, 7200.0, 3600.0, 3600.0, 120.0, 96.0],
    "Jul" => [2500.0, 7500.0, 3750.0, 3750.0, 125.0, 100.0],
    "Aug" => [2200.0, 6600.0, 3300.0, 3300.0, 110.0, 88.0],
    "Sep" => [2000.0, 6000.0, 3000.0, 3000.0, 100.0, 80.0],
    "Oct" => [2400.0, 7200.0, 3600.0, 3600.0, 120.0, 96.0],
    "Nov" => [2600.0, 7800.0, 3900.0, 3900.0, 130.0, 104.0],
    "Dec" => [2800.0, 8400.0, 4200.0, 4200.0, 140.0, 112.0],
};

pub static QUARTERLY: &[SampleDataPoint] = &[
    quarter("Q1", [6300.0, 15800.0, 9000.0, 6800.0, 315.0, 255.0]),
    quarter("Q2", [8000.0, 19500.0, 10900.0, 8600.0, 400.0, 323.0]),
    quarter("Q3", [8700.0, 20800.0, 11600.0, 9200.0, 435.0, 353.0]),
    quarter("Q4", [10100.0, 23900.0, 13100.0, 10800.0, 505.0, 413.0]),
];

pub static REGIONAL: &[SampleDataPoint] = &[
    region("North", [31200.0, 74800.0, 41600.0, 33200.0, 1560.0, 1283.0]),
    region("South", [11600.0, 34800.0, 17900.0, 16900.0, 580.0, 464.0]),
    region("East", [23200.0, 69600.0, 33200.0, 36400.0, 1160.0, 928.0]),
    region("West", [42900.0, 128700.0, 64350.0, 64350.0, 2145.0, 1716.0]),
    region("Central", [25000.0, 75000.0, 37500.0, 37500.0, 1250.0, 1000.0]),
];

pub static CATEGORY: &[SampleDataPoint] = &[
    category("Electronics", [31200.0, 74800.0, 41600.0, 33200.0, 1560.0, 1283.0]),
    category("Clothing", [11600.0, 34800.0, 17900.0, 16900.0, 580.0, 464.0]),
    category("Home & Garden", [23200.0, 69600.0, 33200.0, 36400.0, 1160.0, 928.0]),
    category("Sports", [42900.0, 128700.0, 64350.0, 64350.0, 2145.0, 1716.0]),
    category("Books", [25000.0, 75000.0, 37500.0, 37500.0, 1250.0, 1000.0]),
];

const SAMPLE_YEAR: u32 = 2024;

const fn aggregate(metrics: [f64; 6]) -> SampleDataPoint {
    SampleDataPoint {
        month: None,
        quarter: None,
        year: None,
        sales: metrics[0],
        revenue: Some(metrics[1]),
        expenses: Some(metrics[2]),
        profit: Some(metrics[3]),
        units: Some(metrics[4]),
        customers: Some(metrics[5]),
        product: None,
        category: None,
        region: None,
    }
}

const fn quarter(name: &'static str, metrics: [f64; 6]) -> SampleDataPoint {
    SampleDataPoint {
        quarter: Some(name),
        year: Some(SAMPLE_YEAR),
        ..aggregate(metrics)
    }
}

const fn region(name: &'static str, metrics: [f64; 6]) -> SampleDataPoint {
    SampleDataPoint {
        region: Some(name),
        year: Some(SAMPLE_YEAR),
        ..aggregate(metrics)
    }
}

const fn category(name: &'static str, metrics: [f64; 6]) -> SampleDataPoint {
    SampleDataPoint {
        category: Some(name),
        ..aggregate(metrics)
    }
}

pub const DEFAULT_PRODUCT: &str = "Product A";

pub const PRODUCT_NAMES: [&str; 5] = [
    "Product A",
    "Product B",
    "Product C",
    "Product D",
    "Product E",
];

lazy_static! {
    static ref ALL_PRODUCTS: Vec<SampleDataPoint> =
        [PRODUCT_A, PRODUCT_B, PRODUCT_C, PRODUCT_D, PRODUCT_E]
            .iter()
            .flat_map(|rows| rows.iter().cloned())
            .collect();
}

/// Monthly rows for a product; unknown names resolve to Product A.
pub fn product_data(product: &str) -> &'static [SampleDataPoint] {
    match product {
        "Product B" => PRODUCT_B,
        "Product C" => PRODUCT_C,
        "Product D" => PRODUCT_D,
        "Product E" => PRODUCT_E,
        _ => PRODUCT_A,
    }
}

/// Concatenation of the five product datasets, A through E.
pub fn all_products() -> &'static [SampleDataPoint] {
    ALL_PRODUCTS.as_slice()
}

/// Lookup by display key, e.g. `"Product C"`, `"Quarterly"`, `"All Products"`.
pub fn data_source(key: &str) -> Option<&'static [SampleDataPoint]> {
    match key {
        "Product A" => Some(PRODUCT_A),
        "Product B" => Some(PRODUCT_B),
        "Product C" => Some(PRODUCT_C),
        "Product D" => Some(PRODUCT_D),
        "Product E" => Some(PRODUCT_E),
        "Quarterly" => Some(QUARTERLY),
        "Regional" => Some(REGIONAL),
        "Category" => Some(CATEGORY),
        "All Products" => Some(all_products()),
        _ => None,
    }
}

pub const DATA_SOURCE_KEYS: [&str; 9] = [
    "Product A",
    "Product B",
    "Product C",
    "Product D",
    "Product E",
    "Quarterly",
    "Regional",
    "Category",
    "All Products",
];
