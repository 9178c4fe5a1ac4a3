//! Rule-based prompt parser.
//!
//! Turns a free-text dashboard request into an [`Intent`]. Every field is resolved
//! by an ordered rule table; the first matching rule wins, so the order of the
//! tables below is part of the behaviour (e.g. "profit" beats "revenue").

use crate::widget::{ChartType, DataField, DataSource, WidgetKind};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured request extracted from a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub widget_type: WidgetKind,
    pub chart_type: ChartType,
    pub data_field: DataField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Parsed for the frontend; the fallback builder does not filter on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Parsed for the frontend; the fallback builder does not filter on it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

type Rule<T> = (&'static [&'static str], T);

const TABLE_KEYWORDS: &[&str] = &["table", "tabular", "grid", "spreadsheet"];

const CHART_TYPE_RULES: &[Rule<ChartType>] = &[
    (&["line", "trend"], ChartType::Line),
    (&["pie"], ChartType::Pie),
    (&["area"], ChartType::Area),
    (&["donut"], ChartType::Donut),
];

const DATA_FIELD_RULES: &[Rule<DataField>] = &[
    (&["profit"], DataField::Profit),
    (&["revenue"], DataField::Revenue),
    (&["expense"], DataField::Expenses),
    (&["unit"], DataField::Units),
    (&["customer"], DataField::Customers),
];

const PRODUCT_RULES: &[Rule<&str>] = &[
    (&["product a"], "Product A"),
    (&["product b"], "Product B"),
    (&["product c"], "Product C"),
    (&["product d"], "Product D"),
    (&["product e"], "Product E"),
];

const REGION_RULES: &[Rule<&str>] = &[
    (&["north"], "North"),
    (&["south"], "South"),
    (&["east"], "East"),
    (&["west"], "West"),
    (&["central"], "Central"),
];

const CATEGORY_RULES: &[Rule<&str>] = &[
    (&["electronic"], "Electronics"),
    (&["cloth"], "Clothing"),
    (&["home", "garden"], "Home & Garden"),
    (&["sport"], "Sports"),
    (&["book"], "Books"),
];

lazy_static! {
    static ref MONTH_COUNT: Option<Regex> = Regex::new(r"(?i)([0-9]+)\s*month").ok();
    static ref PRODUCT_LETTER: Option<Regex> = Regex::new(r"(?i)product\s+([a-e])").ok();
    static ref QUARTER_CODE: Option<Regex> = Regex::new(r"(?i)q[1-4]").ok();
}

fn first_match<T: Copy>(lower: &str, rules: &[Rule<T>]) -> Option<T> {
    rules
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, value)| *value)
}

/// Parse a prompt into an intent. Never fails; unmatched fields take defaults.
pub fn parse_prompt(prompt: &str) -> Intent {
    let product = extract_product(prompt);
    let data_source = extract_data_source(prompt, product.as_deref());

    Intent {
        widget_type: extract_widget_type(prompt),
        chart_type: extract_chart_type(prompt),
        data_field: extract_data_field(prompt),
        filter_months: extract_month_filter(prompt),
        product,
        category: extract_category(prompt),
        region: extract_region(prompt),
        data_source,
    }
}

pub fn extract_widget_type(prompt: &str) -> WidgetKind {
    let lower = prompt.to_lowercase();

    let has_table_keyword = TABLE_KEYWORDS.iter().any(|k| lower.contains(k));
    let asks_for_raw_data = lower.contains("show")
        && lower.contains("data")
        && !lower.contains("chart")
        && !lower.contains("graph");

    if has_table_keyword || asks_for_raw_data {
        WidgetKind::Table
    } else {
        WidgetKind::Chart
    }
}

pub fn extract_chart_type(prompt: &str) -> ChartType {
    first_match(&prompt.to_lowercase(), CHART_TYPE_RULES).unwrap_or_default()
}

pub fn extract_data_field(prompt: &str) -> DataField {
    first_match(&prompt.to_lowercase(), DATA_FIELD_RULES).unwrap_or_default()
}

/// "last 4 months" -> 4. Zero means no filter; counts past `u32::MAX` saturate.
pub fn extract_month_filter(prompt: &str) -> Option<u32> {
    let lower = prompt.to_lowercase();

    if let Some(caps) = MONTH_COUNT.as_ref().and_then(|re| re.captures(&lower)) {
        return caps
            .get(1)
            .map(|m| saturating_count(m.as_str()))
            .filter(|n| *n > 0);
    }

    if lower.contains("last 3 month") {
        return Some(3);
    }
    if lower.contains("last 6 month") {
        return Some(6);
    }

    None
}

/// `digits` is ASCII digits only; anything too large for `u32` becomes `u32::MAX`.
fn saturating_count(digits: &str) -> u32 {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return 0;
    }
    trimmed.parse::<u32>().unwrap_or(u32::MAX)
}

pub fn extract_product(prompt: &str) -> Option<String> {
    let lower = prompt.to_lowercase();

    let by_letter = PRODUCT_LETTER
        .as_ref()
        .and_then(|re| re.captures(&lower))
        .and_then(|caps| caps.get(1))
        .map(|m| format!("Product {}", m.as_str().to_uppercase()));

    by_letter.or_else(|| first_match(&lower, PRODUCT_RULES).map(str::to_string))
}

/// The quarter code check runs on the prompt as typed, the rest on the lowered one.
pub fn extract_data_source(prompt: &str, product: Option<&str>) -> Option<DataSource> {
    let lower = prompt.to_lowercase();

    let mentions_quarter_code = QUARTER_CODE
        .as_ref()
        .map(|re| re.is_match(prompt))
        .unwrap_or(false);

    if lower.contains("quarter") || mentions_quarter_code {
        Some(DataSource::Quarterly)
    } else if lower.contains("region") {
        Some(DataSource::Regional)
    } else if lower.contains("categor") {
        Some(DataSource::Category)
    } else if lower.contains("all product") || lower.contains("compare") {
        Some(DataSource::All)
    } else if product.is_some() {
        Some(DataSource::Product)
    } else {
        None
    }
}

pub fn extract_region(prompt: &str) -> Option<String> {
    first_match(&prompt.to_lowercase(), REGION_RULES).map(str::to_string)
}

pub fn extract_category(prompt: &str) -> Option<String> {
    first_match(&prompt.to_lowercase(), CATEGORY_RULES).map(str::to_string)
}
