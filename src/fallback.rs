//! Deterministic widget builder over the embedded sample data.
//!
//! Used whenever the completion service is unavailable or returns something
//! unusable. Given the same prompt and intent it always produces the same widget.

use crate::prompt_parser::Intent;
use crate::sample_data::{self, SampleDataPoint, DEFAULT_PRODUCT};
use crate::widget::{Cell, ChartWidget, DataField, DataSource, TableWidget, Widget, WidgetKind};
use itertools::Itertools;

/// Build a chart or table, depending on `intent.widget_type`.
pub fn build_widget(prompt: &str, intent: &Intent) -> Widget {
    match intent.widget_type {
        WidgetKind::Chart => Widget::Chart(build_chart(prompt, intent)),
        WidgetKind::Table => Widget::Table(build_table(prompt, intent)),
    }
}

fn wants_product_comparison(intent: &Intent) -> bool {
    intent.data_source == Some(DataSource::All)
        || (intent.product.is_none() && intent.data_source.is_none())
}

/// Keeps the last `months` rows of a monthly series; other datasets pass through.
fn tail_months(rows: &[SampleDataPoint], months: Option<u32>) -> &[SampleDataPoint] {
    match months {
        Some(n) if rows.first().map(|r| r.month.is_some()).unwrap_or(false) => {
            let keep = (n as usize).min(rows.len());
            &rows[rows.len() - keep..]
        }
        _ => rows,
    }
}

fn product_rows(intent: &Intent) -> &'static [SampleDataPoint] {
    sample_data::product_data(intent.product.as_deref().unwrap_or(DEFAULT_PRODUCT))
}

/// Product names in the combined dataset, in first-seen order.
fn product_names() -> impl Iterator<Item = &'static str> {
    sample_data::all_products()
        .iter()
        .filter_map(|row| row.product)
        .unique()
}

fn product_total(product: &str, field: DataField) -> f64 {
    sample_data::all_products()
        .iter()
        .filter(|row| row.product == Some(product))
        .map(|row| row.metric_or_zero(field))
        .sum()
}

pub fn build_chart(_prompt: &str, intent: &Intent) -> ChartWidget {
    let field = intent.data_field;

    if wants_product_comparison(intent) {
        let (labels, values): (Vec<String>, Vec<f64>) = product_names()
            .map(|product| (product.to_string(), product_total(product, field)))
            .unzip();

        return ChartWidget {
            chart_type: intent.chart_type,
            labels,
            values,
            title: format!("{} by Product", field.label()),
            x_axis_label: "Product".to_string(),
            y_axis_label: field.label().to_string(),
            id: None,
            section_id: None,
        };
    }

    let (rows, x_axis) = match intent.data_source {
        Some(DataSource::Quarterly) => (sample_data::QUARTERLY, "Quarter"),
        Some(DataSource::Regional) => (sample_data::REGIONAL, "Region"),
        Some(DataSource::Category) => (sample_data::CATEGORY, "Category"),
        _ => (tail_months(product_rows(intent), intent.filter_months), "Month"),
    };

    let labels = rows
        .iter()
        .map(|row| match intent.data_source {
            Some(DataSource::Quarterly) => row.quarter,
            Some(DataSource::Regional) => row.region,
            Some(DataSource::Category) => row.category,
            _ => row.month,
        })
        .map(|label| label.unwrap_or("").to_string())
        .collect();
    let values = rows.iter().map(|row| row.metric_or_zero(field)).collect();

    ChartWidget {
        chart_type: intent.chart_type,
        labels,
        values,
        title: chart_title(intent),
        x_axis_label: x_axis.to_string(),
        y_axis_label: field.label().to_string(),
        id: None,
        section_id: None,
    }
}

fn chart_title(intent: &Intent) -> String {
    let metric = intent.data_field.label();

    match intent.data_source {
        Some(DataSource::Quarterly) => return format!("{metric} by Quarter"),
        Some(DataSource::Regional) => return format!("{metric} by Region"),
        Some(DataSource::Category) => return format!("{metric} by Category"),
        _ => {}
    }

    let mut title = metric.to_string();
    if let Some(product) = &intent.product {
        title.push_str(&format!(" - {product}"));
    }
    if let Some(months) = intent.filter_months {
        title.push_str(&format!(" (Last {months} months)"));
    }
    title
}

const QUARTERLY_HEADERS: &[&str] = &[
    "Quarter",
    "Sales",
    "Revenue",
    "Expenses",
    "Profit",
    "Units",
    "Customers",
];
const REGIONAL_HEADERS: &[&str] = &["Region", "Sales", "Revenue", "Profit", "Units", "Customers"];
const CATEGORY_HEADERS: &[&str] = &[
    "Category",
    "Sales",
    "Revenue",
    "Profit",
    "Units",
    "Customers",
];
const PRODUCT_OVERVIEW_HEADERS: &[&str] = &[
    "Product",
    "Sales",
    "Revenue",
    "Profit",
    "Units",
    "Customers",
];
const MONTHLY_HEADERS: &[&str] = &[
    "Month",
    "Sales",
    "Revenue",
    "Expenses",
    "Profit",
    "Units",
    "Customers",
];

/// Metric columns named by `headers`, in fixed column order.
fn metric_columns(headers: &[&str]) -> Vec<DataField> {
    DataField::ALL
        .into_iter()
        .filter(|field| headers.contains(&field.label()))
        .collect()
}

fn to_headers(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

pub fn build_table(_prompt: &str, intent: &Intent) -> TableWidget {
    let (rows, headers, title) = match intent.data_source {
        Some(DataSource::Quarterly) => (
            sample_data::QUARTERLY,
            QUARTERLY_HEADERS,
            "Quarterly Performance".to_string(),
        ),
        Some(DataSource::Regional) => (
            sample_data::REGIONAL,
            REGIONAL_HEADERS,
            "Regional Performance".to_string(),
        ),
        Some(DataSource::Category) => (
            sample_data::CATEGORY,
            CATEGORY_HEADERS,
            "Category Performance".to_string(),
        ),
        _ => match intent.product.as_deref() {
            Some(product) if intent.data_source != Some(DataSource::All) => (
                tail_months(sample_data::product_data(product), intent.filter_months),
                MONTHLY_HEADERS,
                format!("{product} Monthly Performance"),
            ),
            _ => return product_overview_table(),
        },
    };

    let columns = metric_columns(headers);
    let rows = rows
        .iter()
        .map(|row| {
            std::iter::once(Cell::from(row.identifier()))
                .chain(columns.iter().map(|field| Cell::from(row.metric_or_zero(*field))))
                .collect::<Vec<Cell>>()
        })
        .collect();

    TableWidget {
        title,
        headers: to_headers(headers),
        rows,
        id: None,
        section_id: None,
    }
}

fn product_overview_table() -> TableWidget {
    let columns = metric_columns(PRODUCT_OVERVIEW_HEADERS);

    let rows = product_names()
        .map(|product| {
            std::iter::once(Cell::from(product))
                .chain(
                    columns
                        .iter()
                        .map(|field| Cell::from(product_total(product, *field))),
                )
                .collect::<Vec<Cell>>()
        })
        .collect();

    TableWidget {
        title: "Product Performance Overview".to_string(),
        headers: to_headers(PRODUCT_OVERVIEW_HEADERS),
        rows,
        id: None,
        section_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt_parser::parse_prompt;
    use crate::widget::ChartType;

    fn build(prompt: &str) -> Widget {
        build_widget(prompt, &parse_prompt(prompt))
    }

    #[test]
    fn test_default_product_chart() {
        let intent = Intent {
            product: Some("Product A".to_string()),
            data_source: Some(DataSource::Product),
            ..Intent::default()
        };
        let chart = build_chart("", &intent);
        assert_eq!(chart.labels.len(), 12);
        assert_eq!(chart.values.len(), 12);
        assert_eq!(chart.values[0], 2000.0);
        assert_eq!(chart.x_axis_label, "Month");
        assert_eq!(chart.title, "Sales - Product A");
    }

    #[test]
    fn test_product_comparison_sums_sales() {
        let widget = build("compare sales across products");
        let chart = widget.as_chart().unwrap();
        assert_eq!(
            chart.labels,
            vec!["Product A", "Product B", "Product C", "Product D", "Product E"]
        );
        assert_eq!(chart.values, vec![33100.0, 11600.0, 24100.0, 45100.0, 27000.0]);
        assert_eq!(chart.values.iter().sum::<f64>(), 140900.0);
        assert_eq!(chart.title, "Sales by Product");
        assert_eq!(chart.x_axis_label, "Product");
    }

    #[test]
    fn test_no_product_no_source_aggregates() {
        let chart = build("profit please");
        let chart = chart.as_chart().unwrap();
        assert_eq!(chart.labels.len(), 5);
        assert_eq!(chart.title, "Profit by Product");
    }

    #[test]
    fn test_month_tail_slice() {
        let chart = build("sales for product a last 3 months");
        let chart = chart.as_chart().unwrap();
        assert_eq!(chart.labels, vec!["Oct", "Nov", "Dec"]);
        assert_eq!(chart.values, vec![3100.0, 3400.0, 3600.0]);
        assert_eq!(chart.title, "Sales - Product A (Last 3 months)");

        let chart = build("sales for product a over 20 months");
        assert_eq!(chart.as_chart().unwrap().labels.len(), 12);
    }

    #[test]
    fn test_oversized_month_count_keeps_title() {
        let chart = build("sales for product b over the last 99999999999 months");
        let chart = chart.as_chart().unwrap();
        assert_eq!(chart.labels.len(), 6);
        assert_eq!(chart.title, format!("Sales - Product B (Last {} months)", u32::MAX));
    }

    #[test]
    fn test_filter_ignored_for_aggregates() {
        let chart = build("quarterly revenue last 2 months as a pie");
        let chart = chart.as_chart().unwrap();
        assert_eq!(chart.chart_type, ChartType::Pie);
        assert_eq!(chart.labels, vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(chart.values, vec![15800.0, 19500.0, 20800.0, 23900.0]);
        assert_eq!(chart.title, "Revenue by Quarter");
    }

    #[test]
    fn test_regional_and_category_charts() {
        let chart = build("profit by region");
        let chart = chart.as_chart().unwrap();
        assert_eq!(chart.x_axis_label, "Region");
        assert_eq!(chart.values[3], 64350.0);

        let chart = build("units by category");
        let chart = chart.as_chart().unwrap();
        assert_eq!(chart.labels[2], "Home & Garden");
        assert_eq!(chart.title, "Units by Category");
    }

    #[test]
    fn test_unknown_product_uses_product_a() {
        let intent = Intent {
            product: Some("Product Z".to_string()),
            data_source: Some(DataSource::Product),
            ..Intent::default()
        };
        assert_eq!(build_chart("", &intent).values[0], 2000.0);
    }

    #[test]
    fn test_deterministic() {
        let prompt = "show a table of product c data for the last 4 months";
        assert_eq!(build(prompt), build(prompt));
        assert_eq!(build("compare revenue"), build("compare revenue"));
    }

    #[test]
    fn test_quarterly_table() {
        let table = build("quarterly table");
        let table = table.as_table().unwrap();
        assert_eq!(table.title, "Quarterly Performance");
        assert_eq!(table.headers.len(), 7);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0][0], Cell::from("Q1"));
        assert_eq!(table.rows[0][3], Cell::from(9000.0));
        assert!(Widget::Table(table.clone()).is_well_formed());
    }

    #[test]
    fn test_regional_table_skips_expenses() {
        let table = build("regional table");
        let table = table.as_table().unwrap();
        assert_eq!(
            table.headers,
            vec!["Region", "Sales", "Revenue", "Profit", "Units", "Customers"]
        );
        assert_eq!(
            table.rows[0],
            vec![
                Cell::from("North"),
                Cell::from(31200.0),
                Cell::from(74800.0),
                Cell::from(33200.0),
                Cell::from(1560.0),
                Cell::from(1283.0),
            ]
        );
    }

    #[test]
    fn test_product_overview_table() {
        let table = build("data table");
        let table = table.as_table().unwrap();
        assert_eq!(table.title, "Product Performance Overview");
        assert_eq!(table.rows.len(), 5);
        assert_eq!(
            table.rows[1],
            vec![
                Cell::from("Product B"),
                Cell::from(11600.0),
                Cell::from(34800.0),
                Cell::from(16900.0),
                Cell::from(580.0),
                Cell::from(464.0),
            ]
        );
        assert!(table.rows.iter().all(|row| row.len() == table.headers.len()));
    }

    #[test]
    fn test_product_monthly_table() {
        let table = build("product e spreadsheet last 2 months");
        let table = table.as_table().unwrap();
        assert_eq!(table.title, "Product E Monthly Performance");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], Cell::from("Nov"));
        assert_eq!(table.rows[1][1], Cell::from(2800.0));
        assert_eq!(table.rows[1].len(), 7);
    }
}
