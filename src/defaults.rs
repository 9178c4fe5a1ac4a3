//! The widgets a fresh dashboard starts with.

use crate::sample_data::{self, SampleDataPoint, PRODUCT_NAMES};
use crate::widget::{Cell, ChartType, ChartWidget, DataField, TableWidget, Widget};

fn chart(
    id: &str,
    chart_type: ChartType,
    rows: &[SampleDataPoint],
    value: impl Fn(&SampleDataPoint) -> f64,
    title: &str,
    axes: (&str, &str),
) -> Widget {
    Widget::Chart(ChartWidget {
        chart_type,
        labels: rows.iter().map(|row| row.identifier().to_string()).collect(),
        values: rows.iter().map(value).collect(),
        title: title.to_string(),
        x_axis_label: axes.0.to_string(),
        y_axis_label: axes.1.to_string(),
        id: Some(id.to_string()),
        section_id: None,
    })
}

fn table(id: &str, title: &str, headers: &[&str], rows: Vec<Vec<Cell>>) -> Widget {
    Widget::Table(TableWidget {
        title: title.to_string(),
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
        id: Some(id.to_string()),
        section_id: None,
    })
}

fn metric_row(row: &SampleDataPoint, fields: &[DataField]) -> Vec<Cell> {
    std::iter::once(Cell::from(row.identifier()))
        .chain(fields.iter().map(|f| Cell::from(row.metric_or_zero(*f))))
        .collect()
}

fn last_six(rows: &[SampleDataPoint]) -> &[SampleDataPoint] {
    &rows[rows.len().saturating_sub(6)..]
}

/// Category aggregate for each product, paired through the product's own category.
fn product_categories() -> Vec<(&'static str, &'static SampleDataPoint)> {
    PRODUCT_NAMES
        .iter()
        .filter_map(|product| {
            let category = sample_data::product_data(product).first()?.category?;
            let row = sample_data::CATEGORY
                .iter()
                .find(|row| row.category == Some(category))?;
            Some((*product, row))
        })
        .collect()
}

/// Eight charts followed by three tables, with stable `default-*` ids.
pub fn default_widgets() -> Vec<Widget> {
    use DataField::*;

    let monthly = sample_data::PRODUCT_A;
    let by_product = product_categories();

    let revenue_by_product = Widget::Chart(ChartWidget {
        chart_type: ChartType::Donut,
        labels: by_product.iter().map(|(p, _)| p.to_string()).collect(),
        values: by_product.iter().map(|(_, row)| row.metric_or_zero(Revenue)).collect(),
        title: "Revenue Distribution by Product".to_string(),
        x_axis_label: "Product".to_string(),
        y_axis_label: "Revenue ($)".to_string(),
        id: Some("default-6".to_string()),
        section_id: None,
    });

    let product_rows = by_product
        .iter()
        .map(|(product, row)| {
            vec![
                Cell::from(*product),
                Cell::from(row.identifier()),
                Cell::from(row.sales),
                Cell::from(row.metric_or_zero(Revenue)),
                Cell::from(row.metric_or_zero(Profit)),
            ]
        })
        .collect();

    vec![
        chart(
            "default-1",
            ChartType::Line,
            monthly,
            |r| r.sales,
            "Monthly Sales Trend",
            ("Month", "Sales ($)"),
        ),
        chart(
            "default-2",
            ChartType::Bar,
            sample_data::QUARTERLY,
            |r| r.metric_or_zero(Revenue),
            "Quarterly Revenue",
            ("Quarter", "Revenue ($)"),
        ),
        chart(
            "default-3",
            ChartType::Pie,
            sample_data::REGIONAL,
            |r| r.sales,
            "Sales by Region",
            ("Region", "Sales ($)"),
        ),
        chart(
            "default-4",
            ChartType::Bar,
            sample_data::CATEGORY,
            |r| r.metric_or_zero(Profit),
            "Profit by Category",
            ("Category", "Profit ($)"),
        ),
        chart(
            "default-5",
            ChartType::Area,
            last_six(monthly),
            |r| r.metric_or_zero(Revenue) - r.metric_or_zero(Expenses),
            "Net Profit (Last 6 Months)",
            ("Month", "Net Profit ($)"),
        ),
        revenue_by_product,
        chart(
            "default-7",
            ChartType::Line,
            monthly,
            |r| r.metric_or_zero(Units),
            "Units Sold by Month",
            ("Month", "Units"),
        ),
        chart(
            "default-8",
            ChartType::Area,
            last_six(monthly),
            |r| r.metric_or_zero(Customers),
            "Customer Growth (Last 6 Months)",
            ("Month", "Customers"),
        ),
        table(
            "default-table-1",
            "Regional Performance Summary",
            &["Region", "Sales ($)", "Revenue ($)", "Profit ($)", "Units", "Customers"],
            sample_data::REGIONAL
                .iter()
                .map(|row| metric_row(row, &[Sales, Revenue, Profit, Units, Customers]))
                .collect(),
        ),
        table(
            "default-table-2",
            "Product Performance Overview",
            &["Product", "Category", "Total Sales ($)", "Total Revenue ($)", "Total Profit ($)"],
            product_rows,
        ),
        table(
            "default-table-3",
            "Quarterly Performance Comparison",
            &[
                "Quarter",
                "Sales ($)",
                "Revenue ($)",
                "Expenses ($)",
                "Profit ($)",
                "Units",
                "Customers",
            ],
            sample_data::QUARTERLY
                .iter()
                .map(|row| metric_row(row, &DataField::ALL))
                .collect(),
        ),
    ]
}
