//! Widget model shared by the parser, the fallback builder and the completion adapter.
//!
//! Serialized as camelCase JSON with a `widgetType` discriminant so the dashboard
//! frontend can render either variant without guessing.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
    Donut,
}

impl ChartType {
    pub const ALL: [ChartType; 5] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Area,
        ChartType::Donut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
            ChartType::Donut => "donut",
        }
    }

    /// Case-insensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric metric a widget plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataField {
    #[default]
    Sales,
    Revenue,
    Expenses,
    Profit,
    Units,
    Customers,
}

impl DataField {
    /// Fixed column order used by tables.
    pub const ALL: [DataField; 6] = [
        DataField::Sales,
        DataField::Revenue,
        DataField::Expenses,
        DataField::Profit,
        DataField::Units,
        DataField::Customers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataField::Sales => "sales",
            DataField::Revenue => "revenue",
            DataField::Expenses => "expenses",
            DataField::Profit => "profit",
            DataField::Units => "units",
            DataField::Customers => "customers",
        }
    }

    /// Capitalized name, used for titles, axis labels and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            DataField::Sales => "Sales",
            DataField::Revenue => "Revenue",
            DataField::Expenses => "Expenses",
            DataField::Profit => "Profit",
            DataField::Units => "Units",
            DataField::Customers => "Customers",
        }
    }
}

impl fmt::Display for DataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Quarterly,
    Regional,
    Category,
    All,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    #[default]
    Chart,
    Table,
}

/// A table cell: either a label or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", format_number(*n)),
        }
    }
}

/// Renders whole numbers without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartWidget {
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub title: String,
    #[serde(default)]
    pub x_axis_label: String,
    #[serde(default)]
    pub y_axis_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableWidget {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widgetType", rename_all = "lowercase")]
pub enum Widget {
    Chart(ChartWidget),
    Table(TableWidget),
}

impl Widget {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Chart(_) => WidgetKind::Chart,
            Widget::Table(_) => WidgetKind::Table,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Widget::Chart(c) => &c.title,
            Widget::Table(t) => &t.title,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        match self {
            Widget::Chart(c) => c.title = title.into(),
            Widget::Table(t) => t.title = title.into(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Widget::Chart(c) => c.id.as_deref(),
            Widget::Table(t) => t.id.as_deref(),
        }
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Widget::Chart(c) => c.section_id.as_deref(),
            Widget::Table(t) => t.section_id.as_deref(),
        }
    }

    /// Stamps caller-owned identity onto the widget.
    pub fn assign(&mut self, id: impl Into<String>, section_id: Option<String>) {
        let id = Some(id.into());
        match self {
            Widget::Chart(c) => {
                c.id = id;
                c.section_id = section_id;
            }
            Widget::Table(t) => {
                t.id = id;
                t.section_id = section_id;
            }
        }
    }

    pub fn as_chart(&self) -> Option<&ChartWidget> {
        match self {
            Widget::Chart(c) => Some(c),
            Widget::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableWidget> {
        match self {
            Widget::Table(t) => Some(t),
            Widget::Chart(_) => None,
        }
    }

    /// Charts pair every label with a value; table rows match the header width.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Widget::Chart(c) => c.labels.len() == c.values.len(),
            Widget::Table(t) => t.rows.iter().all(|row| row.len() == t.headers.len()),
        }
    }
}

impl From<ChartWidget> for Widget {
    fn from(chart: ChartWidget) -> Self {
        Widget::Chart(chart)
    }
}

impl From<TableWidget> for Widget {
    fn from(table: TableWidget) -> Self {
        Widget::Table(table)
    }
}
