// Chart options model - what the page may offer the user
use super::catalog::{Column, ColumnKind, Operator};
use super::chart::{AggregationFn, ChartType, TimeRange};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTypeOption {
    pub value: String,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOption {
    pub value: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub operators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl ColumnOption {
    pub fn from_column(column: Column, values: Option<Vec<String>>) -> Self {
        let aggregation_methods = column.is_numeric().then(|| {
            AggregationFn::ALL
                .iter()
                .map(|f| f.sql().to_string())
                .collect()
        });

        Self {
            value: column.identifier().to_string(),
            label: column.label().to_string(),
            kind: column.kind(),
            prefix: column.prefix().map(str::to_string),
            suffix: column.suffix().map(str::to_string),
            operators: column
                .operators()
                .iter()
                .map(|o| o.symbol().to_string())
                .collect(),
            aggregation_methods,
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub columns: Vec<ColumnOption>,
    /// Columns a chart may be grouped by
    pub aggregation_columns: Vec<OptionItem>,
    pub chart_types: Vec<ChartTypeOption>,
    pub operators: Vec<OptionItem>,
    pub aggregation_methods: Vec<OptionItem>,
    /// First entry is the page's initial selection
    pub time_ranges: Vec<OptionItem>,
}

impl ChartOptions {
    pub fn new(columns: Vec<ColumnOption>) -> Self {
        Self {
            columns,
            aggregation_columns: Column::ALL
                .iter()
                .filter(|c| c.is_categorical())
                .map(|c| OptionItem::new(c.identifier(), c.label()))
                .collect(),
            chart_types: ChartType::ALL
                .iter()
                .map(|t| ChartTypeOption {
                    value: t.key().to_string(),
                    label: t.label().to_string(),
                    icon: t.icon().to_string(),
                })
                .collect(),
            operators: Operator::ALL
                .iter()
                .map(|o| OptionItem::new(o.symbol(), o.label()))
                .collect(),
            aggregation_methods: AggregationFn::ALL
                .iter()
                .map(|f| OptionItem::new(f.sql(), f.label()))
                .collect(),
            time_ranges: TimeRange::ALL
                .iter()
                .map(|r| OptionItem::new(r.key(), r.label()))
                .collect(),
        }
    }
}
