// Chart request and payload domain models
use super::catalog::Column;
use super::filter::{CompileError, Filter};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const REQUEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationFn {
    #[default]
    Sum,
    Avg,
    Max,
    Min,
    Count,
}

impl AggregationFn {
    pub const ALL: [AggregationFn; 5] = [
        AggregationFn::Sum,
        AggregationFn::Avg,
        AggregationFn::Max,
        AggregationFn::Min,
        AggregationFn::Count,
    ];

    /// Case-insensitive; the page historically sent lowercase names
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "SUM" => Some(AggregationFn::Sum),
            "AVG" | "AVERAGE" => Some(AggregationFn::Avg),
            "MAX" => Some(AggregationFn::Max),
            "MIN" => Some(AggregationFn::Min),
            "COUNT" => Some(AggregationFn::Count),
            _ => None,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            AggregationFn::Sum => "SUM",
            AggregationFn::Avg => "AVG",
            AggregationFn::Max => "MAX",
            AggregationFn::Min => "MIN",
            AggregationFn::Count => "COUNT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AggregationFn::Sum => "Sum",
            AggregationFn::Avg => "Average",
            AggregationFn::Max => "Maximum",
            AggregationFn::Min => "Minimum",
            AggregationFn::Count => "Count",
        }
    }
}

impl fmt::Display for AggregationFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// Row shape a chart type expects from its template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShape {
    TimeSeries,
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartType {
    pub const ALL: [ChartType; 3] = [ChartType::Line, ChartType::Bar, ChartType::Pie];

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "line" => Some(ChartType::Line),
            "bar" => Some(ChartType::Bar),
            "pie" => Some(ChartType::Pie),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line Chart",
            ChartType::Bar => "Bar Chart",
            ChartType::Pie => "Pie Chart",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ChartType::Line => "📈",
            ChartType::Bar => "📊",
            ChartType::Pie => "🥧",
        }
    }

    pub fn shape(&self) -> ChartShape {
        match self {
            ChartType::Line | ChartType::Bar => ChartShape::TimeSeries,
            ChartType::Pie => ChartShape::Categorical,
        }
    }
}

/// Reporting period the page offers. Templates aggregate per year, so the
/// range is carried through to logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Monthly, TimeRange::Quarterly, TimeRange::Yearly];

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(TimeRange::Monthly),
            "quarterly" => Some(TimeRange::Quarterly),
            "yearly" => Some(TimeRange::Yearly),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TimeRange::Monthly => "monthly",
            TimeRange::Quarterly => "quarterly",
            TimeRange::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Monthly => "Monthly",
            TimeRange::Quarterly => "Quarterly",
            TimeRange::Yearly => "Yearly",
        }
    }
}

fn default_version() -> u32 {
    REQUEST_VERSION
}

fn default_aggregate_field() -> String {
    Column::Revenue.identifier().to_string()
}

fn default_aggregation_fn() -> String {
    AggregationFn::default().sql().to_string()
}

fn default_group_by_field() -> String {
    Column::Industry.identifier().to_string()
}

fn default_chart_type() -> String {
    ChartType::default().key().to_string()
}

fn default_time_range() -> String {
    TimeRange::default().key().to_string()
}

/// Wire schema of a chart request. Every field is optional on the wire and
/// falls back to the documented default.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(
        default = "default_aggregate_field",
        alias = "valueColumn",
        alias = "displayField"
    )]
    pub aggregate_field: String,
    #[serde(default = "default_aggregation_fn", alias = "aggregationMethod")]
    pub aggregation_fn: String,
    #[serde(default = "default_group_by_field")]
    pub group_by_field: String,
    #[serde(default = "default_chart_type")]
    pub chart_type: String,
    #[serde(default = "default_time_range")]
    pub time_range: String,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            version: default_version(),
            filters: Vec::new(),
            aggregate_field: default_aggregate_field(),
            aggregation_fn: default_aggregation_fn(),
            group_by_field: default_group_by_field(),
            chart_type: default_chart_type(),
            time_range: default_time_range(),
        }
    }
}

impl ChartRequest {
    /// Check every identifier against the catalog and resolve enums.
    /// Filters are validated later by the filter compiler.
    pub fn validate(self) -> Result<ChartConfig, CompileError> {
        if self.version != REQUEST_VERSION {
            return Err(CompileError::UnsupportedVersion(self.version));
        }

        let aggregate_field = Column::parse(&self.aggregate_field)
            .ok_or_else(|| CompileError::UnknownColumn(self.aggregate_field.clone()))?;
        if !aggregate_field.is_numeric() {
            return Err(CompileError::ColumnNotAllowed {
                column: self.aggregate_field,
                role: "an aggregate field",
            });
        }

        let group_by_field = Column::parse(&self.group_by_field)
            .ok_or_else(|| CompileError::UnknownColumn(self.group_by_field.clone()))?;
        if !group_by_field.is_categorical() {
            return Err(CompileError::ColumnNotAllowed {
                column: self.group_by_field,
                role: "a group-by field",
            });
        }

        let aggregation_fn = AggregationFn::parse(&self.aggregation_fn)
            .ok_or_else(|| CompileError::UnknownAggregation(self.aggregation_fn.clone()))?;

        let chart_type = match ChartType::parse(&self.chart_type) {
            Some(chart_type) => chart_type,
            None => {
                tracing::warn!(
                    "Unrecognized chart type '{}', falling back to {}",
                    self.chart_type,
                    ChartType::default().key()
                );
                ChartType::default()
            }
        };

        let time_range = TimeRange::parse(&self.time_range).unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized time range '{}', falling back to {}",
                self.time_range,
                TimeRange::default().key()
            );
            TimeRange::default()
        });

        Ok(ChartConfig {
            filters: self.filters,
            aggregate_field,
            aggregation_fn,
            group_by_field,
            chart_type,
            time_range,
        })
    }
}

/// Validated chart configuration, built fresh per request
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub filters: Vec<Filter>,
    pub aggregate_field: Column,
    pub aggregation_fn: AggregationFn,
    pub group_by_field: Column,
    pub chart_type: ChartType,
    pub time_range: TimeRange,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            aggregate_field: Column::Revenue,
            aggregation_fn: AggregationFn::Sum,
            group_by_field: Column::Industry,
            chart_type: ChartType::Line,
            time_range: TimeRange::Monthly,
        }
    }
}

/// One row returned by a chart template
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub group_by_label: String,
    pub group_label: Option<String>,
    pub year: Option<String>,
    pub value: f64,
}

impl ChartRow {
    pub fn new(group_by_label: impl Into<String>, year: Option<&str>, value: f64) -> Self {
        Self {
            group_by_label: group_by_label.into(),
            group_label: None,
            year: year.map(str::to_string),
            value,
        }
    }

    /// `group_by_label`, suffixed with `(group_label)` when present
    pub fn series_label(&self) -> String {
        match self.group_label.as_deref() {
            Some(group) if !group.is_empty() => format!("{} ({})", self.group_by_label, group),
            _ => self.group_by_label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Colors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl Dataset {
    pub fn new(label: String, data: Vec<f64>) -> Self {
        Self {
            label,
            data,
            border_color: None,
            background_color: None,
            tension: None,
        }
    }
}

/// Generic chart payload. Every dataset is index-aligned with `labels`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}
