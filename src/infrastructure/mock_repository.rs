// Mock repository - fabricated company figures for running without a database
use crate::application::chart_repository::{ChartRepository, Statement};
use crate::domain::catalog::Column;
use crate::domain::chart::{ChartRow, ChartShape};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const INDUSTRIES: [&str; 3] = ["Biotech", "Cleantech", "Healthcare"];
const COMPANIES: [&str; 3] = ["Acme", "Globex", "Initech"];
const COUNTIES: [&str; 3] = ["Alameda", "King", "Travis"];
const REGIONS: [&str; 4] = ["Midwest", "Northeast", "South", "West"];
const YEARS: [&str; 5] = ["2001", "2002", "2003", "2004", "2005"];
const BASE_VALUE: u64 = 500_000;
const VALUE_SPREAD: u64 = 1_000_000;

/// Values are derived from a hash of the series and year, so repeated
/// requests return the same chart.
#[derive(Debug, Clone, Default)]
pub struct MockRepository;

impl MockRepository {
    pub fn new() -> Self {
        Self
    }

    fn value_for(series: &str, year: &str) -> f64 {
        let mut hasher = DefaultHasher::new();
        series.hash(&mut hasher);
        year.hash(&mut hasher);
        (BASE_VALUE + hasher.finish() % VALUE_SPREAD) as f64
    }

    fn values_of(column: Column) -> &'static [&'static str] {
        match column {
            Column::Industry => &INDUSTRIES,
            Column::Company => &COMPANIES,
            Column::County => &COUNTIES,
            Column::Region => &REGIONS,
            Column::Year => &YEARS,
            _ => &[],
        }
    }
}

#[async_trait]
impl ChartRepository for MockRepository {
    async fn query_rows(&self, statement: &Statement) -> Result<Vec<ChartRow>> {
        tracing::debug!(
            "Mock store ignoring statement with {} bound values",
            statement.params.len()
        );

        // One series per value of the grouping column
        let series = Self::values_of(statement.group_by);
        let rows: Vec<ChartRow> = match statement.shape {
            ChartShape::TimeSeries => series
                .iter()
                .flat_map(|label| {
                    YEARS.iter().map(move |year| {
                        ChartRow::new(*label, Some(*year), Self::value_for(label, year))
                    })
                })
                .collect(),
            ChartShape::Categorical => series
                .iter()
                .map(|label| ChartRow::new(*label, None, Self::value_for(label, "")))
                .collect(),
        };

        Ok(rows)
    }

    async fn distinct_values(&self, column: Column) -> Result<Vec<String>> {
        Ok(Self::values_of(column)
            .iter()
            .map(|v| v.to_string())
            .collect())
    }
}
