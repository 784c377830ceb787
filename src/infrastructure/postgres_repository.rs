// Postgres repository implementation
use crate::application::chart_repository::{ChartRepository, SqlParam, Statement};
use crate::domain::catalog::Column;
use crate::domain::chart::ChartRow;
use crate::infrastructure::config::StoreSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column as _, Postgres, Row};
use std::time::Duration;

const GROUP_BY_LABEL: &str = "group_by_label";
const GROUP_LABEL: &str = "group_label";
const YEAR: &str = "year";
const AGGREGATE_LABEL: &str = "aggregate_label";

/// Connections are checked out of the pool per call, so a dropped
/// connection is replaced on the next request.
pub struct PostgresRepository {
    pool: PgPool,
    table: String,
}

impl PostgresRepository {
    /// Build the pool without connecting; the first query opens a connection
    pub fn new(settings: &StoreSettings) -> Result<Self> {
        let url = settings
            .url
            .as_deref()
            .context("store.url is required for the postgres store")?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect_lazy(url)
            .context("Invalid Postgres connection string")?;

        tracing::info!(
            "Postgres pool ready (max {} connections)",
            settings.max_connections
        );

        Ok(Self {
            pool,
            table: settings.table.clone(),
        })
    }

    fn bind_params<'q>(
        mut query: Query<'q, Postgres, PgArguments>,
        params: &[SqlParam],
    ) -> Query<'q, Postgres, PgArguments> {
        for param in params {
            query = match param {
                SqlParam::Text(v) => query.bind(v.clone()),
                SqlParam::Number(v) => query.bind(*v),
            };
        }
        query
    }

    fn has_column(row: &PgRow, name: &str) -> bool {
        row.columns().iter().any(|c| c.name() == name)
    }

    /// Year cells may be text, integers or dates depending on the template
    fn year_cell(row: &PgRow) -> Result<Option<String>> {
        if !Self::has_column(row, YEAR) {
            return Ok(None);
        }
        if let Ok(v) = row.try_get::<Option<String>, _>(YEAR) {
            return Ok(v);
        }
        if let Ok(v) = row.try_get::<Option<i32>, _>(YEAR) {
            return Ok(v.map(|y| y.to_string()));
        }
        if let Ok(v) = row.try_get::<Option<i64>, _>(YEAR) {
            return Ok(v.map(|y| y.to_string()));
        }
        let date = row
            .try_get::<Option<NaiveDate>, _>(YEAR)
            .context("Unsupported type for year column")?;
        Ok(date.map(|d| d.year().to_string()))
    }

    /// NULL aggregates (e.g. SUM over no rows) count as 0
    fn value_cell(row: &PgRow) -> Result<f64> {
        if let Ok(v) = row.try_get::<Option<f64>, _>(AGGREGATE_LABEL) {
            return Ok(v.unwrap_or(0.0));
        }
        if let Ok(v) = row.try_get::<Option<i64>, _>(AGGREGATE_LABEL) {
            return Ok(v.unwrap_or(0) as f64);
        }
        let v = row
            .try_get::<Option<i32>, _>(AGGREGATE_LABEL)
            .context("Unsupported type for aggregate column")?;
        Ok(v.unwrap_or(0) as f64)
    }

    fn to_chart_row(row: &PgRow) -> Result<ChartRow> {
        let group_by_label: Option<String> = row
            .try_get(GROUP_BY_LABEL)
            .context("Missing group_by_label column")?;
        let group_label: Option<String> = if Self::has_column(row, GROUP_LABEL) {
            row.try_get(GROUP_LABEL)?
        } else {
            None
        };

        Ok(ChartRow {
            group_by_label: group_by_label.unwrap_or_default(),
            group_label,
            year: Self::year_cell(row)?,
            value: Self::value_cell(row)?,
        })
    }
}

#[async_trait]
impl ChartRepository for PostgresRepository {
    async fn query_rows(&self, statement: &Statement) -> Result<Vec<ChartRow>> {
        let query = Self::bind_params(sqlx::query(statement.sql.as_str()), &statement.params);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .context("Chart query failed")?;

        tracing::debug!("Chart query returned {} rows", rows.len());
        rows.iter().map(Self::to_chart_row).collect()
    }

    async fn distinct_values(&self, column: Column) -> Result<Vec<String>> {
        let query = format!(
            "SELECT DISTINCT {column}::text AS value FROM {table} WHERE {column} IS NOT NULL ORDER BY 1",
            column = column.identifier(),
            table = self.table
        );

        let rows = sqlx::query(query.as_str())
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to list values of {}", column))?;

        rows.iter()
            .map(|row| row.try_get::<String, _>(0).map_err(Into::into))
            .collect()
    }
}
