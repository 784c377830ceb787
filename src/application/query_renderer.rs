// Query renderer - template substitution, execution and pivoting for charts
use crate::application::chart_repository::{ChartRepository, Statement};
use crate::application::filter_compiler::{compile_filters, CompiledFilters};
use crate::application::pivot::{apply_palette, pivot_categorical, pivot_time_series};
use crate::application::template_store::{TemplateKey, TemplateStore};
use crate::domain::chart::{ChartConfig, ChartData, ChartShape};
use crate::domain::filter::CompileError;
use crate::infrastructure::config::substitute_placeholders;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub const TABLE: &str = "TABLE";
pub const FILTERS: &str = "FILTERS";
pub const AGGREGATE_FIELD: &str = "AGGREGATE_FIELD";
pub const AGGREGATION_FN: &str = "AGGREGATION_FN";
pub const GROUP_BY_FIELD: &str = "GROUP_BY_FIELD";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart request: {0}")]
    Compile(#[from] CompileError),

    #[error("no template registered for '{0}'")]
    Template(&'static str),

    #[error("chart query failed: {0}")]
    Query(anyhow::Error),
}

/// Fill a template. Identifiers come from the column catalog and the table
/// name from operator config; filter values stay out of the SQL text.
pub fn render_statement(
    template: &str,
    config: &ChartConfig,
    filters: &CompiledFilters,
    table: &str,
) -> Statement {
    let (predicate, params) = filters.parameterized();

    let mut vars = HashMap::new();
    vars.insert(TABLE, table.to_string());
    vars.insert(FILTERS, predicate);
    vars.insert(AGGREGATE_FIELD, config.aggregate_field.identifier().to_string());
    vars.insert(AGGREGATION_FN, config.aggregation_fn.sql().to_string());
    vars.insert(GROUP_BY_FIELD, config.group_by_field.identifier().to_string());

    Statement {
        sql: substitute_placeholders(template, &vars),
        params,
        shape: config.chart_type.shape(),
        group_by: config.group_by_field,
    }
}

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn ChartRepository>,
    templates: Arc<dyn TemplateStore>,
    table: String,
}

impl ChartService {
    pub fn new(
        repository: Arc<dyn ChartRepository>,
        templates: Arc<dyn TemplateStore>,
        table: String,
    ) -> Self {
        Self {
            repository,
            templates,
            table,
        }
    }

    /// Compile, render, execute exactly one query and pivot its rows
    pub async fn chart_data(&self, config: &ChartConfig) -> Result<ChartData, ChartError> {
        let filters = compile_filters(&config.filters)?;

        tracing::info!(
            chart_type = config.chart_type.key(),
            aggregate_field = %config.aggregate_field,
            aggregation_fn = %config.aggregation_fn,
            group_by_field = %config.group_by_field,
            time_range = config.time_range.key(),
            filters = %filters.display(),
            "Rendering chart"
        );

        let key = TemplateKey::for_chart(config.chart_type);
        let template = self
            .templates
            .template(key)
            .ok_or(ChartError::Template(key.name()))?;

        let statement = render_statement(template, config, &filters, &self.table);
        tracing::debug!(
            template = key.name(),
            predicate = %filters.literal(),
            "Executing chart query: {}",
            statement.sql
        );

        let rows = self
            .repository
            .query_rows(&statement)
            .await
            .map_err(ChartError::Query)?;

        let shape = statement.shape;
        let data = match shape {
            ChartShape::TimeSeries => pivot_time_series(&rows),
            ChartShape::Categorical => {
                let label = format!("{}({})", config.aggregation_fn, config.aggregate_field);
                pivot_categorical(&rows, &label)
            }
        };

        tracing::debug!(
            "Chart built from {} rows: {} labels, {} datasets",
            rows.len(),
            data.labels.len(),
            data.datasets.len()
        );

        Ok(apply_palette(data, shape))
    }
}
