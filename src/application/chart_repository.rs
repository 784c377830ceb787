// Repository trait for chart data access
use crate::domain::catalog::Column;
use crate::domain::chart::{ChartRow, ChartShape};
use async_trait::async_trait;

/// A value bound through the driver's parameter mechanism
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Number(f64),
}

/// A rendered statement: trusted SQL text plus the caller-supplied values
/// referenced from it as `$1`, `$2`, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
    /// Row shape the template produces
    pub shape: ChartShape,
    /// Column behind `group_by_label`
    pub group_by: Column,
}

#[async_trait]
pub trait ChartRepository: Send + Sync {
    /// Execute one chart statement and return its rows
    async fn query_rows(&self, statement: &Statement) -> anyhow::Result<Vec<ChartRow>>;

    /// Distinct values of a column, sorted, for the options listing
    async fn distinct_values(&self, column: Column) -> anyhow::Result<Vec<String>>;
}
