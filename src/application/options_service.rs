// Options service - Use case for listing selectable chart options
use crate::application::chart_repository::ChartRepository;
use crate::domain::catalog::Column;
use crate::domain::options::{ChartOptions, ColumnOption};
use std::sync::Arc;

#[derive(Clone)]
pub struct OptionsService {
    repository: Arc<dyn ChartRepository>,
}

impl OptionsService {
    pub fn new(repository: Arc<dyn ChartRepository>) -> Self {
        Self { repository }
    }

    /// Catalog enumerations, with distinct values for categorical columns.
    /// A column whose values cannot be read is listed without them.
    pub async fn chart_options(&self) -> ChartOptions {
        let mut columns = Vec::with_capacity(Column::ALL.len());

        for column in Column::ALL {
            let values = if column.is_categorical() {
                match self.repository.distinct_values(column).await {
                    Ok(values) => Some(values),
                    Err(e) => {
                        tracing::warn!("Error fetching values for column {}: {}", column, e);
                        None
                    }
                }
            } else {
                None
            };
            columns.push(ColumnOption::from_column(column, values));
        }

        ChartOptions::new(columns)
    }
}
