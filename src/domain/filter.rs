// Filter domain model and validation errors
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A user-chosen restriction on one column.
///
/// A filter either lists the accepted `values` (compiled to an IN clause) or
/// carries a scalar comparison through `operator` and `value`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub column: String,
    #[serde(default, deserialize_with = "scalar_list")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
}

#[cfg(test)]
impl Filter {
    pub fn values(column: &str, values: &[&str]) -> Self {
        Self {
            column: column.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn comparison(column: &str, operator: &str, value: &str) -> Self {
        Self {
            column: column.to_string(),
            operator: Some(operator.to_string()),
            value: Some(value.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{column}' cannot be used as {role}")]
    ColumnNotAllowed { column: String, role: &'static str },

    #[error("unsupported operator '{operator}' for column '{column}'")]
    UnsupportedOperator { column: String, operator: String },

    #[error("value '{value}' for column '{column}' is not a number")]
    NotNumeric { column: String, value: String },

    #[error("unsupported aggregation function '{0}'")]
    UnknownAggregation(String),

    #[error("unsupported request version {0}")]
    UnsupportedVersion(u32),
}

/// Filter values arrive from the page as strings, but numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
        }
    }
}

fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Scalar>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}
