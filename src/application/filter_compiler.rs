// Filter compiler - turns user filters into predicate and display fragments
use crate::application::chart_repository::SqlParam;
use crate::domain::catalog::{Column, ColumnKind, Operator};
use crate::domain::filter::{CompileError, Filter};

const PREDICATE_MARKER: &str = "WHERE";

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    In(Vec<String>),
    Compare(Operator, String),
}

#[derive(Debug, Clone, PartialEq)]
struct Clause {
    column: Column,
    condition: Condition,
}

impl Clause {
    /// Column reference as written into SQL. Year values in IN lists are
    /// compared as text so `2021` and `'2021'` select the same rows.
    fn column_sql(&self) -> String {
        match (&self.condition, self.column.kind()) {
            (Condition::In(_), ColumnKind::Temporal) => format!("{}::text", self.column.identifier()),
            _ => self.column.identifier().to_string(),
        }
    }

    /// Numeric columns bind every value as float8; comparisons on the year
    /// column and ordering operators do too.
    fn binds_number(&self) -> bool {
        match &self.condition {
            Condition::In(_) => self.column.is_numeric(),
            Condition::Compare(op, _) => op.is_ordering() || !self.column.is_categorical(),
        }
    }

    fn parameterized(&self, params: &mut Vec<SqlParam>) -> String {
        match &self.condition {
            Condition::In(values) => {
                let numeric = self.binds_number();
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| {
                        if numeric {
                            params.push(SqlParam::Number(parse_number(v).unwrap_or_default()));
                            format!("${}::float8", params.len())
                        } else {
                            params.push(SqlParam::Text(v.clone()));
                            format!("${}", params.len())
                        }
                    })
                    .collect();
                format!("{} IN ({})", self.column_sql(), placeholders.join(", "))
            }
            Condition::Compare(op, value) => {
                if self.binds_number() {
                    // Checked numeric during compilation
                    let number = parse_number(value).unwrap_or_default();
                    params.push(SqlParam::Number(number));
                    format!("{} {} ${}::float8", self.column_sql(), op.sql(), params.len())
                } else {
                    params.push(SqlParam::Text(value.clone()));
                    format!("{} {} ${}", self.column_sql(), op.sql(), params.len())
                }
            }
        }
    }

    fn literal(&self) -> String {
        match &self.condition {
            Condition::In(values) => {
                let numeric = self.binds_number();
                let quoted: Vec<String> = values
                    .iter()
                    .map(|v| {
                        if numeric {
                            v.trim().to_string()
                        } else {
                            quote_literal(v)
                        }
                    })
                    .collect();
                format!("{} IN ({})", self.column_sql(), quoted.join(", "))
            }
            Condition::Compare(op, value) => {
                let rendered = if self.binds_number() {
                    value.trim().to_string()
                } else {
                    quote_literal(value)
                };
                format!("{} {} {}", self.column_sql(), op.sql(), rendered)
            }
        }
    }

    fn display(&self) -> String {
        match &self.condition {
            Condition::In(values) => format!("{}: {}", self.column, values.join(", ")),
            Condition::Compare(op, value) => format!("{} {} {}", self.column, op.symbol(), value),
        }
    }
}

/// Finite numbers only; `NaN` and `inf` parse as f64 but are not values
fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn not_numeric(column: Column, value: &str) -> CompileError {
    CompileError::NotNumeric {
        column: column.identifier().to_string(),
        value: value.to_string(),
    }
}

/// Single-quote a value, doubling embedded quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Output of the filter compiler.
///
/// Execution always goes through [`CompiledFilters::parameterized`]; the
/// literal rendering exists for operator logs only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilters {
    clauses: Vec<Clause>,
}

impl CompiledFilters {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `WHERE a IN ($1, $2) AND b > $3::float8`, or empty when no clauses
    pub fn parameterized(&self) -> (String, Vec<SqlParam>) {
        let mut params = Vec::new();
        if self.is_empty() {
            return (String::new(), params);
        }
        let parts: Vec<String> = self
            .clauses
            .iter()
            .map(|c| c.parameterized(&mut params))
            .collect();
        (format!("{} {}", PREDICATE_MARKER, parts.join(" AND ")), params)
    }

    /// Same predicate with values inlined as quoted literals
    pub fn literal(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self.clauses.iter().map(Clause::literal).collect();
        format!("{} {}", PREDICATE_MARKER, parts.join(" AND "))
    }

    /// Human-readable summary for logs
    pub fn display(&self) -> String {
        if self.is_empty() {
            return "no filters".to_string();
        }
        self.clauses
            .iter()
            .map(Clause::display)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Compile filters into clauses joined with AND.
///
/// Filters without values (and without a complete operator/value pair) are
/// skipped. Value-list filters on the same column are merged into one clause;
/// every comparison is its own clause, so `revenue > 1` and `revenue < 9`
/// form a range. Identical comparisons collapse to one clause.
pub fn compile_filters(filters: &[Filter]) -> Result<CompiledFilters, CompileError> {
    let mut clauses: Vec<Clause> = Vec::new();

    for filter in filters {
        let column = Column::parse(&filter.column)
            .ok_or_else(|| CompileError::UnknownColumn(filter.column.clone()))?;

        let values: Vec<&String> = filter.values.iter().filter(|v| !v.is_empty()).collect();
        if !values.is_empty() {
            if column.is_numeric() {
                if let Some(bad) = values.iter().find(|v| parse_number(v).is_none()) {
                    return Err(not_numeric(column, bad));
                }
            }
            let existing = clauses.iter_mut().find(|c| {
                c.column == column && matches!(c.condition, Condition::In(_))
            });
            match existing {
                Some(Clause {
                    condition: Condition::In(merged),
                    ..
                }) => {
                    for value in values {
                        if !merged.contains(value) {
                            merged.push(value.clone());
                        }
                    }
                }
                _ => {
                    let mut unique: Vec<String> = Vec::with_capacity(values.len());
                    for value in values {
                        if !unique.contains(value) {
                            unique.push(value.clone());
                        }
                    }
                    clauses.push(Clause {
                        column,
                        condition: Condition::In(unique),
                    });
                }
            }
            continue;
        }

        let (Some(symbol), Some(value)) = (filter.operator.as_deref(), filter.value.as_deref())
        else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }

        let operator = Operator::parse(symbol)
            .filter(|op| column.operators().contains(op))
            .ok_or_else(|| CompileError::UnsupportedOperator {
                column: column.identifier().to_string(),
                operator: symbol.to_string(),
            })?;

        let clause = Clause {
            column,
            condition: Condition::Compare(operator, value.to_string()),
        };
        if clause.binds_number() && parse_number(value).is_none() {
            return Err(not_numeric(column, value));
        }
        if !clauses.contains(&clause) {
            clauses.push(clause);
        }
    }

    Ok(CompiledFilters { clauses })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_compile_to_empty_fragment() {
        let compiled = compile_filters(&[]).unwrap();
        assert!(compiled.is_empty());
        assert_eq!(compiled.parameterized(), (String::new(), Vec::new()));
        assert_eq!(compiled.literal(), "");
    }

    #[test]
    fn test_one_clause_per_filter_with_single_marker() {
        let compiled = compile_filters(&[
            Filter::values("industry", &["Biotech", "Cleantech"]),
            Filter::values("region", &["West"]),
            Filter::comparison("revenue", ">", "500000"),
        ])
        .unwrap();

        let (sql, params) = compiled.parameterized();
        assert_eq!(
            sql,
            "WHERE industry IN ($1, $2) AND region IN ($3) AND revenue > $4::float8"
        );
        assert_eq!(sql.matches("WHERE").count(), 1);
        assert_eq!(sql.matches(" AND ").count(), 2);
        assert_eq!(
            params,
            vec![
                SqlParam::Text("Biotech".to_string()),
                SqlParam::Text("Cleantech".to_string()),
                SqlParam::Text("West".to_string()),
                SqlParam::Number(500000.0),
            ]
        );
    }

    #[test]
    fn test_quotes_are_doubled_in_literal_fragment() {
        let compiled = compile_filters(&[Filter::values("company", &["O'Brien"])]).unwrap();
        assert_eq!(compiled.literal(), "WHERE company IN ('O''Brien')");

        // The executed form never carries the value in its text
        let (sql, params) = compiled.parameterized();
        assert!(!sql.contains("Brien"));
        assert_eq!(params, vec![SqlParam::Text("O'Brien".to_string())]);
    }

    #[test]
    fn test_filters_on_same_column_merge() {
        let compiled = compile_filters(&[
            Filter::values("industry", &["Biotech"]),
            Filter::values("industry", &["Cleantech", "Biotech"]),
        ])
        .unwrap();
        assert_eq!(compiled.literal(), "WHERE industry IN ('Biotech', 'Cleantech')");
    }

    #[test]
    fn test_filters_without_values_are_skipped() {
        let compiled = compile_filters(&[
            Filter::values("industry", &[]),
            Filter::comparison("revenue", ">", " "),
        ])
        .unwrap();
        assert!(compiled.is_empty());
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = compile_filters(&[Filter::values("1=1; --", &["x"])]).unwrap_err();
        assert_eq!(err, CompileError::UnknownColumn("1=1; --".to_string()));
    }

    #[test]
    fn test_ordering_operator_requires_numeric_value() {
        let err = compile_filters(&[Filter::comparison("revenue", ">", "lots")]).unwrap_err();
        assert!(matches!(err, CompileError::NotNumeric { .. }));

        let err = compile_filters(&[Filter::comparison("industry", ">", "B")]).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_year_values_compare_as_text() {
        let compiled = compile_filters(&[
            Filter::values("year", &["2021"]),
            Filter::comparison("year", "!=", "2003"),
        ])
        .unwrap();
        assert_eq!(
            compiled.parameterized().0,
            "WHERE year::text IN ($1) AND year <> $2::float8"
        );
    }

    #[test]
    fn test_numeric_value_lists_bind_as_numbers() {
        let compiled = compile_filters(&[Filter::values("revenue", &["10", " 2.5"])]).unwrap();
        let (sql, params) = compiled.parameterized();
        assert_eq!(sql, "WHERE revenue IN ($1::float8, $2::float8)");
        assert_eq!(params, vec![SqlParam::Number(10.0), SqlParam::Number(2.5)]);
        assert_eq!(compiled.literal(), "WHERE revenue IN (10, 2.5)");

        let err = compile_filters(&[Filter::values("users", &["10", "many"])]).unwrap_err();
        assert_eq!(
            err,
            CompileError::NotNumeric {
                column: "users".to_string(),
                value: "many".to_string(),
            }
        );
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        for value in ["NaN", "inf", "-infinity"] {
            let err = compile_filters(&[Filter::comparison("revenue", ">", value)]).unwrap_err();
            assert!(matches!(err, CompileError::NotNumeric { .. }), "{value}");

            let err = compile_filters(&[Filter::values("growth", &[value])]).unwrap_err();
            assert!(matches!(err, CompileError::NotNumeric { .. }), "{value}");
        }
    }

    #[test]
    fn test_year_accepts_ordering_operators() {
        let compiled = compile_filters(&[Filter::comparison("year", ">", "2003")]).unwrap();
        let (sql, params) = compiled.parameterized();
        assert_eq!(sql, "WHERE year > $1::float8");
        assert_eq!(params, vec![SqlParam::Number(2003.0)]);

        let err = compile_filters(&[Filter::comparison("year", "<", "recent")]).unwrap_err();
        assert!(matches!(err, CompileError::NotNumeric { .. }));
    }

    #[test]
    fn test_comparisons_on_one_column_stay_separate_clauses() {
        let compiled = compile_filters(&[
            Filter::values("revenue", &["100"]),
            Filter::comparison("revenue", ">", "50"),
            Filter::comparison("revenue", "<", "500"),
            Filter::comparison("revenue", "<", "500"),
        ])
        .unwrap();
        assert_eq!(
            compiled.parameterized().0,
            "WHERE revenue IN ($1::float8) AND revenue > $2::float8 AND revenue < $3::float8"
        );
    }

    #[test]
    fn test_display_fragment() {
        let compiled = compile_filters(&[
            Filter::values("industry", &["Biotech", "Cleantech"]),
            Filter::comparison("industry", "!=", "Healthcare"),
        ])
        .unwrap();
        assert_eq!(
            compiled.display(),
            "industry: Biotech, Cleantech; industry != Healthcare"
        );
        assert_eq!(
            compiled.literal(),
            "WHERE industry IN ('Biotech', 'Cleantech') AND industry <> 'Healthcare'"
        );
    }
}
