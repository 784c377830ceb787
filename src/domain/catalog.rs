// Column catalog - the allow-list of identifiers that may reach SQL text
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Temporal,
}

/// Comparison operators accepted on scalar filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    GreaterThan,
    LessThan,
    Equals,
    NotEquals,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::Equals,
        Operator::NotEquals,
    ];

    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            ">" => Some(Operator::GreaterThan),
            "<" => Some(Operator::LessThan),
            "=" | "==" => Some(Operator::Equals),
            "!=" | "<>" => Some(Operator::NotEquals),
            _ => None,
        }
    }

    /// Symbol as exposed to the page
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
        }
    }

    /// Symbol as written into SQL text
    pub fn sql(&self) -> &'static str {
        match self {
            Operator::NotEquals => "<>",
            other => other.symbol(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Operator::GreaterThan => "Greater than",
            Operator::LessThan => "Less than",
            Operator::Equals => "Equals",
            Operator::NotEquals => "Not equals",
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::LessThan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Revenue,
    Users,
    Growth,
    Industry,
    Company,
    County,
    Region,
    Year,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Revenue,
        Column::Users,
        Column::Growth,
        Column::Industry,
        Column::Company,
        Column::County,
        Column::Region,
        Column::Year,
    ];

    /// Look up an identifier in the allow-list. Matching is exact so that
    /// nothing but the canonical spelling is ever written into a statement.
    pub fn parse(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.identifier() == identifier)
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            Column::Revenue => "revenue",
            Column::Users => "users",
            Column::Growth => "growth",
            Column::Industry => "industry",
            Column::Company => "company",
            Column::County => "county",
            Column::Region => "region",
            Column::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Revenue => "Revenue",
            Column::Users => "Active Users",
            Column::Growth => "Growth Rate",
            Column::Industry => "Industry",
            Column::Company => "Company",
            Column::County => "County",
            Column::Region => "Region",
            Column::Year => "Year",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Revenue | Column::Users | Column::Growth => ColumnKind::Numeric,
            Column::Industry | Column::Company | Column::County | Column::Region => {
                ColumnKind::Categorical
            }
            Column::Year => ColumnKind::Temporal,
        }
    }

    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Column::Revenue => Some("$"),
            _ => None,
        }
    }

    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            Column::Growth => Some("%"),
            _ => None,
        }
    }

    pub fn operators(&self) -> Vec<Operator> {
        match self.kind() {
            ColumnKind::Numeric | ColumnKind::Temporal => Operator::ALL.to_vec(),
            ColumnKind::Categorical => vec![Operator::Equals, Operator::NotEquals],
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    pub fn is_categorical(&self) -> bool {
        self.kind() == ColumnKind::Categorical
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
