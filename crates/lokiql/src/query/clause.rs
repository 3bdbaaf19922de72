use crate::{
    error::EncodeError,
    query::{ColumnName, TableName},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Operator
///
/// Abstract comparison operators understood by every backend.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    WeakGt,
    Lt,
    Lte,
    OneOf,
    NotIn,
    Between,
    Like,
    NotLike,
}

impl Operator {
    pub const ALL: [Self; 12] = [
        Self::Eq,
        Self::NotEq,
        Self::Gt,
        Self::Gte,
        Self::WeakGt,
        Self::Lt,
        Self::Lte,
        Self::OneOf,
        Self::NotIn,
        Self::Between,
        Self::Like,
        Self::NotLike,
    ];

    /// Wire name used by the query builder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::NotEq => "notEq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::WeakGt => "weakGt",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::OneOf => "oneOf",
            Self::NotIn => "notIn",
            Self::Between => "between",
            Self::Like => "like",
            Self::NotLike => "notLike",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ComparisonRight
///
/// Right-hand operand of a comparison. Exactly one shape is present;
/// `ColumnRef` compares two columns of the same row and is only ever
/// evaluated by the row matcher, never by the encoder.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ComparisonRight {
    #[serde(rename = "value")]
    Value(Value),

    #[serde(rename = "values")]
    Values(Vec<Value>),

    #[serde(rename = "column")]
    ColumnRef(ColumnName),
}

///
/// Comparison
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Comparison {
    pub operator: Operator,
    pub right: ComparisonRight,
}

impl Comparison {
    #[must_use]
    pub const fn new(operator: Operator, right: ComparisonRight) -> Self {
        Self { operator, right }
    }

    #[must_use]
    pub fn value(operator: Operator, value: impl Into<Value>) -> Self {
        Self::new(operator, ComparisonRight::Value(value.into()))
    }

    #[must_use]
    pub fn values<V: Into<Value>>(operator: Operator, values: impl IntoIterator<Item = V>) -> Self {
        Self::new(
            operator,
            ComparisonRight::Values(values.into_iter().map(Into::into).collect()),
        )
    }

    #[must_use]
    pub fn column(operator: Operator, column: impl Into<ColumnName>) -> Self {
        Self::new(operator, ComparisonRight::ColumnRef(column.into()))
    }
}

///
/// Clause
///
/// One node of the condition tree. The tree is closed: decoding rejects
/// any clause kind not listed here, so the encoder matches exhaustively.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", try_from = "RawClause")]
pub enum Clause {
    Where {
        #[serde(rename = "left")]
        column: ColumnName,
        comparison: Comparison,
    },
    And {
        conditions: Vec<Self>,
    },
    Or {
        conditions: Vec<Self>,
    },
    On {
        table: TableName,
        conditions: Vec<Self>,
    },

    /// Engine-native expression passed through untouched.
    #[serde(rename = "loki")]
    RawPassthrough { expr: serde_json::Value },
}

impl Clause {
    #[must_use]
    pub fn where_(column: impl Into<ColumnName>, comparison: Comparison) -> Self {
        Self::Where {
            column: column.into(),
            comparison,
        }
    }

    #[must_use]
    pub fn eq(column: impl Into<ColumnName>, value: impl Into<Value>) -> Self {
        Self::where_(column, Comparison::value(Operator::Eq, value))
    }

    #[must_use]
    pub const fn and(conditions: Vec<Self>) -> Self {
        Self::And { conditions }
    }

    #[must_use]
    pub const fn or(conditions: Vec<Self>) -> Self {
        Self::Or { conditions }
    }

    #[must_use]
    pub fn on(table: impl Into<TableName>, conditions: Vec<Self>) -> Self {
        Self::On {
            table: table.into(),
            conditions,
        }
    }

    #[must_use]
    pub const fn raw(expr: serde_json::Value) -> Self {
        Self::RawPassthrough { expr }
    }

    /// Wire tag of this clause kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Where { .. } => "where",
            Self::And { .. } => "and",
            Self::Or { .. } => "or",
            Self::On { .. } => "on",
            Self::RawPassthrough { .. } => "loki",
        }
    }
}

///
/// RawClause
///
/// Loose decoding shape; validated into a `Clause` so that an unknown
/// `type` tag reports `UnknownClauseKind` rather than a generic serde error.
///

#[derive(Deserialize)]
struct RawClause {
    #[serde(rename = "type")]
    kind: String,
    left: Option<ColumnName>,
    comparison: Option<Comparison>,
    table: Option<TableName>,
    conditions: Option<Vec<Clause>>,
    expr: Option<serde_json::Value>,
}

fn required<T>(field: Option<T>, kind: &str, name: &str) -> Result<T, EncodeError> {
    field.ok_or_else(|| EncodeError::InvalidClause {
        kind: kind.to_string(),
        reason: format!("missing field `{name}`"),
    })
}

impl TryFrom<RawClause> for Clause {
    type Error = EncodeError;

    fn try_from(raw: RawClause) -> Result<Self, Self::Error> {
        let RawClause {
            kind,
            left,
            comparison,
            table,
            conditions,
            expr,
        } = raw;

        match kind.as_str() {
            "where" => Ok(Self::Where {
                column: required(left, &kind, "left")?,
                comparison: required(comparison, &kind, "comparison")?,
            }),
            "and" => Ok(Self::And {
                conditions: required(conditions, &kind, "conditions")?,
            }),
            "or" => Ok(Self::Or {
                conditions: required(conditions, &kind, "conditions")?,
            }),
            "on" => Ok(Self::On {
                table: required(table, &kind, "table")?,
                conditions: required(conditions, &kind, "conditions")?,
            }),
            "loki" => Ok(Self::RawPassthrough {
                expr: required(expr, &kind, "expr")?,
            }),
            _ => Err(EncodeError::UnknownClauseKind { kind }),
        }
    }
}

///
/// TESTS
///
