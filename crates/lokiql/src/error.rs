use crate::query::{ColumnName, Operator, TableName};
use std::fmt;
use thiserror::Error as ThisError;

///
/// EncodeError
///
/// Compile-time failure of a query encode. Encoding is all-or-nothing:
/// no partial query is ever returned alongside one of these.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum EncodeError {
    #[error("table '{table}' has {count} declared associations; a join needs exactly one")]
    AmbiguousAssociation { table: TableName, count: usize },

    #[error("invalid '{kind}' clause: {reason}")]
    InvalidClause { kind: String, reason: String },

    #[error("operator '{operator}' expects {expected}")]
    InvalidOperand {
        operator: Operator,
        expected: OperandShape,
    },

    #[error(
        "no association declared for joined table '{table}'; to nest Q.on inside Q.and/Q.or you must explicitly declare Q.experimentalJoinTables at the beginning of the query"
    )]
    MissingAssociation { table: TableName },

    #[error("column comparison against '{column}' is not encodable; defer it to the row matcher")]
    UnimplementedColumnComparison { column: ColumnName },

    #[error("unknown clause kind '{kind}'")]
    UnknownClauseKind { kind: String },

    #[error("{feature} is not supported by the loki backend")]
    UnsupportedFeature { feature: QueryFeature },
}

impl EncodeError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedFeature { .. } => ErrorClass::Unsupported,
            Self::MissingAssociation { .. } => ErrorClass::NotFound,
            Self::AmbiguousAssociation { .. }
            | Self::InvalidClause { .. }
            | Self::InvalidOperand { .. } => ErrorClass::Invalid,
            Self::UnimplementedColumnComparison { .. } | Self::UnknownClauseKind { .. } => {
                ErrorClass::InvariantViolation
            }
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }

    pub(crate) const fn invalid_operand(operator: Operator, expected: OperandShape) -> Self {
        Self::InvalidOperand { operator, expected }
    }
}

///
/// QueryFeature
///
/// Query description features the loki backend refuses to encode.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryFeature {
    SortBy,
    Take,
    Skip,
}

impl fmt::Display for QueryFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SortBy => "Q.sortBy()",
            Self::Take => "Q.take()",
            Self::Skip => "Q.skip()",
        };
        write!(f, "{label}")
    }
}

///
/// OperandShape
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperandShape {
    Scalar,
    List,
    Pair,
}

impl fmt::Display for OperandShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scalar => "a single value",
            Self::List => "a list of values",
            Self::Pair => "a list of exactly two values",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorClass
/// Error taxonomy for caller-side classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Invalid,
    InvariantViolation,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Invalid => "invalid",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
