use crate::query::{ColumnName, TableName};
use std::fmt;

///
/// EncodeTraceSink
///

pub trait EncodeTraceSink: Send + Sync {
    fn on_event(&self, event: EncodeTraceEvent<'_>);
}

///
/// NoopTraceSink
/// Sink used when the caller installs none.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTraceSink;

impl EncodeTraceSink for NoopTraceSink {
    fn on_event(&self, _event: EncodeTraceEvent<'_>) {}
}

///
/// EncodeTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeTraceEvent<'a> {
    Start {
        table: &'a TableName,
        root_conditions: usize,
    },

    /// A column-to-column comparison was encoded as always-true and left
    /// for the row matcher.
    Deferred {
        column: &'a ColumnName,
        compared_to: &'a ColumnName,
    },

    JoinResolved {
        table: &'a TableName,
        map_key: &'a ColumnName,
        join_key: &'a ColumnName,
    },

    Finish {
        table: &'a TableName,
        has_predicate: bool,
        has_joins: bool,
    },
}

impl fmt::Display for EncodeTraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start {
                table,
                root_conditions,
            } => write!(f, "start table={table} conditions={root_conditions}"),
            Self::Deferred {
                column,
                compared_to,
            } => write!(f, "deferred column={column} compared_to={compared_to}"),
            Self::JoinResolved {
                table,
                map_key,
                join_key,
            } => write!(f, "join table={table} map_key={map_key} join_key={join_key}"),
            Self::Finish {
                table,
                has_predicate,
                has_joins,
            } => write!(
                f,
                "finish table={table} predicate={has_predicate} joins={has_joins}"
            ),
        }
    }
}
