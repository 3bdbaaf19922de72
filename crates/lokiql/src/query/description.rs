use crate::query::{Clause, ColumnName, QueryAssociation, TableName};
use serde::{Deserialize, Serialize};

///
/// SortOrder
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

///
/// SortBy
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub sort_column: ColumnName,
    pub sort_order: SortOrder,
}

///
/// QueryDescription
///
/// Root of a described query. `sort_by`, `take` and `skip` are carried so
/// the encoder can reject them explicitly instead of dropping them.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescription {
    #[serde(rename = "where", default)]
    pub conditions: Vec<Clause>,

    #[serde(default)]
    pub join_tables: Vec<TableName>,

    #[serde(default)]
    pub sort_by: Vec<SortBy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

impl QueryDescription {
    #[must_use]
    pub fn new(conditions: Vec<Clause>) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_join_tables(mut self, tables: impl IntoIterator<Item = TableName>) -> Self {
        self.join_tables.extend(tables);
        self
    }
}

///
/// SerializedQuery
///
/// Everything the encoder needs for one query: the queried table, its
/// description, and the association metadata resolved upstream.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SerializedQuery {
    pub table: TableName,
    pub description: QueryDescription,

    #[serde(default)]
    pub associations: Vec<QueryAssociation>,
}

impl SerializedQuery {
    #[must_use]
    pub fn new(table: impl Into<TableName>, description: QueryDescription) -> Self {
        Self {
            table: table.into(),
            description,
            associations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_associations(
        mut self,
        associations: impl IntoIterator<Item = QueryAssociation>,
    ) -> Self {
        self.associations.extend(associations);
        self
    }
}

///
/// TESTS
///
