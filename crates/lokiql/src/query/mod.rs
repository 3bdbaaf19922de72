//! Query description model: the storage-agnostic input consumed by the encoder.
//!
//! Everything in this module is produced upstream by the query builder.
//! Column and table identifiers are assumed to be validated already.

mod association;
mod clause;
mod description;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

///
/// Re-Exports
///
pub use association::{AssociationInfo, QueryAssociation};
pub use clause::{Clause, Comparison, ComparisonRight, Operator};
pub use description::{QueryDescription, SerializedQuery, SortBy, SortOrder};

///
/// TableName
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

///
/// ColumnName
///

#[derive(
    Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct ColumnName(String);

impl ColumnName {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
