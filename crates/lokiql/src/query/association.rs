use crate::query::{ColumnName, TableName};
use serde::{Deserialize, Serialize};

///
/// AssociationInfo
///
/// How the queried table relates to a joined table. Each relation kind
/// carries only the column its key mapping reads:
///
/// - `BelongsTo`: `key` is the column on the queried table that holds the
///   joined record's identity.
/// - `HasMany`: `foreign_key` is the column on the joined table that points
///   back at the queried record.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssociationInfo {
    BelongsTo {
        key: ColumnName,
    },
    HasMany {
        #[serde(rename = "foreignKey")]
        foreign_key: ColumnName,
    },
}

impl AssociationInfo {
    #[must_use]
    pub fn belongs_to(key: impl Into<ColumnName>) -> Self {
        Self::BelongsTo { key: key.into() }
    }

    #[must_use]
    pub fn has_many(foreign_key: impl Into<ColumnName>) -> Self {
        Self::HasMany {
            foreign_key: foreign_key.into(),
        }
    }
}

///
/// QueryAssociation
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryAssociation {
    pub to: TableName,
    pub info: AssociationInfo,
}

impl QueryAssociation {
    #[must_use]
    pub fn new(to: impl Into<TableName>, info: AssociationInfo) -> Self {
        Self {
            to: to.into(),
            info,
        }
    }
}

///
/// TESTS
///
