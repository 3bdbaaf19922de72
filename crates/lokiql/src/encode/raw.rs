use crate::{
    config::EncoderConfig,
    encode::LikePattern,
    query::{Clause, ColumnName, TableName},
    value::Value,
};
use serde::{Serialize, Serializer, ser::SerializeMap};

///
/// FieldOp
///
/// Field-level operator object of the LokiJS dialect, e.g. `{"$gt": 5}`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldOp {
    /// Type-coercing equality.
    Aeq(Value),
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Between(Value, Value),
    Regex(LikePattern),
    Exists(bool),
    Not(Box<Self>),
    And(Vec<Self>),
}

impl FieldOp {
    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(op: Self) -> Self {
        Self::Not(Box::new(op))
    }

    /// Operator keyword as it appears in the engine's query object.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Aeq(_) => "$aeq",
            Self::Eq(_) => "$eq",
            Self::Ne(_) => "$ne",
            Self::Gt(_) => "$gt",
            Self::Gte(_) => "$gte",
            Self::Lt(_) => "$lt",
            Self::Lte(_) => "$lte",
            Self::In(_) => "$in",
            Self::Nin(_) => "$nin",
            Self::Between(..) => "$between",
            Self::Regex(_) => "$regex",
            Self::Exists(_) => "$exists",
            Self::Not(_) => "$not",
            Self::And(_) => "$and",
        }
    }
}

impl Serialize for FieldOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let key = self.keyword();

        match self {
            Self::Aeq(value)
            | Self::Eq(value)
            | Self::Ne(value)
            | Self::Gt(value)
            | Self::Gte(value)
            | Self::Lt(value)
            | Self::Lte(value) => map.serialize_entry(key, value)?,
            Self::In(values) | Self::Nin(values) => map.serialize_entry(key, values)?,
            Self::Between(low, high) => map.serialize_entry(key, &[low, high])?,
            Self::Regex(pattern) => map.serialize_entry(key, pattern)?,
            Self::Exists(exists) => map.serialize_entry(key, exists)?,
            Self::Not(inner) => map.serialize_entry(key, inner)?,
            Self::And(ops) => map.serialize_entry(key, ops)?,
        }

        map.end()
    }
}

///
/// RawQuery
///
/// Compiled predicate tree. Serializes to exactly the JSON object handed
/// to the engine's `find` call.
///

#[derive(Clone, Debug, PartialEq)]
pub enum RawQuery {
    Field { column: ColumnName, op: FieldOp },
    And(Vec<Self>),
    Or(Vec<Self>),
    Join(Box<CompiledJoin>),

    /// Matches every record; probes a column no record carries.
    AlwaysTrue { column: ColumnName },

    /// Engine-native passthrough.
    Raw(serde_json::Value),
}

impl RawQuery {
    #[must_use]
    pub fn field(column: impl Into<ColumnName>, op: FieldOp) -> Self {
        Self::Field {
            column: column.into(),
            op,
        }
    }

    #[must_use]
    pub fn always_true(config: &EncoderConfig) -> Self {
        Self::AlwaysTrue {
            column: config.always_true_column.clone(),
        }
    }

    #[must_use]
    pub const fn is_always_true(&self) -> bool {
        matches!(self, Self::AlwaysTrue { .. })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for RawQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field { column, op } => single_entry(serializer, column.as_str(), op),
            Self::And(children) => single_entry(serializer, "$and", children),
            Self::Or(children) => single_entry(serializer, "$or", children),
            Self::Join(join) => single_entry(serializer, "$join", join),
            Self::AlwaysTrue { column } => {
                single_entry(serializer, column.as_str(), &FieldOp::Exists(false))
            }
            Self::Raw(expr) => expr.serialize(serializer),
        }
    }
}

// Serialize a one-key object `{ key: value }`.
fn single_entry<S: Serializer, V: Serialize + ?Sized>(
    serializer: S,
    key: &str,
    value: &V,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

///
/// CompiledJoin
///
/// Join descriptor consumed by the execution layer. `original_conditions`
/// is handed verbatim to the row matcher, which evaluates the column
/// comparisons encoded here as always-true.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledJoin {
    pub table: TableName,

    #[serde(rename = "query", skip_serializing_if = "Option::is_none")]
    pub predicate: Option<RawQuery>,

    pub original_conditions: Vec<Clause>,
    pub map_key: ColumnName,
    pub join_key: ColumnName,
}

///
/// CompiledQuery
///
/// `predicate: None` means "no filter" and is distinct from an empty
/// object: the engine's unconditional count only works without a filter.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    pub table: TableName,

    #[serde(rename = "query", skip_serializing_if = "Option::is_none")]
    pub predicate: Option<RawQuery>,

    pub has_joins: bool,
}

impl CompiledQuery {
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

///
/// TESTS
///
