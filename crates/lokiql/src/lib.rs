//! Query compiler for the LokiJS document engine: lowers storage-agnostic
//! query descriptions (clause trees, comparisons, joins) into the engine's
//! operator-object query dialect.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod encode;
pub mod error;
pub mod obs;
pub mod query;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the encoder entry points.
///

pub mod prelude {
    pub use crate::{
        config::EncoderConfig,
        encode::{CompiledJoin, CompiledQuery, FieldOp, QueryEncoder, RawQuery, encode_query},
        error::EncodeError,
        query::{
            AssociationInfo, Clause, ColumnName, Comparison, ComparisonRight, Operator,
            QueryAssociation, QueryDescription, SerializedQuery, TableName,
        },
        value::Value,
    };
}
