//! Query encoding: lowers a `SerializedQuery` into a LokiJS raw query.
//!
//! Stage ownership:
//! - `operator` maps each abstract operator to its field-level condition.
//! - `comparison` extracts comparison operands and applies the string fast path.
//! - `clause` recursively encodes the clause tree.
//! - `join` resolves `on` clauses against association metadata.
//! - `root` rejects unsupported features and flattens root conditions.
//!
//! Every stage is pure; the input tree is only ever borrowed.

mod clause;
mod comparison;
mod join;
mod like;
mod operator;
mod raw;
mod root;

#[cfg(test)]
mod tests;

use crate::{
    config::EncoderConfig,
    obs::EncodeTraceSink,
    query::QueryAssociation,
};

///
/// Re-Exports
///
pub use like::LikePattern;
pub use raw::{CompiledJoin, CompiledQuery, FieldOp, RawQuery};
pub use root::{QueryEncoder, encode_query};

///
/// EncodeContext
///
/// Borrowed state threaded through one encode call.
///

#[derive(Clone, Copy)]
pub(crate) struct EncodeContext<'a> {
    pub(crate) config: &'a EncoderConfig,
    pub(crate) associations: &'a [QueryAssociation],
    pub(crate) trace: &'a dyn EncodeTraceSink,
}
