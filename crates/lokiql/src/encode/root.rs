use crate::{
    config::EncoderConfig,
    encode::{CompiledQuery, EncodeContext, RawQuery},
    error::{EncodeError, QueryFeature},
    obs::{EncodeTraceEvent, EncodeTraceSink, NoopTraceSink},
    query::{Clause, QueryDescription, SerializedQuery},
};

///
/// QueryEncoder
///
/// Entry point for encoding. Holds configuration and an optional trace
/// sink; encoding itself borrows the query and never mutates it.
///

#[derive(Clone, Default)]
pub struct QueryEncoder<'a> {
    config: EncoderConfig,
    trace: Option<&'a dyn EncodeTraceSink>,
}

impl<'a> QueryEncoder<'a> {
    #[must_use]
    pub const fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            trace: None,
        }
    }

    /// Install a trace sink for subsequent encodes.
    #[must_use]
    pub fn with_trace(mut self, sink: &'a dyn EncodeTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn encode(&self, query: &SerializedQuery) -> Result<CompiledQuery, EncodeError> {
        let description = &query.description;
        reject_unsupported(description)?;

        let trace = self.trace.unwrap_or(&NoopTraceSink);
        trace.on_event(EncodeTraceEvent::Start {
            table: &query.table,
            root_conditions: description.conditions.len(),
        });

        let cx = EncodeContext {
            config: &self.config,
            associations: &query.associations,
            trace,
        };
        let compiled = CompiledQuery {
            table: query.table.clone(),
            predicate: cx.encode_root_conditions(&description.conditions)?,
            has_joins: !description.join_tables.is_empty(),
        };

        trace.on_event(EncodeTraceEvent::Finish {
            table: &compiled.table,
            has_predicate: compiled.predicate.is_some(),
            has_joins: compiled.has_joins,
        });

        Ok(compiled)
    }
}

/// Encode a query with the default configuration and no tracing.
pub fn encode_query(query: &SerializedQuery) -> Result<CompiledQuery, EncodeError> {
    QueryEncoder::default().encode(query)
}

impl EncodeContext<'_> {
    /// Encode a root-level condition list.
    ///
    /// Zero conditions yield no predicate at all, one yields that
    /// condition unwrapped, and several are conjoined with `$and`.
    pub(crate) fn encode_root_conditions(
        &self,
        conditions: &[Clause],
    ) -> Result<Option<RawQuery>, EncodeError> {
        let mut encoded = self.encode_conditions(conditions)?;

        Ok(match encoded.len() {
            0 => None,
            1 => encoded.pop(),
            _ => Some(RawQuery::And(encoded)),
        })
    }
}

// Ordering and row limits are applied by no part of this backend.
fn reject_unsupported(description: &QueryDescription) -> Result<(), EncodeError> {
    let feature = if !description.sort_by.is_empty() {
        QueryFeature::SortBy
    } else if description.take.is_some() {
        QueryFeature::Take
    } else if description.skip.is_some() {
        QueryFeature::Skip
    } else {
        return Ok(());
    };

    Err(EncodeError::UnsupportedFeature { feature })
}
