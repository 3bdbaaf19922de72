use crate::{
    encode::{
        EncodeContext, RawQuery,
        comparison::encode_comparison,
        operator::Condition,
    },
    error::EncodeError,
    obs::EncodeTraceEvent,
    query::{Clause, ColumnName, Comparison, ComparisonRight},
};

///
/// Combinator
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Combinator {
    And,
    Or,
}

impl Combinator {
    const fn kind(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    const fn wrap(self, children: Vec<RawQuery>) -> RawQuery {
        match self {
            Self::And => RawQuery::And(children),
            Self::Or => RawQuery::Or(children),
        }
    }
}

impl EncodeContext<'_> {
    /// Encode one clause of the condition tree.
    pub(crate) fn encode_clause(&self, clause: &Clause) -> Result<RawQuery, EncodeError> {
        match clause {
            Clause::Where { column, comparison } => self.encode_where(column, comparison),
            Clause::And { conditions } => self.encode_combinator(Combinator::And, conditions),
            Clause::Or { conditions } => self.encode_combinator(Combinator::Or, conditions),
            Clause::On { table, conditions } => self.encode_join(table, conditions),
            Clause::RawPassthrough { expr } => Ok(RawQuery::Raw(expr.clone())),
        }
    }

    /// Encode sibling clauses, preserving their order.
    pub(crate) fn encode_conditions(
        &self,
        conditions: &[Clause],
    ) -> Result<Vec<RawQuery>, EncodeError> {
        conditions
            .iter()
            .map(|clause| self.encode_clause(clause))
            .collect()
    }

    fn encode_where(
        &self,
        column: &ColumnName,
        comparison: &Comparison,
    ) -> Result<RawQuery, EncodeError> {
        // column comparisons are evaluated later by the row matcher
        if let ComparisonRight::ColumnRef(compared_to) = &comparison.right {
            self.trace.on_event(EncodeTraceEvent::Deferred {
                column,
                compared_to,
            });

            return Ok(RawQuery::always_true(self.config));
        }

        match encode_comparison(comparison, self.config)? {
            Condition::Op(op) => Ok(RawQuery::field(column.clone(), op)),
            Condition::AlwaysTrue => Ok(RawQuery::always_true(self.config)),
        }
    }

    fn encode_combinator(
        &self,
        combinator: Combinator,
        conditions: &[Clause],
    ) -> Result<RawQuery, EncodeError> {
        let mut children = self.encode_conditions(conditions)?;

        match children.len() {
            0 => Err(EncodeError::InvalidClause {
                kind: combinator.kind().to_string(),
                reason: "conditions must not be empty".to_string(),
            }),
            1 => Ok(children.remove(0)),
            _ => Ok(combinator.wrap(children)),
        }
    }
}
