use crate::{
    config::EncoderConfig,
    encode::{
        FieldOp,
        operator::{Condition, operator_fn},
    },
    error::EncodeError,
    query::{Comparison, ComparisonRight, Operator},
    value::Value,
};

///
/// Operand
///
/// Literal right-hand side of a comparison, borrowed from the clause tree.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Operand<'a> {
    Value(&'a Value),
    Values(&'a [Value]),
}

impl<'a> Operand<'a> {
    pub(crate) fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Value(value) => value.as_text(),
            Self::Values(_) => None,
        }
    }
}

/// Extract the literal operand of a comparison.
///
/// Column references have no literal operand. The clause encoder defers
/// those before calling here; reaching this with one is a caller bug.
pub(crate) fn extract_operand(right: &ComparisonRight) -> Result<Operand<'_>, EncodeError> {
    match right {
        ComparisonRight::Value(value) => Ok(Operand::Value(value)),
        ComparisonRight::Values(values) => Ok(Operand::Values(values)),
        ComparisonRight::ColumnRef(column) => Err(EncodeError::UnimplementedColumnComparison {
            column: column.clone(),
        }),
    }
}

/// Encode a literal comparison into a column-independent condition.
pub(crate) fn encode_comparison(
    comparison: &Comparison,
    config: &EncoderConfig,
) -> Result<Condition, EncodeError> {
    let operand = extract_operand(&comparison.right)?;

    // eq and aeq agree on strings, and strict equality can use the engine's indexes
    if let Some(text) = operand.as_text() {
        match comparison.operator {
            Operator::Eq => return Ok(Condition::Op(FieldOp::Eq(Value::from(text)))),
            Operator::NotEq => return Ok(Condition::Op(FieldOp::Ne(Value::from(text)))),
            _ => {}
        }
    }

    operator_fn(comparison.operator)(operand, config)
}

///
/// TESTS
///
