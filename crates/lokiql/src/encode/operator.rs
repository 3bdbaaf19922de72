//! Operator table: one encoder function per abstract comparison operator.
//!
//! The engine's `$lt`, `$lte` and `$nin` all accept null-valued records,
//! while null never satisfies the abstract operators; those encoders add an
//! explicit "not null" conjunct.

use crate::{
    config::EncoderConfig,
    encode::{FieldOp, LikePattern, comparison::Operand},
    error::{EncodeError, OperandShape},
    query::Operator,
    value::Value,
};

///
/// Condition
///
/// Result of encoding one comparison, before it is bound to a column.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Condition {
    Op(FieldOp),
    AlwaysTrue,
}

pub(crate) type OperatorFn = fn(Operand<'_>, &EncoderConfig) -> Result<Condition, EncodeError>;

/// Look up the encoder for an operator.
pub(crate) const fn operator_fn(operator: Operator) -> OperatorFn {
    match operator {
        Operator::Eq => weak_equal,
        Operator::NotEq => weak_not_equal,
        // weakGt only differs from gt for column comparisons, which the matcher owns
        Operator::Gt | Operator::WeakGt => greater,
        Operator::Gte => greater_or_equal,
        Operator::Lt => less,
        Operator::Lte => less_or_equal,
        Operator::OneOf => one_of,
        Operator::NotIn => not_in,
        Operator::Between => between,
        Operator::Like => like,
        Operator::NotLike => not_like,
    }
}

fn weak_equal(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let value = scalar(Operator::Eq, operand)?;

    Ok(Condition::Op(FieldOp::Aeq(value.clone())))
}

fn weak_not_equal(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let value = scalar(Operator::NotEq, operand)?;

    Ok(Condition::Op(FieldOp::not(FieldOp::Aeq(value.clone()))))
}

fn greater(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let value = scalar(Operator::Gt, operand)?;

    Ok(Condition::Op(FieldOp::Gt(value.clone())))
}

fn greater_or_equal(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let value = scalar(Operator::Gte, operand)?;

    Ok(Condition::Op(FieldOp::Gte(value.clone())))
}

fn less(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let value = scalar(Operator::Lt, operand)?;

    Ok(Condition::Op(exclude_null(FieldOp::Lt(value.clone()))))
}

fn less_or_equal(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let value = scalar(Operator::Lte, operand)?;

    Ok(Condition::Op(exclude_null(FieldOp::Lte(value.clone()))))
}

fn one_of(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let values = list(Operator::OneOf, operand)?;

    Ok(Condition::Op(FieldOp::In(values.to_vec())))
}

fn not_in(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    let values = list(Operator::NotIn, operand)?;

    Ok(Condition::Op(exclude_null(FieldOp::Nin(values.to_vec()))))
}

fn between(operand: Operand<'_>, _: &EncoderConfig) -> Result<Condition, EncodeError> {
    match list(Operator::Between, operand)? {
        [low, high] => Ok(Condition::Op(FieldOp::Between(low.clone(), high.clone()))),
        _ => Err(EncodeError::invalid_operand(
            Operator::Between,
            OperandShape::Pair,
        )),
    }
}

// A non-string pattern cannot be evaluated; it must not exclude rows.
fn like(operand: Operand<'_>, config: &EncoderConfig) -> Result<Condition, EncodeError> {
    let Some(pattern) = operand.as_text() else {
        return Ok(Condition::AlwaysTrue);
    };

    Ok(Condition::Op(FieldOp::Regex(LikePattern::new(
        pattern,
        config.case_insensitive_like,
    ))))
}

fn not_like(operand: Operand<'_>, config: &EncoderConfig) -> Result<Condition, EncodeError> {
    let Some(pattern) = operand.as_text() else {
        return Ok(Condition::AlwaysTrue);
    };
    let pattern = LikePattern::new(pattern, config.case_insensitive_like);

    Ok(Condition::Op(FieldOp::And(vec![
        FieldOp::not(FieldOp::Eq(Value::Null)),
        FieldOp::not(FieldOp::Regex(pattern)),
    ])))
}

/// Conjoin `op` with "value is not (weakly) null".
fn exclude_null(op: FieldOp) -> FieldOp {
    FieldOp::And(vec![op, FieldOp::not(FieldOp::Aeq(Value::Null))])
}

fn scalar(operator: Operator, operand: Operand<'_>) -> Result<&Value, EncodeError> {
    match operand {
        Operand::Value(value) => Ok(value),
        Operand::Values(_) => Err(EncodeError::invalid_operand(
            operator,
            OperandShape::Scalar,
        )),
    }
}

fn list(operator: Operator, operand: Operand<'_>) -> Result<&[Value], EncodeError> {
    match operand {
        Operand::Values(values) => Ok(values),
        Operand::Value(_) => Err(EncodeError::invalid_operand(operator, OperandShape::List)),
    }
}

///
/// TESTS
///
