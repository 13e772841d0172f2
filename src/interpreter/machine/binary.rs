use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{machine::core::EvalResult, value::Value},
    util::num::i64_to_u32_checked,
};

/// Applies a binary operator to two evaluated operands.
///
/// Type rules:
/// - `+`, `-`, `*`, `/`, `**` require integers; arithmetic is checked, so
///   overflow and division by zero are reported, never wrapped.
/// - `gr`, `ge`, `ls`, `le` order two integers or two strings
///   (lexicographically).
/// - `eq`, `ne` compare values of matching kind.
/// - `&`, `or` require truth values. Both operands are already evaluated;
///   there is no short-circuiting in the language.
/// - `aug` extends a tuple (or `nil`, acting as the empty tuple) on the
///   right with any value.
///
/// # Parameters
/// - `op`: The operator to apply.
/// - `left`: The left operand.
/// - `right`: The right operand.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// Returns a [`RuntimeError`] on any type mismatch, overflow, division by
/// zero or negative exponent.
pub fn apply_binary(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => {
            let (l, r) = integers(&left, &right)?;
            Ok(Value::Integer(l.checked_add(r).ok_or(RuntimeError::Overflow)?))
        },
        BinaryOperator::Sub => {
            let (l, r) = integers(&left, &right)?;
            Ok(Value::Integer(l.checked_sub(r).ok_or(RuntimeError::Overflow)?))
        },
        BinaryOperator::Mul => {
            let (l, r) = integers(&left, &right)?;
            Ok(Value::Integer(l.checked_mul(r).ok_or(RuntimeError::Overflow)?))
        },
        BinaryOperator::Div => {
            let (l, r) = integers(&left, &right)?;
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Integer(l.checked_div(r).ok_or(RuntimeError::Overflow)?))
        },
        BinaryOperator::Pow => {
            let (l, r) = integers(&left, &right)?;
            if r < 0 {
                return Err(RuntimeError::NegativeExponent);
            }
            let exponent = i64_to_u32_checked(r, RuntimeError::Overflow)?;
            Ok(Value::Integer(l.checked_pow(exponent).ok_or(RuntimeError::Overflow)?))
        },

        BinaryOperator::Greater => Ok(Value::Bool(compare(&left, &right)? == Ordering::Greater)),
        BinaryOperator::GreaterEqual => Ok(Value::Bool(compare(&left, &right)? != Ordering::Less)),
        BinaryOperator::Less => Ok(Value::Bool(compare(&left, &right)? == Ordering::Less)),
        BinaryOperator::LessEqual => Ok(Value::Bool(compare(&left, &right)? != Ordering::Greater)),

        BinaryOperator::Equal => Ok(Value::Bool(equal(&left, &right)?)),
        BinaryOperator::NotEqual => Ok(Value::Bool(!equal(&left, &right)?)),

        BinaryOperator::And => {
            Ok(Value::Bool(left.as_truthvalue(6)? & right.as_truthvalue(6)?))
        },
        BinaryOperator::Or => {
            Ok(Value::Bool(left.as_truthvalue(6)? | right.as_truthvalue(6)?))
        },

        BinaryOperator::Aug => augment(left, right),
    }
}

/// Extracts two integer operands.
fn integers(left: &Value, right: &Value) -> EvalResult<(i64, i64)> {
    Ok((left.as_integer(6)?, right.as_integer(6)?))
}

/// Orders two values of matching kind: integers numerically, strings
/// lexicographically.
fn compare(left: &Value, right: &Value) -> EvalResult<Ordering> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l.cmp(r)),
        (Value::Str(l), Value::Str(r)) => Ok(l.cmp(r)),
        (l, r) => {
            Err(RuntimeError::TypeError { details: format!("cannot order {} against {}",
                                                           l.kind(),
                                                           r.kind()),
                                          rule:    6, })
        },
    }
}

/// Tests two values of matching kind for equality.
fn equal(left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l == r),
        (Value::Str(l), Value::Str(r)) => Ok(l == r),
        (Value::Bool(l), Value::Bool(r)) => Ok(l == r),
        (Value::Nil, Value::Nil) | (Value::Dummy, Value::Dummy) => Ok(true),
        (l, r) => {
            Err(RuntimeError::TypeError { details: format!("cannot compare {} with {} for \
                                                            equality",
                                                           l.kind(),
                                                           r.kind()),
                                          rule:    6, })
        },
    }
}

/// Extends a tuple on the right. `nil` acts as the empty tuple; any other
/// left operand is a type error.
fn augment(left: Value, right: Value) -> EvalResult<Value> {
    match left {
        Value::Tuple(mut values) => {
            values.push(right);
            Ok(Value::Tuple(values))
        },
        Value::Nil => Ok(Value::Tuple(vec![right])),
        other => {
            Err(RuntimeError::TypeError { details: format!("left operand of 'aug' must be a \
                                                            tuple or nil, found {}",
                                                           other.kind()),
                                          rule:    6, })
        },
    }
}
