use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{machine::core::EvalResult, value::Value},
};

/// Applies a unary operator to an evaluated operand.
///
/// Supported operators:
/// - `neg`: arithmetic negation of an integer (checked, so negating
///   `i64::MIN` reports overflow instead of wrapping).
/// - `not`: negation of a truth value.
///
/// # Parameters
/// - `op`: The unary operator.
/// - `value`: The operand.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// Returns a [`RuntimeError`] on a type mismatch or overflow.
pub fn apply_unary(op: UnaryOperator, value: Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Neg => {
            let n = value.as_integer(7)?;
            Ok(Value::Integer(n.checked_neg().ok_or(RuntimeError::Overflow)?))
        },
        UnaryOperator::Not => Ok(Value::Bool(!value.as_truthvalue(7)?)),
    }
}
