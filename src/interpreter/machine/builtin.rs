use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::{
        machine::core::{EvalResult, output_error},
        value::Value,
    },
};

/// Identifies one of the primitive functions bound in the primitive
/// environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    /// Prints one value, newline-terminated, and returns `dummy`.
    Print,
    /// Tests whether the argument is an integer.
    Isinteger,
    /// Tests whether the argument is a truth value.
    Istruthvalue,
    /// Tests whether the argument is a string.
    Isstring,
    /// Tests whether the argument is a tuple (including `nil`).
    Istuple,
    /// Tests whether the argument is applicable (closure, eta-closure or
    /// builtin).
    Isfunction,
    /// Tests whether the argument is `dummy`.
    Isdummy,
    /// First character of a string.
    Stem,
    /// All but the first character of a string.
    Stern,
    /// String concatenation, curried over two arguments.
    Conc,
    /// Number of members of a tuple.
    Order,
    /// Tests whether a tuple is empty.
    Null,
    /// Decimal rendering of an integer.
    ItoS,
}

impl BuiltinKind {
    /// Every builtin, in the order they are bound in the primitive
    /// environment.
    pub const ALL: [Self; 13] = [Self::Print,
                                 Self::Isinteger,
                                 Self::Istruthvalue,
                                 Self::Isstring,
                                 Self::Istuple,
                                 Self::Isfunction,
                                 Self::Isdummy,
                                 Self::Stem,
                                 Self::Stern,
                                 Self::Conc,
                                 Self::Order,
                                 Self::Null,
                                 Self::ItoS];

    /// The name the builtin is bound to.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Print => "Print",
            Self::Isinteger => "Isinteger",
            Self::Istruthvalue => "Istruthvalue",
            Self::Isstring => "Isstring",
            Self::Istuple => "Istuple",
            Self::Isfunction => "Isfunction",
            Self::Isdummy => "Isdummy",
            Self::Stem => "Stem",
            Self::Stern => "Stern",
            Self::Conc => "Conc",
            Self::Order => "Order",
            Self::Null => "Null",
            Self::ItoS => "ItoS",
        }
    }

    /// The number of arguments the builtin needs before it applies.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Conc => 2,
            _ => 1,
        }
    }
}

/// A builtin function value, carrying the arguments accumulated so far by
/// partial application.
///
/// Each application feeds exactly one argument; the machine applies the
/// builtin once the accumulated arguments reach its arity, and otherwise
/// pushes the extended `Builtin` back as a value.
#[derive(Debug, Clone)]
pub struct Builtin {
    /// Which primitive this is.
    pub kind: BuiltinKind,
    /// Arguments accumulated by partial application, oldest first.
    pub args: Vec<Value>,
}

impl Builtin {
    /// Creates an unapplied builtin.
    #[must_use]
    pub const fn new(kind: BuiltinKind) -> Self {
        Self { kind,
               args: Vec::new() }
    }

    /// The name the builtin is bound to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Applies a saturated builtin to its arguments.
///
/// # Parameters
/// - `kind`: Which primitive to apply.
/// - `args`: Exactly `kind.arity()` evaluated arguments, oldest first.
/// - `out`: The sink `Print` writes to.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// Returns a [`RuntimeError::BuiltinError`] for malformed input, or an
/// output error if the sink fails.
pub fn apply(kind: BuiltinKind, args: &[Value], out: &mut dyn Write) -> EvalResult<Value> {
    match (kind, args) {
        (BuiltinKind::Print, [value]) => {
            writeln!(out, "{value}").map_err(output_error)?;
            Ok(Value::Dummy)
        },

        (BuiltinKind::Isinteger, [value]) => Ok(Value::Bool(matches!(value, Value::Integer(_)))),
        (BuiltinKind::Istruthvalue, [value]) => Ok(Value::Bool(matches!(value, Value::Bool(_)))),
        (BuiltinKind::Isstring, [value]) => Ok(Value::Bool(matches!(value, Value::Str(_)))),
        (BuiltinKind::Istuple, [value]) => {
            Ok(Value::Bool(matches!(value, Value::Tuple(_) | Value::Nil)))
        },
        (BuiltinKind::Isfunction, [value]) => {
            Ok(Value::Bool(matches!(value,
                                    Value::Closure(_) | Value::Eta(_) | Value::Builtin(_))))
        },
        (BuiltinKind::Isdummy, [value]) => Ok(Value::Bool(matches!(value, Value::Dummy))),

        (BuiltinKind::Stem, [value]) => {
            let s = expect_string(kind, value)?;
            Ok(Value::Str(s.chars().next().map(String::from).unwrap_or_default()))
        },
        (BuiltinKind::Stern, [value]) => {
            let s = expect_string(kind, value)?;
            Ok(Value::Str(s.chars().skip(1).collect()))
        },
        (BuiltinKind::Conc, [first, second]) => {
            let first = expect_string(kind, first)?;
            let second = expect_string(kind, second)?;
            Ok(Value::Str(format!("{first}{second}")))
        },

        (BuiltinKind::Order, [Value::Tuple(values)]) => {
            let order = i64::try_from(values.len()).map_err(|_| RuntimeError::Overflow)?;
            Ok(Value::Integer(order))
        },
        (BuiltinKind::Order, [Value::Nil]) => Ok(Value::Integer(0)),
        (BuiltinKind::Order, [other]) => {
            Err(RuntimeError::BuiltinError { name:    kind.name(),
                                             details: format!("expected a tuple, found {}",
                                                              other.kind()), })
        },

        (BuiltinKind::Null, [value]) => {
            let empty = match value {
                Value::Nil => true,
                Value::Tuple(values) => values.is_empty(),
                _ => false,
            };
            Ok(Value::Bool(empty))
        },

        (BuiltinKind::ItoS, [Value::Integer(n)]) => Ok(Value::Str(n.to_string())),
        (BuiltinKind::ItoS, [other]) => {
            Err(RuntimeError::BuiltinError { name:    kind.name(),
                                             details: format!("expected an integer, found {}",
                                                              other.kind()), })
        },

        _ => {
            Err(RuntimeError::StateError { details: format!("builtin '{}' applied with the \
                                                             wrong number of arguments",
                                                            kind.name()), })
        },
    }
}

/// Extracts a string argument or reports a builtin error.
fn expect_string<'v>(kind: BuiltinKind, value: &'v Value) -> EvalResult<&'v str> {
    match value {
        Value::Str(s) => Ok(s),
        other => {
            Err(RuntimeError::BuiltinError { name:    kind.name(),
                                             details: format!("expected a string, found {}",
                                                              other.kind()), })
        },
    }
}
