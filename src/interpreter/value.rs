use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::machine::{builtin::Builtin, core::EvalResult, environment::Environment},
};

/// A lexical closure: a lambda paired with the environment it was created in.
///
/// The body itself lives in the machine's numbered control structures; the
/// closure only carries the structure index, the bound names and the defining
/// environment. The same struct doubles as the payload of an eta-closure,
/// which marks the fixed point of a recursive binding.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Index of the control structure holding the body.
    pub index:  usize,
    /// The bound parameter names, in order.
    pub params: Vec<String>,
    /// The environment the lambda was evaluated in.
    pub env:    Rc<Environment>,
}

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible results of evaluation: scalars, tuples,
/// the special `nil` and `dummy` constants, and the three kinds of applicable
/// values (closures, eta-closures and builtins).
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// An immutable string.
    Str(String),
    /// A truth value (`true` or `false`).
    Bool(bool),
    /// A tuple of values, indexed from 1 by application.
    Tuple(Vec<Value>),
    /// The empty tuple.
    Nil,
    /// The `dummy` constant.
    Dummy,
    /// A lexical closure.
    Closure(Closure),
    /// A closure promoted to represent a recursive binding.
    Eta(Closure),
    /// A builtin function, possibly partially applied.
    Builtin(Builtin),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl Value {
    /// Returns a short noun describing the value's kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "an integer",
            Self::Str(_) => "a string",
            Self::Bool(_) => "a truthvalue",
            Self::Tuple(_) => "a tuple",
            Self::Nil => "nil",
            Self::Dummy => "dummy",
            Self::Closure(_) => "a function",
            Self::Eta(_) => "a recursive function",
            Self::Builtin(_) => "a builtin function",
        }
    }

    /// Extracts the integer out of the value, or reports a type error
    /// attributed to the given machine rule.
    pub fn as_integer(&self, rule: u8) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            other => {
                Err(RuntimeError::TypeError { details: format!("expected an integer, found {}",
                                                               other.kind()),
                                              rule })
            },
        }
    }

    /// Extracts the truth value, or reports a type error attributed to the
    /// given machine rule.
    pub fn as_truthvalue(&self, rule: u8) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => {
                Err(RuntimeError::TypeError { details: format!("expected a truthvalue, found {}",
                                                               other.kind()),
                                              rule })
            },
        }
    }
}

/// Renders the value the way RPAL programs observe it: integers in decimal,
/// strings without quotes, tuples parenthesized and comma-separated.
///
/// The textual form of closures and builtins is unspecified by the language;
/// the forms used here exist for diagnostics and should not be relied upon.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(true) => write!(f, "true"),
            Self::Bool(false) => write!(f, "false"),
            Self::Tuple(values) => {
                let members = values.iter()
                                    .map(ToString::to_string)
                                    .collect::<Vec<_>>()
                                    .join(", ");
                write!(f, "({members})")
            },
            Self::Nil => write!(f, "nil"),
            Self::Dummy => write!(f, "dummy"),
            Self::Closure(c) => {
                write!(f, "[lambda closure: {}: {}]", c.params.join(", "), c.index)
            },
            Self::Eta(c) => write!(f, "[eta closure: {}: {}]", c.params.join(", "), c.index),
            Self::Builtin(b) => write!(f, "[builtin function: {}]", b.name()),
        }
    }
}
