#[derive(Debug)]
/// Represents all errors that can occur during evaluation on the CSE machine.
pub enum RuntimeError {
    /// An identifier resolved neither in the current environment chain nor in
    /// the primitive environment.
    UnboundIdentifier {
        /// The name of the identifier.
        name: String,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The machine rule that raised the error.
        rule:    u8,
    },
    /// A multi-parameter function was applied to a tuple of the wrong length.
    ArityError {
        /// The number of parameters the function binds.
        expected: usize,
        /// The number of values actually supplied.
        found:    usize,
    },
    /// Tuple selection with an index outside `1..=Order`.
    IndexOutOfBounds {
        /// The requested 1-based index.
        index:  i64,
        /// The order of the tuple.
        length: usize,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Arithmetic overflowed the 64-bit integer range.
    Overflow,
    /// Exponentiation with a negative exponent.
    NegativeExponent,
    /// A builtin function received malformed input.
    BuiltinError {
        /// The name of the builtin.
        name:    &'static str,
        /// Details about the malformed input.
        details: String,
    },
    /// The machine reached a state no rule covers. Indicates an internal
    /// invariant violation, not a user error.
    StateError {
        /// Details about the broken invariant.
        details: String,
    },
    /// Writing to the output sink failed.
    OutputError {
        /// The underlying I/O error.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundIdentifier { name } => {
                write!(f, "Runtime error: Identifier '{name}' is not defined.")
            },
            Self::TypeError { details, rule } => {
                write!(f, "Runtime error (rule {rule}): {details}.")
            },
            Self::ArityError { expected, found } => write!(f,
                                                           "Runtime error: Function expects {expected} arguments but received {found}."),
            Self::IndexOutOfBounds { index, length } => write!(f,
                                                               "Runtime error: Tuple index {index} is out of range for a tuple of order {length}."),
            Self::DivisionByZero => write!(f, "Runtime error: Division by zero."),
            Self::Overflow => {
                write!(f, "Runtime error: Integer overflow while trying to compute result.")
            },
            Self::NegativeExponent => {
                write!(f, "Runtime error: Exponentiation with a negative exponent.")
            },
            Self::BuiltinError { name, details } => {
                write!(f, "Runtime error: Builtin '{name}': {details}.")
            },
            Self::StateError { details } => write!(f, "Runtime error: {details}."),
            Self::OutputError { details } => {
                write!(f, "Runtime error: Failed to write program output: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
