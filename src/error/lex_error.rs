#[derive(Debug)]
/// Represents all errors that can occur during lexical analysis.
pub enum LexError {
    /// Found a character sequence that matches no token rule.
    UnexpectedToken {
        /// The offending source slice.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line where the string was opened.
        line: usize,
    },
    /// An integer literal does not fit into a 64-bit signed integer.
    IntegerTooLarge {
        /// The offending literal.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected character sequence '{token}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },
            Self::IntegerTooLarge { token, line } => {
                write!(f, "Error on line {line}: Integer literal '{token}' is too large.")
            },
        }
    }
}

impl std::error::Error for LexError {}
