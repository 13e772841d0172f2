/// Lexical errors.
///
/// Defines all error types that can occur while scanning source text into
/// tokens: unexpected characters, unterminated string literals, and integer
/// literals that do not fit the machine's integer type.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while parsing the token stream into
/// an abstract syntax tree: unexpected tokens, missing expected tokens, and
/// premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised by the CSE machine during
/// evaluation: unbound identifiers, type mismatches, arity mismatches,
/// division by zero, overflow, and malformed input to builtin functions.
pub mod runtime_error;
/// Standardization errors.
///
/// Contains the error type raised when the standardizer encounters a
/// structurally invalid tree. These indicate internal invariant violations
/// and are impossible for parser-produced trees.
pub mod standardize_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use standardize_error::StandardizeError;
