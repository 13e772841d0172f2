#[derive(Debug)]
/// Represents errors raised while rewriting the AST into the standardized
/// tree.
///
/// A parser-produced tree can never trigger these; they exist to turn an
/// internal invariant violation into a reported error instead of a panic.
pub enum StandardizeError {
    /// A node does not have the structure its label requires.
    MalformedNode {
        /// The label of the offending node.
        label:   String,
        /// What was wrong with it.
        details: String,
    },
}

impl std::fmt::Display for StandardizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedNode { label, details } => {
                write!(f, "Standardization error at '{label}' node: {details}.")
            },
        }
    }
}

impl std::error::Error for StandardizeError {}
