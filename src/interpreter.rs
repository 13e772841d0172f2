/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (scanner) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// keywords, identifiers, literals, operators and punctuation. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source line info.
/// - Handles integer and string literals (including escape sequences),
///   identifiers, keywords and operators.
/// - Discards whitespace and `//` comments.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The machine module evaluates the standardized tree.
///
/// The CSE (Control-Stack-Environment) machine is the execution engine of the
/// interpreter. It flattens the standardized tree into numbered control
/// structures and then repeatedly applies transition rules over a control
/// stack, a value stack and a tree of environments until the program is
/// reduced to a single value.
///
/// # Responsibilities
/// - Generates control structures from the standardized tree.
/// - Applies the machine rules: literals, closures, applications,
///   conditionals, tuples, recursion via the fixed-point combinator.
/// - Hosts the builtin functions bound in the primitive environment.
/// - Reports runtime errors such as unbound identifiers or division by zero.
pub mod machine;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of the program, using one
/// recursive-descent procedure per grammar non-terminal.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates correct grammar and syntax, reporting errors with line info.
/// - Covers the full expression, definition and variable grammar.
pub mod parser;
/// The standardizer module rewrites the AST into the standardized tree.
///
/// Standardization removes every surface binding construct (`let`, `where`,
/// `within`, `and`, `rec`, function forms, infix `@`) and re-expresses each
/// one as lambda application, so the machine only ever has to deal with one
/// binder.
///
/// # Responsibilities
/// - Applies the rewrite rules bottom-up over the AST.
/// - Preserves the scoping and recursion semantics of the source program.
/// - Reports structurally invalid trees as internal invariant violations.
pub mod standardizer;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during execution: integers,
/// strings, truth values, tuples, `nil`, `dummy`, closures, eta-closures and
/// builtins. It also provides the textual representation used by `Print`.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements type accessors used by the machine's operator rules.
/// - Renders values the way RPAL programs observe them.
pub mod value;
