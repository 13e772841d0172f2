//! # rpal
//!
//! rpal is an interpreter for RPAL, a small applicative functional language.
//! Source text is scanned into tokens, parsed into an abstract syntax tree,
//! rewritten into a standardized tree whose only binding construct is lambda
//! application, and finally evaluated on a CSE (Control-Stack-Environment)
//! machine.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    ast::Node,
    interpreter::{
        lexer::tokenize,
        machine::{
            control::generate_structures,
            core::{CseMachine, TraceSinks},
        },
        parser::core::parse,
        standardizer::standardize,
    },
};

/// Defines the structure of parsed and standardized code.
///
/// This module declares the `Node` tree shared by the parser, the
/// standardizer and the machine's control-structure generator, together with
/// the operator enums and the dot-notation tree printer.
///
/// # Responsibilities
/// - Defines the tree label set for all language constructs.
/// - Provides structural equality for trees.
/// - Renders trees in the dot notation used by the CLI dump modes.
pub mod ast;
/// Provides unified error types for every pipeline phase.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// standardizing or evaluating code. It standardizes error reporting and
/// carries detailed information about failures, including source lines where
/// available.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, standardizer,
///   machine).
/// - Attaches line numbers or machine rule numbers for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, standardization, evaluation,
/// value representations and error handling to provide a complete runtime
/// for RPAL programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, standardizer, machine.
/// - Provides entry points for each pipeline stage.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// This module provides reusable helpers used throughout the machine, such
/// as checked narrowing conversions for exponents and tuple indices.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32` and `usize` without silent data
///   loss.
pub mod util;

/// Parses a program and returns its abstract syntax tree.
///
/// # Errors
/// Returns an error if scanning or parsing fails.
///
/// # Examples
/// ```
/// use rpal::get_ast;
///
/// let ast = get_ast("let x = 5 in x").unwrap();
/// assert!(ast.to_string().starts_with("let\n"));
///
/// // A grammar violation is reported, not panicked on.
/// assert!(get_ast("let x = in x").is_err());
/// ```
pub fn get_ast(source: &str) -> Result<Node, Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let mut tokens = tokens.iter().peekable();

    Ok(parse(&mut tokens)?)
}

/// Parses and standardizes a program, returning its standardized tree.
///
/// # Errors
/// Returns an error if scanning, parsing or standardization fails.
pub fn get_st(source: &str) -> Result<Node, Box<dyn std::error::Error>> {
    Ok(standardize(get_ast(source)?)?)
}

/// Runs a program, writing everything it prints to `out`.
///
/// The program's own result value is discarded; the observable behaviour of
/// a program is what it `Print`s.
///
/// # Errors
/// Returns an error if any pipeline stage fails. Output written before a
/// runtime failure has already reached `out`.
///
/// # Examples
/// ```
/// use rpal::get_result;
///
/// let mut out = Vec::new();
/// get_result("Print(1 + 2)", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "3\n");
///
/// // Example with an intentional error (unknown variable).
/// let mut out = Vec::new();
/// assert!(get_result("Print(x)", &mut out).is_err());
/// ```
pub fn get_result(source: &str, out: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let st = get_st(source)?;
    let structures = generate_structures(&st)?;

    let mut machine = CseMachine::new(structures, out);
    machine.evaluate()?;

    Ok(())
}

/// Runs a program like [`get_result`], additionally writing the serialized
/// control stack and value stack to the given sinks after every machine
/// step.
///
/// The trace is one line per step and sink, items separated by single
/// spaces. It is observable behaviour for debugging but not part of program
/// semantics.
///
/// # Errors
/// Returns an error if any pipeline stage fails or a sink cannot be written.
pub fn get_result_with_trace<'a>(source: &str,
                                 out: &'a mut dyn Write,
                                 control_sink: &'a mut dyn Write,
                                 stack_sink: &'a mut dyn Write)
                                 -> Result<(), Box<dyn std::error::Error>> {
    let st = get_st(source)?;
    let structures = generate_structures(&st)?;

    let mut machine = CseMachine::new(structures, out);
    machine.set_trace(TraceSinks { control: control_sink,
                                   stack:   stack_sink, });
    machine.evaluate()?;

    Ok(())
}
