/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations: arithmetic, comparisons,
/// equality, boolean connectives and tuple augmentation.
pub mod binary;

/// Builtin functions.
///
/// Defines the primitives bound in the primitive environment and their
/// application, including curried partial application.
pub mod builtin;

/// Control structures.
///
/// Flattens the standardized tree into the numbered flat bodies the machine
/// executes, assigning indices to lambdas and conditional branches.
pub mod control;

/// Core machine logic.
///
/// Contains the CSE machine itself: the control stack, the value stack, the
/// environment stack, the rule dispatch loop and the optional state tracing.
pub mod core;

/// Environments.
///
/// Defines the environment tree: immutable nodes mapping names to values,
/// shared by reference counting, rooted at the primitive environment.
pub mod environment;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical `not`.
pub mod unary;
