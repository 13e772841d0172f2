/// Numeric conversion helpers.
///
/// This module provides safe functions for narrowing 64-bit integers into the
/// smaller unsigned types the machine needs (exponents, tuple indices)
/// without risking silent truncation. All functions return a `Result` with a
/// caller-supplied error so each call site reports the failure in its own
/// terms.
pub mod num;
