/// Safely converts an `i64` to `u32` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value is negative or exceeds `u32::MAX`.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use rpal::util::num::i64_to_u32_checked;
///
/// // Works for representable values
/// let result = i64_to_u32_checked(42, "out of range!");
/// assert_eq!(result.unwrap(), 42);
///
/// // Fails for negative values
/// assert!(i64_to_u32_checked(-1, "out of range!").is_err());
///
/// // Fails for values above u32::MAX
/// assert!(i64_to_u32_checked(i64::MAX, "out of range!").is_err());
/// ```
pub fn i64_to_u32_checked<E>(value: i64, error: E) -> Result<u32, E> {
    u32::try_from(value).map_err(|_| error)
}

/// Safely converts an `i64` to `usize` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value is negative or exceeds the maximum
/// representable `usize`.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use rpal::util::num::i64_to_usize_checked;
///
/// let result = i64_to_usize_checked(7, "out of range!");
/// assert_eq!(result.unwrap(), 7);
///
/// assert!(i64_to_usize_checked(-7, "out of range!").is_err());
/// ```
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}
