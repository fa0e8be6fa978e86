/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds [`MAX_SAFE_INT`] in absolute
/// value.
///
/// ## Example
/// ```
/// use moss::util::num::{MAX_SAFE_INT, i64_to_f64_checked};
///
/// // Works for safe values
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// // Fails for values outside the safe range
/// let big = MAX_SAFE_INT + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range,
/// and not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, out-of-range, or fractional values.
///
/// ## Example
/// ```
/// use moss::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(10.0, "not an integer").unwrap(), 10);
/// assert!(f64_to_i64_checked(1.25, "not an integer").is_err());
/// assert!(f64_to_i64_checked(f64::NAN, "not an integer").is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    const MIN: f64 = i64::MIN as f64;
    const MAX: f64 = i64::MAX as f64;

    if !value.is_finite() || value.fract() != 0.0 || !(MIN..MAX).contains(&value) {
        return Err(error);
    }
    Ok(value as i64)
}

/// Safely converts a `usize` to an `i64` if and only if it fits.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `i64::MAX`.
///
/// ## Example
/// ```
/// use moss::util::num::usize_to_i64_checked;
///
/// assert_eq!(usize_to_i64_checked(100, "too big!").unwrap(), 100);
/// ```
pub fn usize_to_i64_checked<E>(value: usize, error: E) -> Result<i64, E> {
    i64::try_from(value).map_err(|_| error)
}
