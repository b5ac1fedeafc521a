//! Guarded arithmetic shared by the reconstruction and remapping stages.
//!
//! Every density and area in the pipeline is a ratio of a count to a
//! diameter width. Widths come from fixed constants or from the growth model
//! and are never zero in practice, but a zero or non-finite width must turn
//! into a zero contribution rather than an infinity that poisons every bin
//! below it.

/// Divide, returning 0.0 when the quotient is not a finite number.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Replace NaN and infinities with 0.0.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Area of a trapezoid with parallel sides `a` and `b` over `width`.
#[inline]
pub fn trapezoid(a: f64, b: f64, width: f64) -> f64 {
    finite_or_zero(0.5 * (a + b) * width)
}
