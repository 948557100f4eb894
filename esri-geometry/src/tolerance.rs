//! Floating point comparisons with a scale-relative tolerance.
//!
//! Two values are considered close when their difference is within
//! `(|a| + |b| + 10) * ε`, where `ε` is the machine epsilon of the type. Exact
//! equality (including equal infinities) always counts as close.

use num_traits::Float;

fn ten<T: Float>() -> T {
    let two = T::one() + T::one();
    let five = two + two + T::one();
    two * five
}

/// Tolerance-aware predicates for floating point numbers.
///
/// Implemented for every [`Float`], so both `f32` and `f64` get it.
pub trait Tolerance: Float {
    /// Returns true if the two values are equal within the relative tolerance.
    fn is_close(self, other: Self) -> bool {
        if self == other {
            return true;
        }

        let eps = (self.abs() + other.abs() + ten()) * Self::epsilon();
        let delta = self - other;
        -eps < delta && eps > delta
    }

    /// Returns true if the two values are within `deviation` of each other.
    fn is_close_abs(self, other: Self, deviation: Self) -> bool {
        (self - other).abs() <= deviation
    }

    /// Strictly greater and not close.
    fn greater_than(self, other: Self) -> bool {
        self > other && !self.is_close(other)
    }

    /// Greater or close.
    fn greater_than_or_close(self, other: Self) -> bool {
        self > other || self.is_close(other)
    }

    /// Strictly less and not close.
    fn less_than(self, other: Self) -> bool {
        self < other && !self.is_close(other)
    }

    /// Less or close.
    fn less_than_or_close(self, other: Self) -> bool {
        self < other || self.is_close(other)
    }

    /// Returns true if the value is within `10 * ε` of zero.
    fn is_close_to_zero(self) -> bool {
        self.abs() < ten::<Self>() * Self::epsilon()
    }

    /// Returns true if the value is within `10 * ε` of one.
    fn is_close_to_one(self) -> bool {
        (self - Self::one()).abs() < ten::<Self>() * Self::epsilon()
    }

    /// Returns true for values that are neither NaN nor infinite.
    fn is_finite_number(self) -> bool {
        self.is_finite()
    }

    /// Finite and greater than zero.
    fn is_positive_number(self) -> bool {
        self.is_finite() && self > Self::zero()
    }

    /// Finite and less than zero.
    fn is_negative_number(self) -> bool {
        self.is_finite() && self < Self::zero()
    }

    /// Closed range `[0, 1]` with tolerance at both ends.
    fn is_between_zero_and_one(self) -> bool {
        self.greater_than_or_close(Self::zero()) && self.less_than_or_close(Self::one())
    }

    /// Open range `(min, max)`. NaN and infinities are never in range.
    fn in_range(self, min: Self, max: Self) -> bool {
        self.is_finite() && self.greater_than(min) && self.less_than(max)
    }

    /// Half-open range `[min, max)`.
    fn in_range_or_min(self, min: Self, max: Self) -> bool {
        self.is_finite() && self.greater_than_or_close(min) && self.less_than(max)
    }

    /// Half-open range `(min, max]`.
    fn in_range_or_max(self, min: Self, max: Self) -> bool {
        self.is_finite() && self.greater_than(min) && self.less_than_or_close(max)
    }

    /// Closed range `[min, max]`.
    fn in_range_or_min_max(self, min: Self, max: Self) -> bool {
        self.is_finite() && self.greater_than_or_close(min) && self.less_than_or_close(max)
    }

    /// Finite and outside of the closed range `[min, max]`.
    fn out_of_range(self, min: Self, max: Self) -> bool {
        self.is_finite() && (self.less_than(min) || self.greater_than(max))
    }

    /// Replaces zero, NaN and infinities with `default`.
    fn or(self, default: Self) -> Self {
        if self.is_close_to_zero() || !self.is_finite() {
            default
        } else {
            self
        }
    }
}

impl<T: Float> Tolerance for T {}

/// Compares optional values: both absent, or both present and close.
pub fn are_close_opt<T: Float>(a: Option<T>, b: Option<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.is_close(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_values() {
        assert!(1.0f64.is_close(1.0));
        assert!(0.1f64.is_close(0.3 - 0.2));
        assert!(1e10f64.is_close(1e10 + 1e-7));
        assert!(!1.0f64.is_close(1.0001));
        assert!(f64::INFINITY.is_close(f64::INFINITY));
        assert!(!f64::NAN.is_close(f64::NAN));
    }

    #[test]
    fn tolerance_grows_with_magnitude() {
        let big = 1e12f64;
        assert!(big.is_close(big + 1e-4));
        assert!(!1.0f64.is_close(1.0 + 1e-4));
    }

    #[test]
    fn ordering_predicates() {
        let almost_one = 1.0f64 + 1e-15;
        assert!(!almost_one.greater_than(1.0));
        assert!(almost_one.greater_than_or_close(1.0));
        assert!(!almost_one.less_than(1.0));
        assert!(almost_one.less_than_or_close(1.0));
        assert!(2.0f64.greater_than(1.0));
        assert!(1.0f64.less_than(2.0));
    }

    #[test]
    fn zero_and_one() {
        assert!((0.1f64 + 0.2 - 0.3).is_close_to_zero());
        assert!(!1e-10f64.is_close_to_zero());
        assert!((0.1f64 * 10.0).is_close_to_one());
        assert!(0.5f64.is_between_zero_and_one());
        assert!(!1.5f64.is_between_zero_and_one());
    }

    #[test]
    fn ranges_reject_non_finite() {
        assert!(0.5f64.in_range(0.0, 1.0));
        assert!(!0.0f64.in_range(0.0, 1.0));
        assert!(0.0f64.in_range_or_min(0.0, 1.0));
        assert!(1.0f64.in_range_or_max(0.0, 1.0));
        assert!(1.0f64.in_range_or_min_max(0.0, 1.0));
        assert!(!f64::NAN.in_range_or_min_max(0.0, 1.0));
        assert!(!f64::INFINITY.out_of_range(0.0, 1.0));
        assert!(2.0f64.out_of_range(0.0, 1.0));
    }

    #[test]
    fn number_classes() {
        assert!(1.0f64.is_positive_number());
        assert!(!f64::INFINITY.is_positive_number());
        assert!((-1.0f64).is_negative_number());
        assert!(!f64::NAN.is_finite_number());
        assert_eq!(f64::NAN.or(5.0), 5.0);
        assert_eq!(0.0f64.or(5.0), 5.0);
        assert_eq!(3.0f64.or(5.0), 3.0);
    }

    #[test]
    fn works_for_f32() {
        assert!(0.1f32.is_close(0.3 - 0.2));
        assert!(!1.0f32.is_close(1.001));
    }

    #[test]
    fn optional_values() {
        assert!(are_close_opt::<f64>(None, None));
        assert!(are_close_opt(Some(1.0), Some(1.0 + 1e-15)));
        assert!(!are_close_opt(Some(1.0), None));
    }
}
