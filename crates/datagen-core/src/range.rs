//! Closed intervals used to bound every generator.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GenerationError;

/// An immutable closed interval `[lower_bound, upper_bound]`.
///
/// The invariant `lower_bound <= upper_bound` is enforced at construction,
/// so every `Range` in circulation is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range<T> {
    #[serde(rename = "lower")]
    lower_bound: T,
    #[serde(rename = "upper")]
    upper_bound: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    /// Creates the interval `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `lower > upper` or the
    /// bounds cannot be compared (for example a `NaN` bound).
    pub fn closed(lower: T, upper: T) -> Result<Self, GenerationError> {
        match lower.partial_cmp(&upper) {
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal) => Ok(Self {
                lower_bound: lower,
                upper_bound: upper,
            }),
            Some(std::cmp::Ordering::Greater) => Err(GenerationError::invalid(
                "lower bound must not be greater than upper bound",
            )),
            None => Err(GenerationError::invalid("range bounds are not comparable")),
        }
    }

    /// Creates a range from bounds that may be absent.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if either bound is `None`,
    /// or for the same reasons as [`Range::closed`].
    pub fn from_bounds(lower: Option<T>, upper: Option<T>) -> Result<Self, GenerationError> {
        let lower = lower.ok_or_else(|| GenerationError::invalid("lower bound is required"))?;
        let upper = upper.ok_or_else(|| GenerationError::invalid("upper bound is required"))?;
        Self::closed(lower, upper)
    }

    /// Creates the single-value range `[value, value]`.
    ///
    /// Usable in `const` contexts, so it does not validate. For a value that
    /// is not equal to itself (a `NaN`) use [`Range::closed`], which rejects
    /// it; the float draws also reject such a range when they are asked to
    /// generate from it.
    #[must_use]
    pub const fn fixed(value: T) -> Self {
        Self {
            lower_bound: value,
            upper_bound: value,
        }
    }

    /// The inclusive lower bound.
    #[must_use]
    pub fn lower_bound(&self) -> T {
        self.lower_bound
    }

    /// The inclusive upper bound.
    #[must_use]
    pub fn upper_bound(&self) -> T {
        self.upper_bound
    }

    /// Whether both bounds are equal.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    /// Whether `value` lies inside the interval.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    /// Clamps this range into `envelope`.
    ///
    /// A range lying entirely below the envelope collapses to the envelope's
    /// lower bound, one entirely above collapses to its upper bound, and a
    /// straddling range has each bound clamped independently. The result is
    /// never empty.
    #[must_use]
    pub fn limit(&self, envelope: &Range<T>) -> Range<T> {
        if self.upper_bound < envelope.lower_bound {
            return Range::fixed(envelope.lower_bound);
        }
        if self.lower_bound > envelope.upper_bound {
            return Range::fixed(envelope.upper_bound);
        }
        Range {
            lower_bound: envelope.clamp(self.lower_bound),
            upper_bound: envelope.clamp(self.upper_bound),
        }
    }

    fn clamp(&self, value: T) -> T {
        if value < self.lower_bound {
            self.lower_bound
        } else if value > self.upper_bound {
            self.upper_bound
        } else {
            value
        }
    }
}

impl<T: Ord + Copy> Range<T> {
    /// The range between `a` and `b`, whichever order they come in.
    #[must_use]
    pub fn spanning(a: T, b: T) -> Self {
        Self {
            lower_bound: a.min(b),
            upper_bound: a.max(b),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower_bound, self.upper_bound)
    }
}

#[derive(Deserialize)]
struct RawRange<T> {
    lower: Option<T>,
    upper: Option<T>,
}

impl<'de, T> Deserialize<'de> for Range<T>
where
    T: Deserialize<'de> + PartialOrd + Copy,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawRange::<T>::deserialize(deserializer)?;
        Range::from_bounds(raw.lower, raw.upper).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn range(lower: i32, upper: i32) -> Range<i32> {
        Range::closed(lower, upper).unwrap()
    }

    // --- construction ---

    #[test]
    fn test_closed_accepts_ordered_bounds() {
        let r = range(-3, 7);
        assert_eq!(r.lower_bound(), -3);
        assert_eq!(r.upper_bound(), 7);
        assert!(!r.is_fixed());
    }

    #[test]
    fn test_closed_with_equal_bounds_is_fixed() {
        let r = range(4, 4);
        assert!(r.is_fixed());
        assert_eq!(r, Range::fixed(4));
    }

    #[test]
    fn test_closed_rejects_inverted_bounds() {
        match Range::closed(5, 1) {
            Err(GenerationError::InvalidArgument(msg)) => {
                assert_eq!(msg, "lower bound must not be greater than upper bound");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_closed_rejects_nan_bound() {
        assert!(Range::closed(f64::NAN, 1.0).is_err());
        assert!(Range::closed(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_fixed_nan_is_not_validated_but_closed_is() {
        let unchecked = Range::fixed(f64::NAN);
        assert!(!unchecked.contains(f64::NAN));
        assert!(Range::closed(f64::NAN, f64::NAN).is_err());
    }

    #[test]
    fn test_spanning_orders_bounds() {
        assert_eq!(Range::spanning(9, 2), range(2, 9));
        assert_eq!(Range::spanning(2, 9), range(2, 9));
    }

    #[test]
    fn test_from_bounds_rejects_absent_bound() {
        assert!(Range::from_bounds(None, Some(3)).is_err());
        assert!(Range::from_bounds(Some(3), None).is_err());
        assert_eq!(Range::from_bounds(Some(1), Some(3)).unwrap(), range(1, 3));
    }

    // --- limit ---

    #[test]
    fn test_limit_entirely_below_collapses_to_envelope_lower() {
        assert_eq!(range(-10, -5).limit(&range(0, 1000)), Range::fixed(0));
    }

    #[test]
    fn test_limit_entirely_above_collapses_to_envelope_upper() {
        assert_eq!(range(2000, 3000).limit(&range(0, 1000)), Range::fixed(1000));
    }

    #[test]
    fn test_limit_straddling_clamps_each_bound() {
        assert_eq!(range(-5, 20).limit(&range(0, 10)), range(0, 10));
        assert_eq!(range(3, 20).limit(&range(0, 10)), range(3, 10));
        assert_eq!(range(-5, 4).limit(&range(0, 10)), range(0, 4));
    }

    #[test]
    fn test_limit_inside_is_unchanged() {
        assert_eq!(range(2, 8).limit(&range(0, 10)), range(2, 8));
    }

    #[test]
    fn test_limit_touching_bounds() {
        assert_eq!(range(-5, 0).limit(&range(0, 10)), Range::fixed(0));
        assert_eq!(range(10, 15).limit(&range(0, 10)), Range::fixed(10));
    }

    #[test]
    fn test_limit_fixed_outside_envelope() {
        assert_eq!(Range::fixed(2000).limit(&range(0, 1000)), Range::fixed(1000));
        assert_eq!(Range::fixed(-5).limit(&range(0, 1000)), Range::fixed(0));
    }

    // --- value semantics ---

    #[test]
    fn test_equal_ranges_hash_equally() {
        let mut set = HashSet::new();
        set.insert(range(1, 2));
        set.insert(range(1, 2));
        set.insert(range(1, 3));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_contains() {
        let r = range(1, 3);
        assert!(r.contains(1));
        assert!(r.contains(3));
        assert!(!r.contains(0));
        assert!(!r.contains(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(range(-1, 9).to_string(), "[-1, 9]");
    }

    // --- serde ---

    #[test]
    fn test_serializes_as_lower_upper() {
        let json = serde_json::to_value(range(1, 9)).unwrap();
        assert_eq!(json, serde_json::json!({ "lower": 1, "upper": 9 }));
    }

    #[test]
    fn test_deserialize_validates_bounds() {
        let ok: Range<i32> = serde_json::from_str(r#"{"lower": 1, "upper": 9}"#).unwrap();
        assert_eq!(ok, range(1, 9));

        let inverted = serde_json::from_str::<Range<i32>>(r#"{"lower": 9, "upper": 1}"#);
        assert!(inverted.is_err());

        let missing = serde_json::from_str::<Range<i32>>(r#"{"lower": 9}"#);
        assert!(missing.is_err());
    }
}
