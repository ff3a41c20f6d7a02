//! Bias-free bounded random values.
//!
//! Every bounded draw rejects raw samples from the incomplete tail of the
//! source's range, so each value in `[lower, upper]` is equally likely even
//! when the interval width does not divide `2^32` or `2^64`. Intervals wider
//! than the signed width (e.g. `[i32::MIN, i32::MAX]`) are served by
//! resampling full-width values until one lands inside the bounds.

use crate::bit_source::RandomBitSource;
use crate::error::GenerationError;
use crate::range::Range;

/// Bounded value draws, available on every [`RandomBitSource`].
pub trait RandomValues: RandomBitSource {
    /// A uniform `i32` in `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `lower > upper`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn integer(&mut self, lower: i32, upper: i32) -> Result<i32, GenerationError> {
        if lower > upper {
            return Err(inverted_bounds());
        }
        if lower == upper {
            return Ok(lower);
        }
        match upper.checked_sub(lower) {
            Some(span) => {
                let offset = bounded_u32(self, span as u32 + 1);
                Ok(lower + offset as i32)
            }
            None => loop {
                let candidate = self.next_u32() as i32;
                if lower <= candidate && candidate <= upper {
                    return Ok(candidate);
                }
            },
        }
    }

    /// A uniform `i32` in `[0, max]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `max` is negative.
    fn integer_up_to(&mut self, max: i32) -> Result<i32, GenerationError> {
        if max < 0 {
            return Err(GenerationError::invalid("max must not be negative"));
        }
        self.integer(0, max)
    }

    /// A uniform `i32` inside `range`.
    ///
    /// # Errors
    ///
    /// Never fails for a valid range; the `Result` mirrors [`RandomValues::integer`].
    fn integer_in(&mut self, range: &Range<i32>) -> Result<i32, GenerationError> {
        self.integer(range.lower_bound(), range.upper_bound())
    }

    /// A uniform `i64` in `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `lower > upper`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn long(&mut self, lower: i64, upper: i64) -> Result<i64, GenerationError> {
        if lower > upper {
            return Err(inverted_bounds());
        }
        if lower == upper {
            return Ok(lower);
        }
        match upper.checked_sub(lower) {
            Some(span) => {
                let offset = bounded_u64(self, span as u64 + 1);
                Ok(lower + offset as i64)
            }
            None => loop {
                let candidate = self.next_u64() as i64;
                if lower <= candidate && candidate <= upper {
                    return Ok(candidate);
                }
            },
        }
    }

    /// A uniform `i64` inside `range`.
    ///
    /// # Errors
    ///
    /// Never fails for a valid range; the `Result` mirrors [`RandomValues::long`].
    fn long_in(&mut self, range: &Range<i64>) -> Result<i64, GenerationError> {
        self.long(range.lower_bound(), range.upper_bound())
    }

    /// A uniform `f64` in `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `lower > upper`, either
    /// bound is `NaN`, or either bound is infinite.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    fn double(&mut self, lower: f64, upper: f64) -> Result<f64, GenerationError> {
        if !(lower <= upper) {
            return Err(inverted_bounds());
        }
        if !lower.is_finite() || !upper.is_finite() {
            return Err(GenerationError::invalid("double bounds must be finite"));
        }
        if lower == upper {
            return Ok(lower);
        }
        let fraction = self.next_f64();
        let value = fraction * upper + (1.0 - fraction) * lower;
        Ok(value.clamp(lower, upper))
    }

    /// A uniform `f64` inside `range`.
    ///
    /// # Errors
    ///
    /// See [`RandomValues::double`].
    fn double_in(&mut self, range: &Range<f64>) -> Result<f64, GenerationError> {
        self.double(range.lower_bound(), range.upper_bound())
    }

    /// A uniform `f64` in `[lower, upper]` rounded to `scale` decimal digits.
    ///
    /// Rounds half away from zero; if that lands above `upper` the value is
    /// rounded toward zero instead, and toward negative infinity if it is
    /// still above.
    ///
    /// # Errors
    ///
    /// See [`RandomValues::double`].
    fn double_scaled(&mut self, lower: f64, upper: f64, scale: u32) -> Result<f64, GenerationError> {
        let value = self.double(lower, upper)?;
        let factor = 10f64.powi(i32::try_from(scale).unwrap_or(i32::MAX));
        let scaled = value * factor;
        if !scaled.is_finite() {
            return Ok(value);
        }
        let rounded = scaled.round() / factor;
        if rounded <= upper {
            return Ok(rounded);
        }
        let truncated = scaled.trunc() / factor;
        if truncated <= upper {
            return Ok(truncated);
        }
        Ok(scaled.floor() / factor)
    }

    /// A fair coin flip.
    fn boolean(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }

    /// A uniform `i8` in `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `lower > upper`.
    #[allow(clippy::cast_possible_truncation)]
    fn byte(&mut self, lower: i8, upper: i8) -> Result<i8, GenerationError> {
        self.integer(i32::from(lower), i32::from(upper))
            .map(|value| value as i8)
    }

    /// A uniform `i16` in `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `lower > upper`.
    #[allow(clippy::cast_possible_truncation)]
    fn short(&mut self, lower: i16, upper: i16) -> Result<i16, GenerationError> {
        self.integer(i32::from(lower), i32::from(upper))
            .map(|value| value as i16)
    }

    /// `len` raw random bytes.
    fn bytes(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.fill_bytes(&mut buf);
        buf
    }

    /// A uniformly chosen element of `items`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidArgument` if `items` is empty.
    #[allow(clippy::cast_possible_truncation)]
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, GenerationError> {
        if items.is_empty() {
            return Err(GenerationError::invalid("cannot choose from an empty slice"));
        }
        let index = bounded_u64(self, items.len() as u64) as usize;
        Ok(&items[index])
    }
}

impl<S: RandomBitSource + ?Sized> RandomValues for S {}

fn inverted_bounds() -> GenerationError {
    GenerationError::invalid("lower bound must not be greater than upper bound")
}

/// Uniform value in `[0, bound)`; `bound` must be non-zero.
fn bounded_u32<S: RandomBitSource + ?Sized>(source: &mut S, bound: u32) -> u32 {
    // Largest draw that still belongs to a complete block of `bound` values.
    let zone = u32::MAX - (u32::MAX - bound + 1) % bound;
    loop {
        let draw = source.next_u32();
        if draw <= zone {
            return draw % bound;
        }
    }
}

/// Uniform value in `[0, bound)`; `bound` must be non-zero.
fn bounded_u64<S: RandomBitSource + ?Sized>(source: &mut S, bound: u64) -> u64 {
    let zone = u64::MAX - (u64::MAX - bound + 1) % bound;
    loop {
        let draw = source.next_u64();
        if draw <= zone {
            return draw % bound;
        }
    }
}
