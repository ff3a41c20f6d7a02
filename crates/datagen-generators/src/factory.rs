//! Factory functions for the common generators.
//!
//! Numeric factories without a range cover the type's whole domain;
//! containers and strings without a size produce [`DEFAULT_SIZE`] elements.
//!
//! ```
//! use datagen_core::Range;
//! use datagen_core::context::with_seed;
//! use datagen_generators::Generator;
//! use datagen_generators::factory;
//!
//! let ages = factory::list_sized(factory::integers_in(Range::closed(18, 80)?), Range::fixed(3));
//! let first = with_seed(42, || ages.next())?;
//! let again = with_seed(42, || ages.next())?;
//! assert_eq!(first, again);
//! # Ok::<(), datagen_core::GenerationError>(())
//! ```

use chrono::{Datelike, NaiveDate};
use datagen_core::{GenerationError, RandomBitSource, RandomValues, Range};
use uuid::{Builder, Uuid};

use crate::charset::CharacterSetGenerator;
pub use crate::containers::DEFAULT_SIZE;
use crate::containers::{
    ArrayGenerator, ListGenerator, MapGenerator, SetGenerator, size_envelope,
};
use crate::generator::{Generator, from_fn};

// --- numbers ---

/// Any `i32`.
pub fn integers() -> impl Generator<Output = i32> {
    integers_in(Range::spanning(i32::MIN, i32::MAX))
}

/// An `i32` inside `range`.
pub fn integers_in(range: Range<i32>) -> impl Generator<Output = i32> {
    from_fn(move |source| source.integer_in(&range))
}

/// Any `i64`.
pub fn longs() -> impl Generator<Output = i64> {
    longs_in(Range::spanning(i64::MIN, i64::MAX))
}

/// An `i64` inside `range`.
pub fn longs_in(range: Range<i64>) -> impl Generator<Output = i64> {
    from_fn(move |source| source.long_in(&range))
}

/// Any finite `f64`.
pub fn doubles() -> impl Generator<Output = f64> {
    from_fn(|source| source.double(f64::MIN, f64::MAX))
}

/// An `f64` inside `range`. Infinite bounds fail at generation time.
pub fn doubles_in(range: Range<f64>) -> impl Generator<Output = f64> {
    from_fn(move |source| source.double_in(&range))
}

/// An `f64` inside `range` rounded to `scale` decimal digits.
pub fn doubles_scaled(range: Range<f64>, scale: u32) -> impl Generator<Output = f64> {
    from_fn(move |source| source.double_scaled(range.lower_bound(), range.upper_bound(), scale))
}

/// Fair coin flips.
pub fn booleans() -> impl Generator<Output = bool> {
    from_fn(|source| Ok(source.boolean()))
}

/// Any `i8`.
pub fn bytes() -> impl Generator<Output = i8> {
    bytes_in(Range::spanning(i8::MIN, i8::MAX))
}

/// An `i8` inside `range`.
pub fn bytes_in(range: Range<i8>) -> impl Generator<Output = i8> {
    from_fn(move |source| source.byte(range.lower_bound(), range.upper_bound()))
}

/// Any `i16`.
pub fn shorts() -> impl Generator<Output = i16> {
    shorts_in(Range::spanning(i16::MIN, i16::MAX))
}

/// An `i16` inside `range`.
pub fn shorts_in(range: Range<i16>) -> impl Generator<Output = i16> {
    from_fn(move |source| source.short(range.lower_bound(), range.upper_bound()))
}

/// Raw byte buffers; `length` is clamped like a container size.
pub fn byte_arrays(length: Range<i32>) -> impl Generator<Output = Vec<u8>> {
    let length = length.limit(&size_envelope());
    from_fn(move |source| {
        let len = usize::try_from(source.integer_in(&length)?)
            .map_err(|_| GenerationError::invalid("length must not be negative"))?;
        Ok(source.bytes(len))
    })
}

// --- text ---

/// Generates strings drawn from a character palette.
#[derive(Debug, Clone)]
pub struct StringGenerator {
    palette: CharacterSetGenerator,
    length: Range<i32>,
}

impl StringGenerator {
    /// The effective length range after clamping.
    #[must_use]
    pub fn length_range(&self) -> Range<i32> {
        self.length
    }
}

impl Generator for StringGenerator {
    type Output = String;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<String, GenerationError> {
        let len = source.integer_in(&self.length)?;
        (0..len).map(|_| self.palette.random_char(source)).collect()
    }
}

/// Single characters from `palette`.
///
/// # Errors
///
/// Returns `GenerationError::InvalidArgument` if `palette` is empty.
pub fn characters(
    palette: CharacterSetGenerator,
) -> Result<CharacterSetGenerator, GenerationError> {
    if palette.is_empty() {
        return Err(GenerationError::invalid("character set is empty"));
    }
    Ok(palette)
}

/// Strings of `length` characters taken from `palette`.
///
/// # Errors
///
/// Returns `GenerationError::InvalidArgument` if `palette` is empty.
pub fn strings(
    palette: CharacterSetGenerator,
    length: Range<i32>,
) -> Result<StringGenerator, GenerationError> {
    if palette.is_empty() {
        return Err(GenerationError::invalid("character set is empty"));
    }
    Ok(StringGenerator {
        palette,
        length: length.limit(&size_envelope()),
    })
}

/// ASCII letter-and-digit strings of [`DEFAULT_SIZE`] characters.
#[must_use]
pub fn alphanumeric_strings() -> StringGenerator {
    StringGenerator {
        palette: CharacterSetGenerator::ascii_alphanumeric(),
        length: DEFAULT_SIZE,
    }
}

// --- dates and identifiers ---

/// Every date `chrono` can represent.
#[must_use]
pub fn date_envelope() -> Range<NaiveDate> {
    Range::spanning(NaiveDate::MIN, NaiveDate::MAX)
}

/// Any representable date.
pub fn dates() -> impl Generator<Output = NaiveDate> {
    dates_in(date_envelope())
}

/// A date inside `range`, clamped into [`date_envelope`].
pub fn dates_in(range: Range<NaiveDate>) -> impl Generator<Output = NaiveDate> {
    let range = range.limit(&date_envelope());
    let days = Range::spanning(
        range.lower_bound().num_days_from_ce(),
        range.upper_bound().num_days_from_ce(),
    );
    from_fn(move |source| {
        let day = source.integer_in(&days)?;
        NaiveDate::from_num_days_from_ce_opt(day)
            .ok_or_else(|| GenerationError::invalid(format!("day {day} is not a valid date")))
    })
}

/// Random version 4 UUIDs.
pub fn uuids() -> impl Generator<Output = Uuid> {
    from_fn(|source| {
        let mut bytes = [0u8; 16];
        source.fill_bytes(&mut bytes);
        Ok(Builder::from_random_bytes(bytes).into_uuid())
    })
}

// --- choices ---

/// One of `values`, uniformly.
///
/// # Errors
///
/// Returns `GenerationError::InvalidArgument` if `values` is empty.
pub fn one_of<T: Clone>(values: Vec<T>) -> Result<impl Generator<Output = T>, GenerationError> {
    if values.is_empty() {
        return Err(GenerationError::invalid("one_of requires at least one value"));
    }
    Ok(from_fn(move |source| source.choose(&values).cloned()))
}

/// Always `value`.
pub fn constant<T: Clone>(value: T) -> impl Generator<Output = T> {
    from_fn(move |_| Ok(value.clone()))
}

// --- containers ---

/// Lists of [`DEFAULT_SIZE`] elements.
pub fn list<G: Generator>(element: G) -> ListGenerator<G> {
    list_sized(element, DEFAULT_SIZE)
}

/// Lists whose length is drawn from `size`, clamped into `[0, 1000]`.
pub fn list_sized<G: Generator>(element: G, size: Range<i32>) -> ListGenerator<G> {
    ListGenerator::new(element, size)
}

/// Arrays of [`DEFAULT_SIZE`] elements.
pub fn array<G: Generator>(element: G) -> ArrayGenerator<G> {
    array_sized(element, DEFAULT_SIZE)
}

/// Arrays whose length is drawn from `size`, clamped into `[0, 1000]`.
pub fn array_sized<G: Generator>(element: G, size: Range<i32>) -> ArrayGenerator<G> {
    ArrayGenerator::new(element, size)
}

/// Sets of [`DEFAULT_SIZE`] unique elements.
pub fn set<G>(element: G) -> SetGenerator<G>
where
    G: Generator,
    G::Output: Ord,
{
    set_sized(element, DEFAULT_SIZE)
}

/// Sets of exactly the size drawn from `size`, clamped into `[0, 1000]`.
pub fn set_sized<G>(element: G, size: Range<i32>) -> SetGenerator<G>
where
    G: Generator,
    G::Output: Ord,
{
    SetGenerator::new(element, size)
}

/// Maps of up to [`DEFAULT_SIZE`] entries.
pub fn map<K, V>(keys: K, values: V) -> MapGenerator<K, V>
where
    K: Generator,
    K::Output: Ord,
    V: Generator,
{
    map_sized(keys, values, DEFAULT_SIZE)
}

/// Maps of up to the size drawn from `size`, clamped into `[0, 1000]`.
pub fn map_sized<K, V>(keys: K, values: V, size: Range<i32>) -> MapGenerator<K, V>
where
    K: Generator,
    K::Output: Ord,
    V: Generator,
{
    MapGenerator::new(keys, values, size)
}
