//! Container generators: lists, arrays, sets and maps.
//!
//! Every container draws its size from a size range clamped into
//! [`size_envelope`], which keeps a malformed range from requesting an
//! unbounded amount of memory.

use std::collections::{BTreeMap, BTreeSet};

use datagen_core::{GenerationError, RandomBitSource, RandomValues, Range};

use crate::generator::Generator;

/// Largest container any generator will produce.
pub const MAX_SIZE: i32 = 1000;

/// Size bounds every requested size range is clamped into: `[0, MAX_SIZE]`.
#[must_use]
pub fn size_envelope() -> Range<i32> {
    Range::spanning(0, MAX_SIZE)
}

/// Size used when none is requested.
pub const DEFAULT_SIZE: Range<i32> = Range::fixed(15);

/// Consecutive duplicate draws after which a set generator gives up.
pub const MAX_CONSECUTIVE_DUPLICATES: usize = 2000;

fn draw_size(
    size: &Range<i32>,
    source: &mut dyn RandomBitSource,
) -> Result<usize, GenerationError> {
    let size = source.integer_in(size)?;
    usize::try_from(size)
        .map_err(|_| GenerationError::invalid("container size must not be negative"))
}

/// Generates a `Vec` of elements, in generation order.
#[derive(Debug, Clone)]
pub struct ListGenerator<G> {
    element: G,
    size: Range<i32>,
}

impl<G: Generator> ListGenerator<G> {
    /// Creates a list generator; `size` is clamped into [`size_envelope`].
    pub fn new(element: G, size: Range<i32>) -> Self {
        Self {
            element,
            size: size.limit(&size_envelope()),
        }
    }

    /// The effective size range after clamping.
    pub fn size_range(&self) -> Range<i32> {
        self.size
    }
}

impl<G: Generator> Generator for ListGenerator<G> {
    type Output = Vec<G::Output>;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<Self::Output, GenerationError> {
        let size = draw_size(&self.size, source)?;
        (0..size).map(|_| self.element.generate(source)).collect()
    }
}

/// Generates a fixed-length boxed slice of elements.
#[derive(Debug, Clone)]
pub struct ArrayGenerator<G> {
    list: ListGenerator<G>,
}

impl<G: Generator> ArrayGenerator<G> {
    /// Creates an array generator; `size` is clamped into [`size_envelope`].
    pub fn new(element: G, size: Range<i32>) -> Self {
        Self {
            list: ListGenerator::new(element, size),
        }
    }

    /// The effective size range after clamping.
    pub fn size_range(&self) -> Range<i32> {
        self.list.size_range()
    }
}

impl<G: Generator> Generator for ArrayGenerator<G> {
    type Output = Box<[G::Output]>;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<Self::Output, GenerationError> {
        self.list.generate(source).map(Vec::into_boxed_slice)
    }
}

/// Generates a set of exactly the drawn size.
///
/// Duplicates are drawn again. After [`MAX_CONSECUTIVE_DUPLICATES`] misses in
/// a row (or the limit set with [`SetGenerator::with_max_duplicates`]) the
/// generator fails with `GenerationExhausted`, since the element generator's
/// value space is evidently too small for the requested size.
#[derive(Debug, Clone)]
pub struct SetGenerator<G> {
    element: G,
    size: Range<i32>,
    max_duplicates: usize,
}

impl<G> SetGenerator<G>
where
    G: Generator,
    G::Output: Ord,
{
    /// Creates a set generator; `size` is clamped into [`size_envelope`].
    pub fn new(element: G, size: Range<i32>) -> Self {
        Self {
            element,
            size: size.limit(&size_envelope()),
            max_duplicates: MAX_CONSECUTIVE_DUPLICATES,
        }
    }

    /// Overrides the consecutive duplicate limit.
    #[must_use]
    pub fn with_max_duplicates(mut self, max_duplicates: usize) -> Self {
        self.max_duplicates = max_duplicates.max(1);
        self
    }

    /// The effective size range after clamping.
    pub fn size_range(&self) -> Range<i32> {
        self.size
    }
}

impl<G> Generator for SetGenerator<G>
where
    G: Generator,
    G::Output: Ord,
{
    type Output = BTreeSet<G::Output>;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<Self::Output, GenerationError> {
        let requested = draw_size(&self.size, source)?;
        let mut set = BTreeSet::new();
        let mut misses = 0;
        while set.len() < requested {
            if set.insert(self.element.generate(source)?) {
                misses = 0;
                continue;
            }
            misses += 1;
            tracing::trace!(misses, requested, found = set.len(), "duplicate set element");
            if misses >= self.max_duplicates {
                tracing::warn!(
                    requested,
                    found = set.len(),
                    misses,
                    "giving up on unique set generation"
                );
                return Err(GenerationError::GenerationExhausted { requested, misses });
            }
        }
        Ok(set)
    }
}

/// Generates a map with at most the drawn number of entries.
///
/// One key/value pair is generated per requested entry; colliding keys
/// overwrite earlier values, so the map may come out smaller than requested.
#[derive(Debug, Clone)]
pub struct MapGenerator<K, V> {
    keys: K,
    values: V,
    size: Range<i32>,
}

impl<K, V> MapGenerator<K, V>
where
    K: Generator,
    K::Output: Ord,
    V: Generator,
{
    /// Creates a map generator; `size` is clamped into [`size_envelope`].
    pub fn new(keys: K, values: V, size: Range<i32>) -> Self {
        Self {
            keys,
            values,
            size: size.limit(&size_envelope()),
        }
    }

    /// The effective size range after clamping.
    pub fn size_range(&self) -> Range<i32> {
        self.size
    }
}

impl<K, V> Generator for MapGenerator<K, V>
where
    K: Generator,
    K::Output: Ord,
    V: Generator,
{
    type Output = BTreeMap<K::Output, V::Output>;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<Self::Output, GenerationError> {
        let requested = draw_size(&self.size, source)?;
        let mut map = BTreeMap::new();
        for _ in 0..requested {
            let key = self.keys.generate(source)?;
            let value = self.values.generate(source)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}
