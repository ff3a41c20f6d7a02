//! The `Generator` capability and its adapters.

use datagen_core::context;
use datagen_core::{GenerationError, RandomBitSource};

/// Produces a value of type [`Generator::Output`] on demand.
///
/// Implementations draw all randomness from the source they are handed, so
/// two generators built the same way and driven by sources reseeded to the
/// same seed yield the same sequence.
pub trait Generator {
    /// The generated type.
    type Output;

    /// Generates one value from `source`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the generator's configuration cannot be
    /// satisfied (for example an exhausted unique container).
    fn generate(
        &self,
        source: &mut dyn RandomBitSource,
    ) -> Result<Self::Output, GenerationError>;

    /// Generates one value from the calling thread's seed context.
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    ///
    /// # Panics
    ///
    /// Panics if called from inside another generator's `generate`; compose
    /// generators through `generate` instead.
    fn next(&self) -> Result<Self::Output, GenerationError> {
        context::with_source(|source| self.generate(source))
    }

    /// Generates `count` values from the calling thread's seed context.
    ///
    /// # Errors
    ///
    /// Stops at the first failing value; see [`Generator::generate`].
    fn take(&self, count: usize) -> Result<Vec<Self::Output>, GenerationError> {
        context::with_source(|source| (0..count).map(|_| self.generate(source)).collect())
    }

    /// Transforms every generated value with `f`.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { inner: self, f }
    }

    /// Erases the concrete generator type.
    fn boxed<'a>(self) -> BoxedGenerator<'a, Self::Output>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

/// A type-erased generator.
pub type BoxedGenerator<'a, T> = Box<dyn Generator<Output = T> + 'a>;

impl<G: Generator + ?Sized> Generator for Box<G> {
    type Output = G::Output;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<G::Output, GenerationError> {
        (**self).generate(source)
    }
}

impl<G: Generator + ?Sized> Generator for &G {
    type Output = G::Output;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<G::Output, GenerationError> {
        (**self).generate(source)
    }
}

/// Generator backed by a closure. Built with [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnGenerator<F> {
    f: F,
}

/// Wraps a closure drawing from a bit source as a [`Generator`].
pub fn from_fn<T, F>(f: F) -> FnGenerator<F>
where
    F: Fn(&mut dyn RandomBitSource) -> Result<T, GenerationError>,
{
    FnGenerator { f }
}

impl<T, F> Generator for FnGenerator<F>
where
    F: Fn(&mut dyn RandomBitSource) -> Result<T, GenerationError>,
{
    type Output = T;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<T, GenerationError> {
        (self.f)(source)
    }
}

/// Generator returned by [`Generator::map`].
#[derive(Debug, Clone, Copy)]
pub struct Map<G, F> {
    inner: G,
    f: F,
}

impl<G, F, U> Generator for Map<G, F>
where
    G: Generator,
    F: Fn(G::Output) -> U,
{
    type Output = U;

    fn generate(&self, source: &mut dyn RandomBitSource) -> Result<U, GenerationError> {
        self.inner.generate(source).map(&self.f)
    }
}
