//! Datagen Generators: composable value generators.
//!
//! A [`Generator`] produces one value per call from a bit source. The
//! [`factory`] module builds generators for primitives, strings, dates and
//! containers; [`charset`] builds the code point palettes strings draw from.

pub mod charset;
pub mod containers;
pub mod factory;
pub mod generator;

pub use charset::{CharacterFilter, CharacterSetGenerator};
pub use generator::{BoxedGenerator, Generator, from_fn};
