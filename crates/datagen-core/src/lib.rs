//! Datagen Core: reproducible random values.
//!
//! This crate defines the primitives every generator is built on: the
//! bounded [`range::Range`], the reseedable [`bit_source::RandomBitSource`],
//! the bias-free [`random_values::RandomValues`] arithmetic and the
//! per-thread seed stack exposed through [`context`].

pub mod bit_source;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod random_values;
pub mod range;
pub mod seed;

pub use bit_source::{RandomBitSource, StdBitSource};
pub use error::GenerationError;
pub use random_values::RandomValues;
pub use range::Range;
pub use seed::{Seed, SeedStack};
