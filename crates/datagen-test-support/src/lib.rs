//! Shared test doubles and seed lifecycle helpers for datagen.

mod bit_source;
mod clock;
mod lifecycle;

pub use bit_source::{SequenceBitSource, ZeroBitSource};
pub use clock::FixedClock;
pub use lifecycle::{
    SeededFailure, reproducible, reproducible_group, reproducible_result, reproducible_with_clock,
};
