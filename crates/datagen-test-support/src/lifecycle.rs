//! Seed lifecycle glue: run test units under a pinned or fresh seed and
//! report that seed when they fail.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use datagen_core::Seed;
use datagen_core::clock::{Clock, SystemClock};
use datagen_core::context::SeedScope;
use thiserror::Error;

/// A failed test unit together with the seed that reproduces it.
#[derive(Debug, Error)]
#[error("failed with seed {seed}: {source}")]
pub struct SeededFailure<E>
where
    E: std::error::Error + 'static,
{
    /// The seed that was active when the unit failed.
    pub seed: Seed,
    /// The unit's own error.
    #[source]
    pub source: E,
}

/// Runs `test` with `seed` pushed, or a fresh clock-derived seed when `None`.
///
/// If `test` panics, the seed is logged and appended to the panic message
/// before the panic continues. The seed is popped either way.
pub fn reproducible<R>(seed: Option<Seed>, test: impl FnOnce() -> R) -> R {
    reproducible_with_clock(seed, &SystemClock, test)
}

/// Like [`reproducible`], deriving a missing seed from `clock`.
pub fn reproducible_with_clock<R>(
    seed: Option<Seed>,
    clock: &dyn Clock,
    test: impl FnOnce() -> R,
) -> R {
    let scope = SeedScope::enter(seed.unwrap_or_else(|| clock.seed()));
    match panic::catch_unwind(AssertUnwindSafe(test)) {
        Ok(value) => value,
        Err(payload) => {
            let seed = scope.seed();
            drop(scope);
            tracing::error!(seed, "test failed; rerun with this seed to reproduce");
            panic::resume_unwind(Box::new(format!(
                "{} (seed: {seed})",
                PanicMessage(payload.as_ref())
            )))
        }
    }
}

/// Runs a fallible `test` under `seed` (or a fresh one), attaching the seed to
/// its error.
///
/// # Errors
///
/// Returns `SeededFailure` wrapping the error `test` returned.
pub fn reproducible_result<T, E>(
    seed: Option<Seed>,
    test: impl FnOnce() -> Result<T, E>,
) -> Result<T, SeededFailure<E>>
where
    E: std::error::Error + 'static,
{
    let scope = SeedScope::enter(seed.unwrap_or_else(|| SystemClock.seed()));
    test().map_err(|source| {
        tracing::error!(
            seed = scope.seed(),
            error = %source,
            "test failed; rerun with this seed to reproduce"
        );
        SeededFailure {
            seed: scope.seed(),
            source,
        }
    })
}

/// Runs every unit under the same pinned seed, each starting from a freshly
/// pushed copy so units do not depend on each other's draws.
pub fn reproducible_group<F>(seed: Seed, units: impl IntoIterator<Item = F>)
where
    F: FnOnce(),
{
    for unit in units {
        reproducible(Some(seed), unit);
    }
}

struct PanicMessage<'a>(&'a (dyn Any + Send));

impl fmt::Display for PanicMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(message) = self.0.downcast_ref::<&str>() {
            f.write_str(message)
        } else if let Some(message) = self.0.downcast_ref::<String>() {
            f.write_str(message)
        } else {
            f.write_str("test panicked")
        }
    }
}
