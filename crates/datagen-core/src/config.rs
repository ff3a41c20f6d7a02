//! Root seed configuration.

use crate::clock::Clock;
use crate::seed::Seed;

/// Environment variable that pins the root seed of every new context.
pub const SEED_ENV_VAR: &str = "DATAGEN_SEED";

/// How a context chooses its root seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedConfig {
    /// Explicit root seed; `None` derives one from the clock.
    pub root_seed: Option<Seed>,
}

impl SeedConfig {
    /// Reads [`SEED_ENV_VAR`] from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(SEED_ENV_VAR).ok().as_deref())
    }

    /// Parses a raw override. Unparseable values are ignored.
    #[must_use]
    pub fn from_value(raw: Option<&str>) -> Self {
        let root_seed = raw.and_then(|value| match value.trim().parse::<Seed>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                tracing::warn!(value, error = %e, "ignoring unparseable root seed override");
                None
            }
        });
        Self { root_seed }
    }

    /// The configured seed, or one derived from `clock`.
    #[must_use]
    pub fn resolve_root(&self, clock: &dyn Clock) -> Seed {
        self.root_seed.unwrap_or_else(|| clock.seed())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    struct Epoch;

    impl Clock for Epoch {
        fn now(&self) -> DateTime<Utc> {
            Utc.timestamp_millis_opt(1_234).unwrap()
        }
    }

    #[test]
    fn test_parses_explicit_seed() {
        assert_eq!(SeedConfig::from_value(Some("-42")).root_seed, Some(-42));
        assert_eq!(SeedConfig::from_value(Some(" 7 ")).root_seed, Some(7));
    }

    #[test]
    fn test_ignores_garbage() {
        assert_eq!(SeedConfig::from_value(Some("forty-two")).root_seed, None);
        assert_eq!(SeedConfig::from_value(None).root_seed, None);
    }

    #[test]
    fn test_resolve_root_prefers_explicit_seed() {
        let config = SeedConfig { root_seed: Some(5) };
        assert_eq!(config.resolve_root(&Epoch), 5);
    }

    #[test]
    fn test_resolve_root_falls_back_to_clock_millis() {
        assert_eq!(SeedConfig::default().resolve_root(&Epoch), 1_234);
    }
}
