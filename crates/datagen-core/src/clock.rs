//! Clock abstraction used to derive root seeds.

use chrono::{DateTime, Utc};

use crate::seed::Seed;

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Derives a seed from the current time (milliseconds since the epoch).
    fn seed(&self) -> Seed {
        self.now().timestamp_millis()
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
