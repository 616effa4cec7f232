//! Time sources
//!
//! Every "now"-relative operation reads the wall clock through a [`Clock`] so
//! callers can pin time in tests instead of racing the system clock.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the operating system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that returns a settable instant
///
/// Clones share the same instant, so a test can keep a handle and advance
/// time after handing the clock to a formatter.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
        }
    }

    /// Build a clock from epoch milliseconds, falling back to the epoch when out of range
    pub fn from_millis(millis: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }

    /// Move the clock to a new instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.guard() = instant;
    }

    /// Move the clock forward (or backward for negative durations)
    pub fn advance(&self, by: Duration) {
        *self.guard() += by;
    }

    // A poisoned lock still holds a whole instant
    fn guard(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.guard()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_shared_between_clones() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 6, 0, 0).unwrap());
        let handle = clock.clone();

        handle.advance(Duration::minutes(5));
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 3, 15, 6, 5, 0).unwrap());

        handle.set(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(clock.now().timestamp(), 1_577_836_800);
    }

    #[test]
    fn test_fixed_clock_survives_poisoned_lock() {
        let clock = FixedClock::from_millis(1_000);
        let handle = clock.clone();
        let result = std::thread::spawn(move || {
            let _guard = handle.instant.lock().unwrap();
            panic!("poison the clock");
        })
        .join();
        assert!(result.is_err());
        assert!(clock.instant.is_poisoned());

        assert_eq!(clock.now().timestamp(), 1);
        clock.advance(Duration::seconds(9));
        assert_eq!(clock.now().timestamp(), 10);
        clock.set(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(clock.now().timestamp(), 1_577_836_800);
    }

    #[test]
    fn test_fixed_clock_from_millis() {
        let clock = FixedClock::from_millis(1_700_000_000_123);
        assert_eq!(clock.now().timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_clock_through_reference_and_arc() {
        fn read<C: Clock>(clock: C) -> i64 {
            clock.now().timestamp()
        }

        let clock = FixedClock::from_millis(42_000);
        assert_eq!(read(&clock), 42);

        let shared: Arc<dyn Clock> = Arc::new(clock);
        assert_eq!(read(shared), 42);
    }
}
