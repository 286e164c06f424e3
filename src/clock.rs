//! Time sources for history timestamps.
//!
//! A history never reads the wall clock directly: it asks the [`Clock`] it
//! was built with. Production code uses [`SystemClock`]; tests swap in a
//! [`FixedClock`] or [`SteppedClock`] to get deterministic timestamps.

use chrono::{DateTime, Duration, Local, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of the current time.
///
/// Implementations are not required to be monotonic.
///
/// # Example
///
/// ```rust
/// use statelog::clock::{Clock, FixedClock};
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let clock = FixedClock::new(instant);
///
/// assert_eq!(clock.now_utc(), instant);
/// assert_eq!(clock.now_utc(), instant);
/// ```
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current time in the local time zone.
    fn now(&self) -> DateTime<Local> {
        self.now_utc().with_timezone(&Local)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }

    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }

    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

/// The wall clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock that advances by a fixed step every time it is read.
///
/// The first read returns `start`, the second `start + step`, and so on.
/// Reads through [`Clock::now`] advance it too.
///
/// # Example
///
/// ```rust
/// use statelog::clock::{Clock, SteppedClock};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let clock = SteppedClock::new(start, Duration::minutes(5));
///
/// assert_eq!(clock.now_utc(), start);
/// assert_eq!(clock.now_utc(), start + Duration::minutes(5));
/// assert_eq!(clock.reads(), 2);
/// ```
#[derive(Debug)]
pub struct SteppedClock {
    start: DateTime<Utc>,
    step: Duration,
    ticks: AtomicU64,
}

impl SteppedClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            start,
            step,
            ticks: AtomicU64::new(0),
        }
    }

    /// Number of times the clock has been read.
    pub fn reads(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Clock for SteppedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        // Saturates at the end of chrono's range.
        i32::try_from(tick)
            .ok()
            .and_then(|tick| self.step.checked_mul(tick))
            .and_then(|offset| self.start.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
