//! Fluent construction of histories.

use crate::clock::{Clock, SystemClock};
use crate::core::{ordered, HistoryEntry, HistoryError, TransitionHistory};
use tracing::warn;
use uuid::Uuid;

/// Builder for [`TransitionHistory`].
///
/// # Example
///
/// ```rust
/// use statelog::builder::HistoryBuilder;
/// use statelog::clock::FixedClock;
/// use statelog::core::TransitionRecord;
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let sid = Uuid::new_v4();
/// let history = HistoryBuilder::<TransitionRecord>::new()
///     .clock(FixedClock::new(Utc::now()))
///     .sid(sid)
///     .version(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(history.sid(), sid);
/// assert_eq!(history.version(), 2);
/// assert!(history.is_empty());
/// ```
#[derive(Debug)]
pub struct HistoryBuilder<E, C = SystemClock> {
    clock: C,
    sid: Uuid,
    version: i32,
    entries: Vec<E>,
}

impl<E: HistoryEntry> HistoryBuilder<E, SystemClock> {
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            sid: Uuid::nil(),
            version: 0,
            entries: Vec::new(),
        }
    }
}

impl<E: HistoryEntry> Default for HistoryBuilder<E, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HistoryEntry, C: Clock> HistoryBuilder<E, C> {
    /// Timestamp appended entries with `clock` instead of the current one.
    pub fn clock<D: Clock>(self, clock: D) -> HistoryBuilder<E, D> {
        HistoryBuilder {
            clock,
            sid: self.sid,
            version: self.version,
            entries: self.entries,
        }
    }

    pub fn sid(mut self, sid: Uuid) -> Self {
        self.sid = sid;
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Start from existing entries, in any order.
    pub fn entries(mut self, entries: Vec<E>) -> Self {
        self.entries = entries;
        self
    }

    /// Build the history.
    ///
    /// Fails if the starting entries contain duplicate or zero sequence numbers.
    pub fn build(self) -> Result<TransitionHistory<E, C>, HistoryError> {
        let entries = ordered(self.entries).inspect_err(|violation| {
            warn!(%violation, sid = %self.sid, "rejected starting history entries");
        })?;

        Ok(TransitionHistory::from_ordered(
            entries,
            self.clock,
            self.sid,
            self.version,
        ))
    }
}
