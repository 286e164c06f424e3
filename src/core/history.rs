//! State transition history tracking.
//!
//! A [`TransitionHistory`] is an append-only log of entries. The history
//! assigns every entry its sequence number and timestamp, so callers can
//! only ever add to the end of the log.

use super::entry::{check_codes, EntryStamp, HistoryEntry, TransitionRecord};
use super::error::{HistoryError, InvariantViolation};
use super::state::{Reason, State};
use crate::clock::{Clock, SystemClock};
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Ordered log of state transitions.
///
/// Entries are kept sorted by sequence number. The first appended entry is
/// number 1 and every following entry is one more than the most recent.
///
/// `sid` and `version` are carried for whatever persists the history; the
/// history itself never reads them.
///
/// # Example
///
/// ```rust
/// use statelog::core::{HistoryEntry, ReasonCode, StateCode, TransitionHistory};
///
/// let mut history = TransitionHistory::new();
///
/// history
///     .append(&StateCode::from("Draft"), &ReasonCode::from("Created"), None)
///     .unwrap();
/// history
///     .append(
///         &StateCode::from("Review"),
///         &ReasonCode::from("Submitted"),
///         Some("ready"),
///     )
///     .unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.initial_entry().unwrap().state_code(), "Draft");
///
/// let current = history.most_recent_entry().unwrap();
/// assert_eq!(current.sequence_number(), 2);
/// assert_eq!(current.comment(), Some("ready"));
/// ```
#[derive(Clone, Debug)]
pub struct TransitionHistory<E, C = SystemClock> {
    entries: Vec<E>,
    clock: C,
    sid: Uuid,
    version: i32,
}

impl<E: HistoryEntry> Default for TransitionHistory<E, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HistoryEntry> TransitionHistory<E, SystemClock> {
    /// Create an empty history timestamped by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<E: HistoryEntry, C: Clock> TransitionHistory<E, C> {
    /// Create an empty history timestamped by `clock`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statelog::clock::FixedClock;
    /// use statelog::core::{HistoryEntry, ReasonCode, StateCode, TransitionHistory};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    /// let mut history = TransitionHistory::with_clock(FixedClock::new(instant));
    ///
    /// let record = history
    ///     .append(&StateCode::from("Open"), &ReasonCode::from("Filed"), None)
    ///     .unwrap();
    /// assert_eq!(record.timestamp(), instant);
    /// ```
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: Vec::new(),
            clock,
            sid: Uuid::nil(),
            version: 0,
        }
    }

    /// Assemble a history from entries already put in order by [`ordered`].
    pub(crate) fn from_ordered(entries: Vec<E>, clock: C, sid: Uuid, version: i32) -> Self {
        Self {
            entries,
            clock,
            sid,
            version,
        }
    }

    /// All entries, ascending by sequence number.
    ///
    /// The slice is a read-only view; use `to_vec()` for a copy that can be
    /// modified without touching the history.
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    /// Consume the history, returning its entries in order.
    pub fn into_entries(self) -> Vec<E> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry with the lowest sequence number, or `None` for an empty history.
    pub fn initial_entry(&self) -> Option<&E> {
        self.entries.first()
    }

    /// The entry with the highest sequence number, or `None` for an empty history.
    pub fn most_recent_entry(&self) -> Option<&E> {
        self.entries.last()
    }

    /// Look up an entry by its sequence number.
    pub fn entry(&self, sequence_number: u64) -> Option<&E> {
        self.entries
            .binary_search_by_key(&sequence_number, HistoryEntry::sequence_number)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Time elapsed between the initial and the most recent entry.
    ///
    /// Returns `None` if there are no entries, or if the most recent entry
    /// is timestamped before the initial one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statelog::clock::SteppedClock;
    /// use statelog::core::{ReasonCode, StateCode, TransitionHistory};
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let mut history =
    ///     TransitionHistory::with_clock(SteppedClock::new(start, Duration::minutes(10)));
    /// assert!(history.duration().is_none());
    ///
    /// history
    ///     .append(&StateCode::from("Open"), &ReasonCode::from("Filed"), None)
    ///     .unwrap();
    /// history
    ///     .append(&StateCode::from("Closed"), &ReasonCode::from("Fixed"), None)
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     history.duration(),
    ///     Some(std::time::Duration::from_secs(600))
    /// );
    /// ```
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.initial_entry()?, self.most_recent_entry()?);
        last.timestamp()
            .signed_duration_since(first.timestamp())
            .to_std()
            .ok()
    }

    /// Sequence number the next appended entry will get.
    pub(crate) fn next_sequence_number(&self) -> Result<u64, HistoryError> {
        match self.most_recent_entry() {
            None => Ok(1),
            Some(entry) => entry
                .sequence_number()
                .checked_add(1)
                .ok_or_else(|| InvariantViolation::SequenceExhausted.into()),
        }
    }

    /// Append an entry built by `build`.
    ///
    /// `build` receives the sequence number and timestamp the history
    /// assigned, and must return an entry carrying both unchanged. An error
    /// from `build` is returned as is and nothing is recorded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statelog::core::{EntryStamp, HistoryEntry, TransitionHistory};
    /// use chrono::{DateTime, Utc};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Clone, Debug, Serialize, Deserialize)]
    /// struct Approval {
    ///     stamp: EntryStamp,
    ///     approver: String,
    /// }
    ///
    /// impl HistoryEntry for Approval {
    ///     fn sequence_number(&self) -> u64 {
    ///         self.stamp.sequence_number
    ///     }
    ///
    ///     fn timestamp(&self) -> DateTime<Utc> {
    ///         self.stamp.timestamp
    ///     }
    /// }
    ///
    /// let mut history = TransitionHistory::new();
    /// let approval = history
    ///     .append_with(|stamp| {
    ///         Ok(Approval {
    ///             stamp,
    ///             approver: "ops".to_string(),
    ///         })
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(approval.sequence_number(), 1);
    /// ```
    pub fn append_with<F>(&mut self, build: F) -> Result<&E, HistoryError>
    where
        F: FnOnce(EntryStamp) -> Result<E, HistoryError>,
    {
        let stamp = EntryStamp::new(self.next_sequence_number()?, self.clock.now_utc());
        let entry = build(stamp)?;

        if entry.sequence_number() != stamp.sequence_number {
            return Err(InvariantViolation::SequenceMismatch {
                expected: stamp.sequence_number,
                found: entry.sequence_number(),
            }
            .into());
        }
        if entry.timestamp() != stamp.timestamp {
            return Err(InvariantViolation::TimestampMismatch {
                sequence_number: stamp.sequence_number,
            }
            .into());
        }

        let index = self.entries.len();
        self.entries.push(entry);
        Ok(&self.entries[index])
    }

    /// Replace every entry, e.g. when rehydrating from storage.
    ///
    /// Entries may be given in any order; they are sorted by sequence
    /// number. Duplicate or zero sequence numbers are rejected and the
    /// current entries are left untouched.
    pub fn replace_entries(&mut self, entries: Vec<E>) -> Result<(), HistoryError> {
        let entries = ordered(entries).inspect_err(|violation| {
            warn!(%violation, "rejected history entry replacement");
        })?;

        debug!(count = entries.len(), sid = %self.sid, "replaced history entries");
        self.entries = entries;
        Ok(())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Surrogate id assigned by the persistence layer.
    pub fn sid(&self) -> Uuid {
        self.sid
    }

    pub fn set_sid(&mut self, sid: Uuid) {
        self.sid = sid;
    }

    /// Persistence version assigned by the persistence layer.
    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn set_version(&mut self, version: i32) {
        self.version = version;
    }
}

impl<C: Clock> TransitionHistory<TransitionRecord, C> {
    /// Record that `state` was entered because of `reason`.
    ///
    /// Blank state or reason codes are rejected with
    /// [`HistoryError::InvalidArgument`] and nothing is recorded.
    pub fn append(
        &mut self,
        state: &impl State,
        reason: &impl Reason,
        comment: Option<&str>,
    ) -> Result<&TransitionRecord, HistoryError> {
        check_codes(state, reason)?;

        let record =
            self.append_with(|stamp| TransitionRecord::new(stamp, state, reason, comment))?;
        debug!(
            sequence_number = record.sequence_number(),
            state_code = record.state_code(),
            reason_code = record.reason_code(),
            "recorded transition"
        );
        Ok(record)
    }

    /// Code of the state entered most recently.
    pub fn current_state_code(&self) -> Option<&str> {
        self.most_recent_entry().map(TransitionRecord::state_code)
    }

    /// Codes of the states entered, in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statelog::core::{ReasonCode, StateCode, TransitionHistory};
    ///
    /// let mut history = TransitionHistory::new();
    /// for state in ["Open", "InProgress", "Closed"] {
    ///     history
    ///         .append(&StateCode::from(state), &ReasonCode::from("Moved"), None)
    ///         .unwrap();
    /// }
    ///
    /// assert_eq!(history.state_path(), vec!["Open", "InProgress", "Closed"]);
    /// ```
    pub fn state_path(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(TransitionRecord::state_code)
            .collect()
    }
}

/// Sort entries by sequence number and check that the numbers are usable.
pub(crate) fn ordered<E: HistoryEntry>(mut entries: Vec<E>) -> Result<Vec<E>, InvariantViolation> {
    entries.sort_by_key(HistoryEntry::sequence_number);

    if entries.first().is_some_and(|entry| entry.sequence_number() == 0) {
        return Err(InvariantViolation::ZeroSequenceNumber);
    }
    if let Some(pair) = entries
        .windows(2)
        .find(|pair| pair[0].sequence_number() == pair[1].sequence_number())
    {
        return Err(InvariantViolation::DuplicateSequenceNumber(
            pair[0].sequence_number(),
        ));
    }

    Ok(entries)
}
