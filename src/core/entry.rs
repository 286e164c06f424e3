//! History entries.
//!
//! A history is generic over its entry type. Every entry carries the
//! sequence number and timestamp the history stamped it with; anything else
//! it carries is up to the entry type. [`TransitionRecord`] is the shape used
//! by the convenience `append` on [`TransitionHistory`](super::TransitionHistory).

use super::error::HistoryError;
use super::state::{Reason, State};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// An entry that can be stored in a [`TransitionHistory`](super::TransitionHistory).
///
/// Entries are values: once appended they are never mutated, so both
/// accessors must keep returning what the entry was built with.
pub trait HistoryEntry: Clone + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Position of this entry in its history, starting at 1.
    fn sequence_number(&self) -> u64;

    /// When the entry was appended.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Sequence number and timestamp assigned by a history to a new entry.
///
/// Passed to the record factory given to
/// [`append_with`](super::TransitionHistory::append_with).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStamp {
    pub sequence_number: u64,
    pub timestamp: DateTime<Utc>,
}

impl EntryStamp {
    pub fn new(sequence_number: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            sequence_number,
            timestamp,
        }
    }
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use statelog::core::{EntryStamp, HistoryEntry, ReasonCode, StateCode, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord::new(
///     EntryStamp::new(1, Utc::now()),
///     &StateCode::from("Draft"),
///     &ReasonCode::from("Created"),
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(record.sequence_number(), 1);
/// assert_eq!(record.state_code(), "Draft");
/// assert_eq!(record.comment(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    sequence_number: u64,
    timestamp: DateTime<Utc>,
    state_code: String,
    reason_code: String,
    comment: Option<String>,
}

impl TransitionRecord {
    /// Build a record for `state` entered because of `reason`.
    ///
    /// Blank state or reason codes are rejected with
    /// [`HistoryError::InvalidArgument`].
    pub fn new(
        stamp: EntryStamp,
        state: &impl State,
        reason: &impl Reason,
        comment: Option<&str>,
    ) -> Result<Self, HistoryError> {
        check_codes(state, reason)?;

        Ok(Self {
            sequence_number: stamp.sequence_number,
            timestamp: stamp.timestamp,
            state_code: state.code().to_string(),
            reason_code: reason.code().to_string(),
            comment: comment.map(str::to_string),
        })
    }

    /// The code of the state entered by this transition
    pub fn state_code(&self) -> &str {
        &self.state_code
    }

    /// The code of the reason the transition happened
    pub fn reason_code(&self) -> &str {
        &self.reason_code
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Reject blank state and reason codes.
pub(crate) fn check_codes(state: &impl State, reason: &impl Reason) -> Result<(), HistoryError> {
    if state.code().trim().is_empty() {
        return Err(HistoryError::blank("state"));
    }
    if reason.code().trim().is_empty() {
        return Err(HistoryError::blank("reason"));
    }
    Ok(())
}

impl HistoryEntry for TransitionRecord {
    fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
