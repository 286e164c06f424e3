//! History errors.

use thiserror::Error;

/// Errors returned by history operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("History invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl HistoryError {
    pub(crate) fn blank(argument: &'static str) -> Self {
        Self::InvalidArgument {
            argument,
            reason: "code must not be empty".to_string(),
        }
    }
}

/// Ways the strict-ordering invariant of a history can be broken.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two entries carry the same sequence number
    #[error("sequence number {0} appears more than once")]
    DuplicateSequenceNumber(u64),

    /// Sequence numbers start at 1
    #[error("sequence number 0 is not a valid entry number")]
    ZeroSequenceNumber,

    /// A record factory built an entry with a number other than the one it was stamped with
    #[error("entry was stamped with sequence number {expected} but carries {found}")]
    SequenceMismatch { expected: u64, found: u64 },

    /// A record factory replaced the timestamp it was stamped with
    #[error("entry {sequence_number} does not carry the timestamp it was stamped with")]
    TimestampMismatch { sequence_number: u64 },

    #[error("no sequence numbers left to assign")]
    SequenceExhausted,
}
