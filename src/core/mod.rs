//! Core history types.
//!
//! This module contains the transition log itself:
//! - State and reason identifiers via the `State` and `Reason` traits
//! - History entries and the concrete `TransitionRecord`
//! - The append-only `TransitionHistory`

mod entry;
mod error;
mod history;
mod state;

pub use entry::{EntryStamp, HistoryEntry, TransitionRecord};
pub use error::{HistoryError, InvariantViolation};
pub use history::TransitionHistory;
pub use state::{Reason, ReasonCode, State, StateCode};

pub(crate) use history::ordered;
