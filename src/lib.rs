//! Statelog: an append-only history of finite state machine transitions
//!
//! Statelog records which state a machine entered, why, and when. The log
//! is strictly ordered: the history assigns every entry its sequence number
//! and timestamp, so the first entry is always the initial state and the
//! last entry is always the current one.
//!
//! Which transitions a machine may take is left to the machine definition;
//! the history only records what happened.
//!
//! # Core Concepts
//!
//! - **State / Reason**: opaque identifiers, each exposing a `code`
//! - **TransitionHistory**: the append-only log with initial and most recent views
//! - **Clock**: injected time source, so tests get deterministic timestamps
//! - **Checkpoint**: versioned snapshot for rehydrating a history from storage
//!
//! # Example
//!
//! ```rust
//! use statelog::core::{HistoryEntry, TransitionHistory};
//! use statelog::{reason_enum, state_enum};
//!
//! state_enum! {
//!     enum Document {
//!         Draft,
//!         Review,
//!         Published,
//!     }
//!     final: [Published]
//! }
//!
//! reason_enum! {
//!     enum Because {
//!         Created,
//!         Submitted,
//!     }
//! }
//!
//! let mut history = TransitionHistory::new();
//! history.append(&Document::Draft, &Because::Created, None).unwrap();
//! history
//!     .append(&Document::Review, &Because::Submitted, Some("ready"))
//!     .unwrap();
//!
//! assert_eq!(history.initial_entry().unwrap().state_code(), "Draft");
//! assert_eq!(history.most_recent_entry().unwrap().sequence_number(), 2);
//! assert_eq!(history.current_state_code(), Some("Review"));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod clock;
pub mod core;

// Re-export commonly used types
pub use builder::HistoryBuilder;
pub use clock::{Clock, SystemClock};
pub use crate::core::{
    HistoryEntry, HistoryError, Reason, State, TransitionHistory, TransitionRecord,
};
