//! Checkpoint and restore functionality for histories.
//!
//! A history is usually persisted as part of a larger aggregate. This module
//! turns a history into a serializable checkpoint and rebuilds a history from
//! one, validating the entries on the way back in.

use crate::builder::HistoryBuilder;
use crate::clock::Clock;
use crate::core::{HistoryEntry, TransitionHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a history.
/// Does NOT include the clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct HistoryCheckpoint<E: HistoryEntry> {
    /// Checkpoint format version
    pub version: u32,

    /// Surrogate id of the checkpointed history
    pub sid: Uuid,

    /// Persistence version of the checkpointed history
    pub persistence_version: i32,

    /// When checkpoint was created
    pub created_at: DateTime<Utc>,

    /// Entries in sequence order
    pub entries: Vec<E>,
}

impl<E: HistoryEntry> HistoryCheckpoint<E> {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<E: HistoryEntry, C: Clock> TransitionHistory<E, C> {
    /// Capture the history in a checkpoint.
    ///
    /// The checkpoint's `created_at` is read from the history's clock. That
    /// read counts like any other: a [`SteppedClock`](crate::clock::SteppedClock)
    /// advances, so entries appended afterwards are stamped one step later.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statelog::checkpoint::HistoryCheckpoint;
    /// use statelog::clock::SystemClock;
    /// use statelog::core::{ReasonCode, StateCode, TransitionHistory, TransitionRecord};
    ///
    /// let mut history = TransitionHistory::new();
    /// history
    ///     .append(&StateCode::from("Open"), &ReasonCode::from("Filed"), None)
    ///     .unwrap();
    ///
    /// let json = history.checkpoint().to_json().unwrap();
    ///
    /// let checkpoint = HistoryCheckpoint::<TransitionRecord>::from_json(&json).unwrap();
    /// let restored = TransitionHistory::restore(checkpoint, SystemClock).unwrap();
    /// assert_eq!(restored.entries(), history.entries());
    /// ```
    pub fn checkpoint(&self) -> HistoryCheckpoint<E> {
        HistoryCheckpoint {
            version: CHECKPOINT_VERSION,
            sid: self.sid(),
            persistence_version: self.version(),
            created_at: self.clock().now_utc(),
            entries: self.entries().to_vec(),
        }
    }

    /// Rebuild a history from a checkpoint, timestamping new entries with `clock`.
    pub fn restore(checkpoint: HistoryCheckpoint<E>, clock: C) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            warn!(
                found = checkpoint.version,
                supported = CHECKPOINT_VERSION,
                "refusing to restore checkpoint"
            );
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let history = HistoryBuilder::<E>::new()
            .clock(clock)
            .sid(checkpoint.sid)
            .version(checkpoint.persistence_version)
            .entries(checkpoint.entries)
            .build()?;

        debug!(
            sid = %history.sid(),
            count = history.len(),
            created_at = %checkpoint.created_at,
            "restored history from checkpoint"
        );
        Ok(history)
    }
}
