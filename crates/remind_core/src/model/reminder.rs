//! Reminder domain model.
//!
//! # Responsibility
//! - Define the single record type persisted by the store.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never reused afterwards.
//! - `time` is an absolute instant in epoch milliseconds; the local
//!   timezone is applied only at render/edit time, never persisted.

use serde::{Deserialize, Serialize};

/// Stable row identifier assigned by the store on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ReminderId = i64;

/// A user-scheduled title + time record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Auto-generated, immutable after creation.
    pub id: ReminderId,
    /// User supplied. Non-emptiness is enforced where input is collected,
    /// not by the store.
    pub title: String,
    /// Unix epoch milliseconds. May lie in the past; the store does not
    /// enforce future-only scheduling.
    pub time: i64,
}

impl Reminder {
    /// Builds a record around an id the store already assigned.
    pub fn new(id: ReminderId, title: impl Into<String>, time: i64) -> Self {
        Self {
            id,
            title: title.into(),
            time,
        }
    }
}
