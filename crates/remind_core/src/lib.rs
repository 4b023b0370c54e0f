//! Core domain logic for Remind.
//! This crate is the single source of truth for reminder storage and
//! background mutation semantics.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, StoreHandle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::reminder::{Reminder, ReminderId};
pub use service::remind_service::{ObserverId, OpEvent, OpRequest, RemindService};
pub use store::reminder_store::{
    Column, ReminderFilter, ReminderRow, ReminderStore, SqliteReminderStore, StoreError,
    StoreResult, FULL_PROJECTION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
