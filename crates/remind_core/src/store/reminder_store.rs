//! Reminder store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `reminder` table, keyed by `_id`.
//! - Shape query projections: callers name the columns they want back.
//!
//! # Invariants
//! - Inserted ids are monotonically increasing and never reused.
//! - `query_*` with an empty projection falls back to `FULL_PROJECTION`.
//! - Absent rows surface as `None` / zero affected rows, not as errors.

use crate::db::{DbError, StoreHandle};
use crate::model::reminder::{Reminder, ReminderId};
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for reminder persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reminder data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Columns of the `reminder` table, named in caller-chosen projection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Title,
    Time,
}

impl Column {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "_id",
            Self::Title => "title",
            Self::Time => "time",
        }
    }
}

/// Default full projection: id, title, time.
pub const FULL_PROJECTION: &[Column] = &[Column::Id, Column::Title, Column::Time];

/// Row filter for [`ReminderStore::query_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderFilter {
    /// Restrict the result to the single row with this id.
    ById(ReminderId),
}

/// Projection-shaped query result: only requested columns are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderRow {
    pub id: Option<ReminderId>,
    pub title: Option<String>,
    pub time: Option<i64>,
}

impl ReminderRow {
    /// Converts a full-projection row into a typed reminder.
    pub fn into_reminder(self) -> StoreResult<Reminder> {
        match (self.id, self.title, self.time) {
            (Some(id), Some(title), Some(time)) => Ok(Reminder { id, title, time }),
            _ => Err(StoreError::InvalidData(
                "row is missing columns required for a full reminder".to_string(),
            )),
        }
    }
}

/// Store interface for reminder CRUD operations.
pub trait ReminderStore {
    /// Inserts a new row and returns its freshly assigned id.
    fn create(&self, title: &str, time: i64) -> StoreResult<ReminderId>;

    /// Returns all matching rows shaped by `projection`, scheduled-time
    /// order. An empty projection means [`FULL_PROJECTION`].
    fn query_all(
        &self,
        projection: &[Column],
        filter: Option<ReminderFilter>,
    ) -> StoreResult<Vec<ReminderRow>>;

    /// Returns at most one row, shaped by `projection`.
    fn query_by_id(
        &self,
        id: ReminderId,
        projection: &[Column],
    ) -> StoreResult<Option<ReminderRow>>;

    /// Updates title and time of the row matching `id`.
    ///
    /// Returns the affected row count; 0 means no such id and is a normal
    /// outcome.
    fn update(&self, id: ReminderId, title: &str, time: i64) -> StoreResult<usize>;

    /// Removes the row matching `id`; 0 affected rows means it was absent.
    fn delete_by_id(&self, id: ReminderId) -> StoreResult<usize>;

    /// Removes every row and returns how many were deleted.
    fn delete_all(&self) -> StoreResult<usize>;

    /// Loads every reminder as a typed record using the full projection.
    fn list_reminders(&self) -> StoreResult<Vec<Reminder>> {
        self.query_all(FULL_PROJECTION, None)?
            .into_iter()
            .map(ReminderRow::into_reminder)
            .collect()
    }

    /// Loads one reminder as a typed record, `None` when absent.
    fn get_reminder(&self, id: ReminderId) -> StoreResult<Option<Reminder>> {
        self.query_by_id(id, FULL_PROJECTION)?
            .map(ReminderRow::into_reminder)
            .transpose()
    }
}

/// SQLite-backed reminder store over the shared connection handle.
#[derive(Clone)]
pub struct SqliteReminderStore {
    handle: StoreHandle,
}

impl SqliteReminderStore {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }
}

impl ReminderStore for SqliteReminderStore {
    fn create(&self, title: &str, time: i64) -> StoreResult<ReminderId> {
        let conn = self.handle.lock();
        conn.execute(
            "INSERT INTO reminder (title, time) VALUES (?1, ?2);",
            params![title, time],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn query_all(
        &self,
        projection: &[Column],
        filter: Option<ReminderFilter>,
    ) -> StoreResult<Vec<ReminderRow>> {
        let columns = effective_projection(projection);
        let sql = select_sql(columns, filter.is_some());

        let conn = self.handle.lock();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = match filter {
            Some(ReminderFilter::ById(id)) => stmt.query(params![id])?,
            None => stmt.query([])?,
        };

        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(parse_row(row, columns)?);
        }
        Ok(result)
    }

    fn query_by_id(
        &self,
        id: ReminderId,
        projection: &[Column],
    ) -> StoreResult<Option<ReminderRow>> {
        let columns = effective_projection(projection);
        let sql = select_sql(columns, true);

        let conn = self.handle.lock();
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_row(row, columns)?)),
            None => Ok(None),
        }
    }

    fn update(&self, id: ReminderId, title: &str, time: i64) -> StoreResult<usize> {
        let conn = self.handle.lock();
        let changed = conn.execute(
            "UPDATE reminder SET title = ?1, time = ?2 WHERE _id = ?3;",
            params![title, time, id],
        )?;
        Ok(changed)
    }

    fn delete_by_id(&self, id: ReminderId) -> StoreResult<usize> {
        let conn = self.handle.lock();
        let changed = conn.execute("DELETE FROM reminder WHERE _id = ?1;", params![id])?;
        Ok(changed)
    }

    fn delete_all(&self) -> StoreResult<usize> {
        let conn = self.handle.lock();
        let changed = conn.execute("DELETE FROM reminder;", [])?;
        Ok(changed)
    }
}

fn effective_projection(projection: &[Column]) -> &[Column] {
    if projection.is_empty() {
        FULL_PROJECTION
    } else {
        projection
    }
}

fn select_sql(columns: &[Column], by_id: bool) -> String {
    let selected = columns
        .iter()
        .map(|column| column.as_sql())
        .collect::<Vec<_>>()
        .join(", ");
    let mut sql = format!("SELECT {selected} FROM reminder");
    if by_id {
        sql.push_str(" WHERE _id = ?1");
    }
    sql.push_str(" ORDER BY time ASC, _id ASC;");
    sql
}

fn parse_row(row: &Row<'_>, columns: &[Column]) -> StoreResult<ReminderRow> {
    let mut parsed = ReminderRow::default();
    for (index, column) in columns.iter().enumerate() {
        match column {
            Column::Id => parsed.id = Some(row.get(index)?),
            Column::Title => parsed.title = Some(row.get(index)?),
            Column::Time => parsed.time = Some(row.get(index)?),
        }
    }
    Ok(parsed)
}
