//! Diesel row models for board persistence.

use super::schema::{categories, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status storage string.
    pub status: String,
    /// Priority storage string.
    pub priority: String,
    /// Category reference.
    pub category_id: Option<uuid::Uuid>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Rank within the column.
    pub position: i32,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status storage string.
    pub status: String,
    /// Priority storage string.
    pub priority: String,
    /// Category reference.
    pub category_id: Option<uuid::Uuid>,
    /// Due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Rank within the column.
    pub position: i32,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update model for task edits.
///
/// `None` leaves a column untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status storage string.
    pub status: Option<String>,
    /// New priority storage string.
    pub priority: Option<String>,
    /// New category reference.
    pub category_id: Option<Option<uuid::Uuid>>,
    /// New due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for category records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Color token.
    pub color: String,
    /// Icon token.
    pub icon: String,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Color token.
    pub color: String,
    /// Icon token.
    pub icon: String,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
