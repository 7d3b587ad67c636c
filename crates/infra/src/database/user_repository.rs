//! User repository implementation using SQLite

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;
use vibekeeper_core::UserRepository as UserRepositoryPort;
use vibekeeper_domain::{NewUser, Result as DomainResult, User};

use super::manager::{map_join_error, map_sql_error, DbManager};

const USER_COLUMNS: &str = "id, email, full_name, provider, created_at, updated_at";

/// SQLite-backed implementation of `UserRepository`
pub struct SqliteUserRepository {
    db: Arc<DbManager>,
}

impl SqliteUserRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn get_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<User>> {
            let conn = db.get_connection()?;
            find_user(&conn, "id = ?1", params![id]).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let db = Arc::clone(&self.db);
        let email = email.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<User>> {
            let conn = db.get_connection()?;
            find_user(&conn, "email = ?1", params![email]).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, user: NewUser) -> DomainResult<User> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<User> {
            let conn = db.get_connection()?;
            insert_user(&conn, &user).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn find_user(
    conn: &Connection,
    predicate: &str,
    params: &[&dyn rusqlite::ToSql],
) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate}"),
        params,
        map_user_row,
    )
    .optional()
}

fn insert_user(conn: &Connection, user: &NewUser) -> rusqlite::Result<User> {
    let now = Utc::now().timestamp();
    conn.execute(
        "INSERT INTO users (email, full_name, provider, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![user.email, user.full_name, user.provider, now],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        map_user_row,
    )
}

fn map_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        full_name: row.get(2)?,
        provider: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
        updated_at: timestamp_column(row, 5)?,
    })
}

/// Read a unix-seconds column as a UTC timestamp.
pub(crate) fn timestamp_column(row: &Row, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(index)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Integer,
            format!("timestamp {secs} out of range").into(),
        )
    })
}
