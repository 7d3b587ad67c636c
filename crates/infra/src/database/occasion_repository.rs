//! Occasion repository implementation using SQLite
//!
//! Dates are stored as `YYYY-MM-DD` text so range filters compare
//! lexicographically; timestamps are unix seconds.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tokio::task;
use tracing::debug;
use vibekeeper_core::OccasionRepository as OccasionRepositoryPort;
use vibekeeper_domain::{
    NewOccasion, Occasion, OccasionFilter, OccasionPatch, OccasionStatus, Result as DomainResult,
};

use super::manager::{map_join_error, map_sql_error, DbManager};
use super::user_repository::timestamp_column;

const OCCASION_COLUMNS: &str = "id, owner_id, person, occasion_type, occasion_date, \
     person_relationship, notes, confidence_score, status, raw_input, created_at, updated_at";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed implementation of `OccasionRepository`
pub struct SqliteOccasionRepository {
    db: Arc<DbManager>,
}

impl SqliteOccasionRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OccasionRepositoryPort for SqliteOccasionRepository {
    async fn create(&self, owner_id: i64, occasion: NewOccasion) -> DomainResult<Occasion> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Occasion> {
            let conn = db.get_connection()?;
            insert_occasion(&conn, owner_id, &occasion).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get(&self, owner_id: i64, id: i64) -> DomainResult<Option<Occasion>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Occasion>> {
            let conn = db.get_connection()?;
            find_occasion(&conn, owner_id, id).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(
        &self,
        owner_id: i64,
        filter: &OccasionFilter,
        today: NaiveDate,
    ) -> DomainResult<Vec<Occasion>> {
        let db = Arc::clone(&self.db);
        let filter = filter.clone();

        task::spawn_blocking(move || -> DomainResult<Vec<Occasion>> {
            let conn = db.get_connection()?;
            let occasions =
                list_occasions(&conn, owner_id, &filter, today).map_err(map_sql_error)?;
            debug!(owner_id, count = occasions.len(), "Listed occasions");
            Ok(occasions)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        patch: OccasionPatch,
    ) -> DomainResult<Option<Occasion>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Occasion>> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;
            let updated = update_occasion(&tx, owner_id, id, patch).map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(updated)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, owner_id: i64, id: i64) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let affected = conn
                .execute(
                    "DELETE FROM occasions WHERE id = ?1 AND owner_id = ?2",
                    params![id, owner_id],
                )
                .map_err(map_sql_error)?;
            Ok(affected > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn insert_occasion(
    conn: &Connection,
    owner_id: i64,
    occasion: &NewOccasion,
) -> rusqlite::Result<Occasion> {
    let now = Utc::now().timestamp();
    conn.execute(
        "INSERT INTO occasions (owner_id, person, occasion_type, occasion_date,
                                person_relationship, notes, confidence_score, status,
                                raw_input, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            owner_id,
            occasion.person,
            occasion.occasion_type,
            occasion.occasion_date.format(DATE_FORMAT).to_string(),
            occasion.person_relationship,
            occasion.notes,
            occasion.confidence_score,
            OccasionStatus::Active.to_string(),
            occasion.raw_input,
            now,
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {OCCASION_COLUMNS} FROM occasions WHERE id = ?1"),
        params![id],
        map_occasion_row,
    )
}

fn find_occasion(conn: &Connection, owner_id: i64, id: i64) -> rusqlite::Result<Option<Occasion>> {
    conn.query_row(
        &format!("SELECT {OCCASION_COLUMNS} FROM occasions WHERE id = ?1 AND owner_id = ?2"),
        params![id, owner_id],
        map_occasion_row,
    )
    .optional()
}

fn list_occasions(
    conn: &Connection,
    owner_id: i64,
    filter: &OccasionFilter,
    today: NaiveDate,
) -> rusqlite::Result<Vec<Occasion>> {
    let mut sql = format!("SELECT {OCCASION_COLUMNS} FROM occasions WHERE owner_id = ?");
    let mut values = vec![Value::Integer(owner_id)];

    if let Some(person) = non_blank(filter.person.as_deref()) {
        sql.push_str(" AND person LIKE ? ESCAPE '\\'");
        values.push(Value::Text(like_pattern(person)));
    }
    if let Some(occasion_type) = non_blank(filter.occasion_type.as_deref()) {
        sql.push_str(" AND occasion_type = ? COLLATE NOCASE");
        values.push(Value::Text(occasion_type.to_string()));
    }
    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        values.push(Value::Text(status.to_string()));
    }
    if filter.upcoming_only {
        sql.push_str(" AND occasion_date >= ?");
        values.push(Value::Text(today.format(DATE_FORMAT).to_string()));
    }
    if let Some(term) = non_blank(filter.q.as_deref()) {
        sql.push_str(
            " AND (person LIKE ? ESCAPE '\\' OR occasion_type LIKE ? ESCAPE '\\' \
             OR raw_input LIKE ? ESCAPE '\\')",
        );
        let pattern = like_pattern(term);
        values.extend(std::iter::repeat(Value::Text(pattern)).take(3));
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_occasion_row)?;
    rows.collect()
}

/// Apply a patch inside the caller's transaction.
///
/// Blank `person_relationship` or `notes` clear the field.
fn update_occasion(
    conn: &Connection,
    owner_id: i64,
    id: i64,
    patch: OccasionPatch,
) -> rusqlite::Result<Option<Occasion>> {
    let Some(mut occasion) = find_occasion(conn, owner_id, id)? else {
        return Ok(None);
    };

    if let Some(person) = patch.person {
        occasion.person = person;
    }
    if let Some(occasion_type) = patch.occasion_type {
        occasion.occasion_type = occasion_type;
    }
    if let Some(date) = patch.occasion_date {
        occasion.occasion_date = date;
    }
    if let Some(relationship) = patch.person_relationship {
        occasion.person_relationship =
            Some(relationship).filter(|value| !value.trim().is_empty());
    }
    if let Some(notes) = patch.notes {
        occasion.notes = Some(notes).filter(|value| !value.trim().is_empty());
    }
    if let Some(status) = patch.status {
        occasion.status = status;
    }

    conn.execute(
        "UPDATE occasions
         SET person = ?1, occasion_type = ?2, occasion_date = ?3, person_relationship = ?4,
             notes = ?5, status = ?6, updated_at = ?7
         WHERE id = ?8 AND owner_id = ?9",
        params![
            occasion.person,
            occasion.occasion_type,
            occasion.occasion_date.format(DATE_FORMAT).to_string(),
            occasion.person_relationship,
            occasion.notes,
            occasion.status.to_string(),
            Utc::now().timestamp(),
            id,
            owner_id,
        ],
    )?;

    find_occasion(conn, owner_id, id)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn map_occasion_row(row: &Row) -> rusqlite::Result<Occasion> {
    let date_text: String = row.get(4)?;
    let occasion_date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(err)))?;

    let status_text: String = row.get(8)?;
    let status = status_text
        .parse::<OccasionStatus>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, err.into()))?;

    Ok(Occasion {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        person: row.get(2)?,
        occasion_type: row.get(3)?,
        occasion_date,
        person_relationship: row.get(5)?,
        notes: row.get(6)?,
        confidence_score: row.get(7)?,
        status,
        raw_input: row.get(9)?,
        created_at: timestamp_column(row, 10)?,
        updated_at: timestamp_column(row, 11)?,
    })
}
