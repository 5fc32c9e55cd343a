//! MySQL implementation of the CalendarTokenRepository trait.
//!
//! Tokens are stored as their hyphenated UUID text in `CHAR(36)`; timestamps
//! use `DATETIME(6)` in UTC.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cal_core::{CalendarToken, CalendarTokenRepository, DomainError, ResourceKind};

const SELECT_COLUMNS: &str = r#"
    SELECT CAST(kind AS CHAR) AS kind, identifier, semester, token, create_time, last_used_time
    FROM calendar_tokens
"#;

/// MySQL implementation of CalendarTokenRepository
#[derive(Clone)]
pub struct MySqlCalendarTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCalendarTokenRepository {
    /// Create a new MySQL calendar token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to CalendarToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<CalendarToken, DomainError> {
        let kind: String = row.try_get("kind").map_err(decode_error("kind"))?;
        let token: String = row.try_get("token").map_err(decode_error("token"))?;

        Ok(CalendarToken {
            kind: kind.parse::<ResourceKind>().map_err(|_| DomainError::Internal {
                message: format!("Invalid kind in token store: {}", kind),
            })?,
            identifier: row.try_get("identifier").map_err(decode_error("identifier"))?,
            semester: row.try_get("semester").map_err(decode_error("semester"))?,
            token: Uuid::parse_str(&token).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            create_time: row
                .try_get::<DateTime<Utc>, _>("create_time")
                .map_err(decode_error("create_time"))?,
            last_used_time: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_time")
                .map_err(decode_error("last_used_time"))?,
        })
    }
}

fn decode_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

/// Map a SQLx failure to the domain taxonomy
pub(crate) fn store_error(action: &str, e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict {
            message: format!("Failed to {}: {}", action, db.message()),
        },
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => DomainError::Internal {
            message: format!("Failed to {}: {}", action, e),
        },
        _ => DomainError::Unavailable {
            message: format!("Failed to {}: {}", action, e),
        },
    }
}

#[async_trait]
impl CalendarTokenRepository for MySqlCalendarTokenRepository {
    async fn insert(&self, record: &CalendarToken) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO calendar_tokens (
                kind, identifier, semester, token, create_time, last_used_time
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.kind.as_str())
            .bind(&record.identifier)
            .bind(&record.semester)
            .bind(record.token.to_string())
            .bind(record.create_time)
            .bind(record.last_used_time)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("save calendar token", e))?;

        Ok(())
    }

    async fn touch_last_used(&self, token: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE calendar_tokens
            SET last_used_time = ?
            WHERE token = ?
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(token.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("update last used time", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // MySQL reports changed rows, so an unchanged timestamp also yields zero
        Ok(self.find_by_token(token).await?.is_some())
    }

    async fn delete_by_identifier(
        &self,
        kind: ResourceKind,
        identifier: &str,
    ) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM calendar_tokens
            WHERE identifier = ? AND kind = ?
        "#;

        let result = sqlx::query(query)
            .bind(identifier)
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("delete calendar tokens", e))?;

        Ok(result.rows_affected())
    }

    async fn find_by_token(&self, token: Uuid) -> Result<Option<CalendarToken>, DomainError> {
        let query = format!("{} WHERE token = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(token.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("find calendar token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_identity(
        &self,
        kind: ResourceKind,
        identifier: &str,
        semester: &str,
    ) -> Result<Option<CalendarToken>, DomainError> {
        let query = format!(
            "{} WHERE kind = ? AND identifier = ? AND semester = ? ORDER BY create_time DESC LIMIT 1",
            SELECT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(kind.as_str())
            .bind(identifier)
            .bind(semester)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("find calendar token by identity", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }
}
