//! Token store table bootstrap
//!
//! Creates `calendar_tokens` and its indexes when they are missing. Safe to
//! run on every start; existing tables are left alone.

use sqlx::MySqlPool;
use tracing::info;

use crate::InfrastructureError;

pub const CALENDAR_TOKENS_TABLE: &str = "calendar_tokens";

const CREATE_CALENDAR_TOKENS: &str = r#"
    CREATE TABLE IF NOT EXISTS calendar_tokens (
        kind ENUM('student', 'teacher') NOT NULL,
        identifier VARCHAR(15) NOT NULL,
        semester VARCHAR(15) NOT NULL,
        token CHAR(36) NOT NULL,
        create_time DATETIME(6) NOT NULL,
        last_used_time DATETIME(6) NULL,
        UNIQUE KEY idx_token (token),
        KEY idx_kind_identifier_semester (kind, identifier, semester)
    ) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4
"#;

/// Create the token table if it does not exist
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    sqlx::query(CREATE_CALENDAR_TOKENS).execute(pool).await?;

    info!("Table {} is ready", CALENDAR_TOKENS_TABLE);
    Ok(())
}
