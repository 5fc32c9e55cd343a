//! Calendar token entity granting access to one personal calendar export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Column width of `identifier` in the token store
pub const MAX_IDENTIFIER_LENGTH: usize = 15;

/// Column width of `semester` in the token store
pub const MAX_SEMESTER_LENGTH: usize = 15;

/// Whose calendar a token exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Student,
    Teacher,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Student => "student",
            ResourceKind::Teacher => "teacher",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(ResourceKind::Student),
            "teacher" => Ok(ResourceKind::Teacher),
            other => Err(DomainError::invalid_argument(format!(
                "unknown resource kind: {}",
                other
            ))),
        }
    }
}

/// Token record stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarToken {
    pub kind: ResourceKind,

    /// Student or staff id
    pub identifier: String,

    /// Academic term the token is scoped to
    pub semester: String,

    /// Bearer credential
    pub token: Uuid,

    pub create_time: DateTime<Utc>,

    /// `None` until the first successful use
    pub last_used_time: Option<DateTime<Utc>>,
}

impl CalendarToken {
    /// Creates a fresh record with a random token
    ///
    /// Identifier and semester are validated against the store's column
    /// widths; violations are reported as `InvalidArgument`.
    pub fn issue(
        kind: ResourceKind,
        identifier: &str,
        semester: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_identifier(identifier)?;
        validate_semester(semester)?;

        Ok(Self {
            kind,
            identifier: identifier.to_string(),
            semester: semester.to_string(),
            token: Uuid::new_v4(),
            create_time: now,
            last_used_time: None,
        })
    }

    pub fn has_been_used(&self) -> bool {
        self.last_used_time.is_some()
    }

    /// Whether this record belongs to the given calendar
    pub fn matches_identity(&self, kind: ResourceKind, identifier: &str, semester: &str) -> bool {
        self.kind == kind && self.identifier == identifier && self.semester == semester
    }

    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }
}

/// Validates a student/staff id
pub fn validate_identifier(identifier: &str) -> Result<(), DomainError> {
    validate_field("identifier", identifier, MAX_IDENTIFIER_LENGTH)
}

/// Validates a semester string
pub fn validate_semester(semester: &str) -> Result<(), DomainError> {
    validate_field("semester", semester, MAX_SEMESTER_LENGTH)
}

fn validate_field(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(format!("{} is required", field)));
    }
    let length = value.chars().count();
    if length > max {
        return Err(DomainError::invalid_argument(format!(
            "{} is too long ({} > {} characters)",
            field, length, max
        )));
    }
    Ok(())
}

/// Parses a bearer token string
pub fn parse_token(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| DomainError::invalid_argument(format!("malformed token: {}", e)))
}

/// Token form safe for logs: the first group only
pub fn mask_token(token: &Uuid) -> String {
    let text = token.to_string();
    format!("{}-****", &text[..8])
}
