//! Addressing modes for finding a calendar token.
//!
//! A token can be found either by its bearer value or by the calendar it
//! exposes. Callers holding loosely-typed input (query parameters, form
//! fields) build a [`LookupRequest`] and convert it; the conversion rejects
//! requests that carry both modes or neither.

use uuid::Uuid;

use crate::domain::entities::calendar_token::{
    parse_token, validate_identifier, validate_semester, ResourceKind,
};
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    ByToken(Uuid),
    ByIdentity {
        kind: ResourceKind,
        identifier: String,
        semester: String,
    },
}

impl TokenLookup {
    pub fn by_token(token: Uuid) -> Self {
        TokenLookup::ByToken(token)
    }

    pub fn by_identity(
        kind: ResourceKind,
        identifier: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        TokenLookup::ByIdentity {
            kind,
            identifier: identifier.into(),
            semester: semester.into(),
        }
    }
}

/// Unvalidated lookup input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub token: Option<String>,
    /// Staff id; implies `ResourceKind::Teacher`
    pub teacher_id: Option<String>,
    /// Student id; implies `ResourceKind::Student`
    pub student_id: Option<String>,
    pub semester: Option<String>,
}

impl LookupRequest {
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn student(student_id: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            student_id: Some(student_id.into()),
            semester: Some(semester.into()),
            ..Default::default()
        }
    }

    pub fn teacher(teacher_id: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            teacher_id: Some(teacher_id.into()),
            semester: Some(semester.into()),
            ..Default::default()
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl TryFrom<LookupRequest> for TokenLookup {
    type Error = DomainError;

    fn try_from(request: LookupRequest) -> Result<Self, Self::Error> {
        let token = present(&request.token);
        let identity = match (
            present(&request.teacher_id),
            present(&request.student_id),
            present(&request.semester),
        ) {
            (None, None, None) => None,
            (Some(_), Some(_), _) => {
                return Err(DomainError::invalid_argument(
                    "teacher id and student id are mutually exclusive",
                ))
            }
            (Some(tid), None, Some(semester)) => {
                Some((ResourceKind::Teacher, tid, semester))
            }
            (None, Some(sid), Some(semester)) => {
                Some((ResourceKind::Student, sid, semester))
            }
            _ => {
                return Err(DomainError::invalid_argument(
                    "an identity lookup needs both an id and a semester",
                ))
            }
        };

        match (token, identity) {
            (Some(_), Some(_)) => Err(DomainError::invalid_argument(
                "give either a token or an identity, not both",
            )),
            (None, None) => Err(DomainError::invalid_argument(
                "a token or an id together with a semester must be given",
            )),
            (Some(raw), None) => Ok(TokenLookup::ByToken(parse_token(raw)?)),
            (None, Some((kind, identifier, semester))) => {
                validate_identifier(identifier)?;
                validate_semester(semester)?;
                Ok(TokenLookup::by_identity(kind, identifier, semester))
            }
        }
    }
}
