//! Main calendar token service implementation

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::calendar_token::{
    mask_token, parse_token, validate_identifier, CalendarToken, ResourceKind,
};
use crate::domain::value_objects::TokenLookup;
use crate::errors::DomainError;
use crate::repositories::CalendarTokenRepository;

const TOKEN_RESOURCE: &str = "calendar token";

/// Service for issuing and resolving calendar tokens
pub struct CalendarTokenService<R: CalendarTokenRepository> {
    pub(crate) repository: R,
    clock: Arc<dyn Clock>,
}

impl<R: CalendarTokenRepository> CalendarTokenService<R> {
    /// Creates a new service using the wall clock
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: R, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Issues a new token for the calendar `(kind, identifier, semester)`
    ///
    /// The record starts with no `last_used_time`. Earlier tokens for the
    /// same calendar stay valid.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The new bearer token
    /// * `Err(DomainError::InvalidArgument)` - Identifier or semester rejected
    /// * `Err(DomainError::Conflict)` - Token collision; a retry issues a new value
    pub async fn issue(
        &self,
        kind: ResourceKind,
        semester: &str,
        identifier: &str,
    ) -> Result<Uuid, DomainError> {
        let record = CalendarToken::issue(kind, identifier, semester, self.timestamp())?;

        self.repository.insert(&record).await.map_err(|e| {
            warn!(
                kind = %kind,
                semester,
                "Failed to store calendar token {}: {}",
                record.masked_token(),
                e
            );
            e
        })?;

        info!(
            kind = %kind,
            semester,
            "Issued calendar token {}",
            record.masked_token()
        );

        Ok(record.token)
    }

    /// Returns the existing token for a calendar, issuing one if none exists
    pub async fn get_or_issue(
        &self,
        kind: ResourceKind,
        semester: &str,
        identifier: &str,
    ) -> Result<Uuid, DomainError> {
        let lookup = TokenLookup::by_identity(kind, identifier, semester);
        if let Some(existing) = self.lookup(&lookup).await? {
            debug!("Reusing calendar token {}", existing.masked_token());
            return Ok(existing.token);
        }

        self.issue(kind, semester, identifier).await
    }

    /// Stamps `last_used_time = now` on the record holding `token`
    ///
    /// Fails with `NotFound` when no record holds the token, so a revoked
    /// token is never brought back.
    pub async fn record_use(&self, token: Uuid) -> Result<(), DomainError> {
        let updated = self
            .repository
            .touch_last_used(token, self.timestamp())
            .await?;

        if !updated {
            debug!("No calendar token {} to mark as used", mask_token(&token));
            return Err(DomainError::NotFound {
                resource: TOKEN_RESOURCE.to_string(),
            });
        }

        Ok(())
    }

    /// Deletes every token of `(kind, identifier)` regardless of semester
    ///
    /// Idempotent; returns how many records were removed. Use
    /// `ResourceKind::default()` for students.
    pub async fn revoke(&self, identifier: &str, kind: ResourceKind) -> Result<u64, DomainError> {
        validate_identifier(identifier)?;

        let deleted = self.repository.delete_by_identifier(kind, identifier).await?;

        info!(kind = %kind, deleted, "Revoked calendar tokens");

        Ok(deleted)
    }

    /// Finds a record by token or by calendar identity
    ///
    /// Absence is `Ok(None)`. When several records share an identity one of
    /// them is returned.
    pub async fn lookup(&self, lookup: &TokenLookup) -> Result<Option<CalendarToken>, DomainError> {
        let found = self.repository.find(lookup).await?;

        if found.is_none() {
            match lookup {
                TokenLookup::ByToken(token) => {
                    debug!("Calendar token {} not found", mask_token(token))
                }
                TokenLookup::ByIdentity { kind, semester, .. } => {
                    debug!(kind = %kind, semester = %semester, "No calendar token for identity")
                }
            }
        }

        Ok(found)
    }

    /// Resolves a bearer token presented with an export request
    ///
    /// Parses the raw value, loads the record and records the use.
    ///
    /// # Returns
    ///
    /// * `Ok(CalendarToken)` - The record, with `last_used_time` set to now
    /// * `Err(DomainError::InvalidArgument)` - The value is not a token
    /// * `Err(DomainError::NotFound)` - Unknown or revoked token
    pub async fn authorize(&self, raw_token: &str) -> Result<CalendarToken, DomainError> {
        let token = parse_token(raw_token)?;

        let mut record = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: TOKEN_RESOURCE.to_string(),
            })?;

        let now = self.timestamp();
        if !self.repository.touch_last_used(token, now).await? {
            // revoked between the read and the write
            return Err(DomainError::NotFound {
                resource: TOKEN_RESOURCE.to_string(),
            });
        }
        record.last_used_time = Some(now);

        Ok(record)
    }

    /// Current time at the microsecond precision the token store keeps
    fn timestamp(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }
}
