//! Calendar token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::calendar_token::{CalendarToken, ResourceKind};
use crate::domain::value_objects::TokenLookup;
use crate::errors::DomainError;

/// Repository trait for calendar token persistence
///
/// Every mutating call must be durable when it returns. Implementations map
/// uniqueness violations on `token` to `DomainError::Conflict` and transport
/// or server failures to `DomainError::Unavailable`.
#[async_trait]
pub trait CalendarTokenRepository: Send + Sync {
    /// Insert a newly issued record
    ///
    /// # Returns
    /// * `Ok(())` - Record persisted
    /// * `Err(DomainError::Conflict)` - A record with the same token exists
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use cal_core::{CalendarToken, CalendarTokenRepository, ResourceKind};
    /// # async fn example(repo: &impl CalendarTokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = CalendarToken::issue(ResourceKind::Student, "2020001", "2023-Fall", Utc::now())?;
    /// repo.insert(&record).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn insert(&self, record: &CalendarToken) -> Result<(), DomainError>;

    /// Set `last_used_time` on the record holding `token`
    ///
    /// # Returns
    /// * `Ok(true)` - Record updated
    /// * `Ok(false)` - No record holds this token
    async fn touch_last_used(&self, token: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Delete every record of `(kind, identifier)` across all semesters
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of records deleted, zero included
    async fn delete_by_identifier(
        &self,
        kind: ResourceKind,
        identifier: &str,
    ) -> Result<u64, DomainError>;

    async fn find_by_token(&self, token: Uuid) -> Result<Option<CalendarToken>, DomainError>;

    /// Find one record for the calendar `(kind, identifier, semester)`
    ///
    /// Several records may match; the most recently issued one is returned.
    async fn find_by_identity(
        &self,
        kind: ResourceKind,
        identifier: &str,
        semester: &str,
    ) -> Result<Option<CalendarToken>, DomainError>;

    /// Dispatch a lookup to the matching finder
    async fn find(&self, lookup: &TokenLookup) -> Result<Option<CalendarToken>, DomainError> {
        match lookup {
            TokenLookup::ByToken(token) => self.find_by_token(*token).await,
            TokenLookup::ByIdentity {
                kind,
                identifier,
                semester,
            } => self.find_by_identity(*kind, identifier, semester).await,
        }
    }
}
