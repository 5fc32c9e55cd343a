//! In-memory implementation of CalendarTokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::calendar_token::{CalendarToken, ResourceKind};
use crate::errors::DomainError;

use super::r#trait::CalendarTokenRepository;

/// Mock calendar token repository
///
/// Records are kept in insertion order. `set_unavailable(true)` makes every
/// call fail the way an unreachable database would.
#[derive(Clone, Default)]
pub struct MockCalendarTokenRepository {
    records: Arc<RwLock<Vec<CalendarToken>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockCalendarTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of all stored records
    pub async fn records(&self) -> Vec<CalendarToken> {
        self.records.read().await.clone()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("mock token store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl CalendarTokenRepository for MockCalendarTokenRepository {
    async fn insert(&self, record: &CalendarToken) -> Result<(), DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.token == record.token) {
            return Err(DomainError::Conflict {
                message: "Token already exists".to_string(),
            });
        }

        records.push(record.clone());
        Ok(())
    }

    async fn touch_last_used(&self, token: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;

        match records.iter_mut().find(|r| r.token == token) {
            Some(record) => {
                record.last_used_time = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_identifier(
        &self,
        kind: ResourceKind,
        identifier: &str,
    ) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|r| !(r.kind == kind && r.identifier == identifier));

        Ok((before - records.len()) as u64)
    }

    async fn find_by_token(&self, token: Uuid) -> Result<Option<CalendarToken>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.token == token).cloned())
    }

    async fn find_by_identity(
        &self,
        kind: ResourceKind,
        identifier: &str,
        semester: &str,
    ) -> Result<Option<CalendarToken>, DomainError> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.matches_identity(kind, identifier, semester))
            .max_by_key(|r| r.create_time)
            .cloned())
    }
}
