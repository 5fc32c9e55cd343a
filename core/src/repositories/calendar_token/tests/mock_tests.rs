//! Unit tests for the in-memory calendar token repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::calendar_token::{CalendarToken, ResourceKind};
use crate::domain::value_objects::TokenLookup;
use crate::errors::DomainError;
use crate::repositories::calendar_token::{CalendarTokenRepository, MockCalendarTokenRepository};

fn record(kind: ResourceKind, identifier: &str, semester: &str) -> CalendarToken {
    CalendarToken::issue(kind, identifier, semester, Utc::now()).unwrap()
}

#[tokio::test]
async fn test_insert_and_find_by_token() {
    let repo = MockCalendarTokenRepository::new();
    let token = record(ResourceKind::Student, "2020001", "2023-Fall");

    repo.insert(&token).await.unwrap();

    let found = repo.find_by_token(token.token).await.unwrap();
    assert_eq!(found, Some(token));

    let missing = repo.find_by_token(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_token_conflicts() {
    let repo = MockCalendarTokenRepository::new();
    let first = record(ResourceKind::Student, "2020001", "2023-Fall");
    let mut second = record(ResourceKind::Teacher, "T0042", "2023-Fall");
    second.token = first.token;

    repo.insert(&first).await.unwrap();
    let err = repo.insert(&second).await.unwrap_err();

    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_find_by_identity_returns_newest_of_duplicates() {
    let repo = MockCalendarTokenRepository::new();
    let mut older = record(ResourceKind::Student, "2020001", "2023-Fall");
    older.create_time = Utc::now() - Duration::days(3);
    let newer = record(ResourceKind::Student, "2020001", "2023-Fall");

    repo.insert(&newer).await.unwrap();
    repo.insert(&older).await.unwrap();

    let found = repo
        .find_by_identity(ResourceKind::Student, "2020001", "2023-Fall")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.token, newer.token);

    let other_kind = repo
        .find_by_identity(ResourceKind::Teacher, "2020001", "2023-Fall")
        .await
        .unwrap();
    assert!(other_kind.is_none());
}

#[tokio::test]
async fn test_touch_last_used() {
    let repo = MockCalendarTokenRepository::new();
    let token = record(ResourceKind::Teacher, "T0042", "2023-Spring");
    repo.insert(&token).await.unwrap();

    let at = Utc::now();
    assert!(repo.touch_last_used(token.token, at).await.unwrap());
    assert!(!repo.touch_last_used(Uuid::new_v4(), at).await.unwrap());

    let found = repo.find_by_token(token.token).await.unwrap().unwrap();
    assert_eq!(found.last_used_time, Some(at));
}

#[tokio::test]
async fn test_delete_by_identifier_spans_semesters() {
    let repo = MockCalendarTokenRepository::new();
    repo.insert(&record(ResourceKind::Student, "2020001", "2023-Fall")).await.unwrap();
    repo.insert(&record(ResourceKind::Student, "2020001", "2024-Spring")).await.unwrap();
    repo.insert(&record(ResourceKind::Teacher, "2020001", "2023-Fall")).await.unwrap();
    repo.insert(&record(ResourceKind::Student, "2020002", "2023-Fall")).await.unwrap();

    let deleted = repo
        .delete_by_identifier(ResourceKind::Student, "2020001")
        .await
        .unwrap();
    assert_eq!(deleted, 2);

    let again = repo
        .delete_by_identifier(ResourceKind::Student, "2020001")
        .await
        .unwrap();
    assert_eq!(again, 0);

    assert_eq!(repo.records().await.len(), 2);
}

#[tokio::test]
async fn test_find_dispatches_on_lookup_mode() {
    let repo = MockCalendarTokenRepository::new();
    let token = record(ResourceKind::Student, "2020001", "2023-Fall");
    repo.insert(&token).await.unwrap();

    let by_token = repo.find(&TokenLookup::ByToken(token.token)).await.unwrap();
    let by_identity = repo
        .find(&TokenLookup::by_identity(ResourceKind::Student, "2020001", "2023-Fall"))
        .await
        .unwrap();

    assert_eq!(by_token, Some(token.clone()));
    assert_eq!(by_identity, Some(token));
}

#[tokio::test]
async fn test_unavailable_store() {
    let repo = MockCalendarTokenRepository::new();
    repo.set_unavailable(true);

    let err = repo.find_by_token(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::Unavailable { .. }));
}
