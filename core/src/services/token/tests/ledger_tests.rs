//! Unit tests for the refresh token ledger

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{DomainError, TokenError};
use crate::repositories::token::mock::MockRefreshTokenRepository;
use crate::services::token::RefreshTokenLedger;

const WEEK_MS: i64 = 604_800_000;

fn create_ledger() -> RefreshTokenLedger<MockRefreshTokenRepository> {
    RefreshTokenLedger::new(Arc::new(MockRefreshTokenRepository::new()), WEEK_MS)
}

#[tokio::test]
async fn test_issue_then_validate() {
    let ledger = create_ledger();
    let account_id = Uuid::new_v4();

    let issued = ledger
        .issue(account_id, "token-string", Default::default())
        .await
        .unwrap();

    let validated = ledger.validate("token-string").await.unwrap();
    assert_eq!(validated, issued);
    assert_eq!(validated.account_id, account_id);
    // The raw token never reaches storage
    assert_ne!(validated.token_hash, "token-string");
}

#[tokio::test]
async fn test_validate_unknown_token() {
    let ledger = create_ledger();

    let err = ledger.validate("never-issued").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::InvalidRefreshToken)
    ));
}

#[tokio::test]
async fn test_validate_revoked_token() {
    let ledger = create_ledger();
    let record = ledger
        .issue(Uuid::new_v4(), "token-string", Default::default())
        .await
        .unwrap();

    ledger.rotate(&record).await.unwrap();

    let err = ledger.validate("token-string").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_validate_expired_token() {
    // A ledger whose records expire in the past
    let ledger = RefreshTokenLedger::new(
        Arc::new(MockRefreshTokenRepository::new()),
        -1_000,
    );

    let record = ledger
        .issue(Uuid::new_v4(), "token-string", Default::default())
        .await
        .unwrap();
    assert!(record.expires_at < Utc::now());

    let err = ledger.validate("token-string").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::RefreshTokenExpired)
    ));
}

#[tokio::test]
async fn test_rotate_consumes_exactly_once() {
    let ledger = create_ledger();
    let record = ledger
        .issue(Uuid::new_v4(), "token-string", Default::default())
        .await
        .unwrap();

    ledger.rotate(&record).await.unwrap();

    let err = ledger.rotate(&record).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenRevoked)));
}

#[tokio::test]
async fn test_revoke_all_for_account() {
    let ledger = create_ledger();
    let account_id = Uuid::new_v4();

    ledger
        .issue(account_id, "first", Default::default())
        .await
        .unwrap();
    ledger
        .issue(account_id, "second", Default::default())
        .await
        .unwrap();

    let revoked = ledger.revoke_all_for(account_id).await.unwrap();
    assert_eq!(revoked, 2);

    assert!(ledger.validate("first").await.is_err());
    assert!(ledger.validate("second").await.is_err());
}

#[tokio::test]
async fn test_delete_expired_keeps_live_records() {
    let repository = Arc::new(MockRefreshTokenRepository::new());
    let ledger = RefreshTokenLedger::new(Arc::clone(&repository), WEEK_MS);

    ledger
        .issue(Uuid::new_v4(), "live", Default::default())
        .await
        .unwrap();

    assert_eq!(ledger.delete_expired().await.unwrap(), 0);
    assert!(ledger.validate("live").await.is_ok());
}

#[test]
fn test_hash_token_is_deterministic_sha256() {
    let first = RefreshTokenLedger::<MockRefreshTokenRepository>::hash_token("token");
    let second = RefreshTokenLedger::<MockRefreshTokenRepository>::hash_token("token");
    let other = RefreshTokenLedger::<MockRefreshTokenRepository>::hash_token("other");

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(first.len(), 64);
}
