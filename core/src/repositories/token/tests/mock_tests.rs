//! Tests for the mock refresh token repository, focused on the
//! compare-and-set revocation primitive the ledger depends on.

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshTokenRecord, SessionMetadata};
use crate::repositories::token::mock::MockRefreshTokenRepository;
use crate::repositories::RefreshTokenRepository;

const WEEK_MS: i64 = 604_800_000;

fn sample_record(account_id: Uuid, hash: &str) -> RefreshTokenRecord {
    RefreshTokenRecord::new(
        account_id,
        hash.to_string(),
        WEEK_MS,
        SessionMetadata::default(),
    )
}

#[tokio::test]
async fn test_save_and_find() {
    let repo = MockRefreshTokenRepository::new();
    let record = sample_record(Uuid::new_v4(), "hash-1");

    repo.save(record.clone()).await.unwrap();

    let found = repo.find_by_hash("hash-1").await.unwrap().unwrap();
    assert_eq!(found, record);
    assert!(repo.find_by_hash("hash-2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_save_rejected() {
    let repo = MockRefreshTokenRepository::new();
    let account_id = Uuid::new_v4();

    repo.save(sample_record(account_id, "hash-1")).await.unwrap();
    let result = repo.save(sample_record(account_id, "hash-1")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_revoke_if_active_consumes_once() {
    let repo = MockRefreshTokenRepository::new();
    repo.save(sample_record(Uuid::new_v4(), "hash-1")).await.unwrap();

    assert!(repo.revoke_if_active("hash-1").await.unwrap());
    // Second call loses: the record is already revoked
    assert!(!repo.revoke_if_active("hash-1").await.unwrap());
    // Unknown hash also reports false, not an error
    assert!(!repo.revoke_if_active("missing").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_revocation_has_single_winner() {
    let repo = Arc::new(MockRefreshTokenRepository::new());
    repo.save(sample_record(Uuid::new_v4(), "contested")).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.revoke_if_active("contested").await.unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_revoke_all_for_account() {
    let repo = MockRefreshTokenRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.save(sample_record(alice, "a-1")).await.unwrap();
    repo.save(sample_record(alice, "a-2")).await.unwrap();
    repo.save(sample_record(bob, "b-1")).await.unwrap();

    let revoked = repo.revoke_all_for_account(alice).await.unwrap();
    assert_eq!(revoked, 2);

    // Bob's token is untouched, Alice's are terminal
    assert!(repo.find_by_hash("b-1").await.unwrap().unwrap().is_active());
    assert!(repo.find_by_hash("a-1").await.unwrap().unwrap().revoked);

    // Re-running revokes nothing further
    assert_eq!(repo.revoke_all_for_account(alice).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_expired() {
    let repo = MockRefreshTokenRepository::new();
    let account_id = Uuid::new_v4();

    let mut stale = sample_record(account_id, "stale");
    stale.expires_at = Utc::now() - Duration::days(1);
    repo.save(stale).await.unwrap();
    repo.save(sample_record(account_id, "fresh")).await.unwrap();

    let deleted = repo.delete_expired().await.unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(repo.len().await, 1);
    assert!(repo.find_by_hash("stale").await.unwrap().is_none());
}
