// tests/support/mocks/security.rs
use account_core::application::{
    ApplicationResult,
    dto::AccessClaims,
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenEncryptor},
};
use account_core::domain::account::AccountId;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::time::fixed_now;

/// Deterministic hasher: `hash(pw)` is `"hash::" + pw` and verification is an
/// exact comparison against that form.
#[derive(Default)]
pub struct StrictPasswordHasher {
    hash_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    fail: AtomicBool,
}

impl StrictPasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hashed(password: &str) -> String {
        format!("hash::{password}")
    }

    pub fn fail_from_now_on(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("hasher unavailable"));
        }
        Ok(Self::hashed(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<bool> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("hasher unavailable"));
        }
        Ok(Self::hashed(password) == expected_hash)
    }
}

/// Issues `"access-{id}"` and remembers every subject it signed for.
#[derive(Default)]
pub struct FakeTokenEncryptor {
    subjects: Mutex<Vec<AccountId>>,
    fail: AtomicBool,
}

impl FakeTokenEncryptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access_token_for(subject: &AccountId) -> String {
        format!("access-{subject}")
    }

    pub fn failing() -> Self {
        let encryptor = Self::default();
        encryptor.fail.store(true, Ordering::SeqCst);
        encryptor
    }

    pub fn subjects(&self) -> Vec<AccountId> {
        self.subjects.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenEncryptor for FakeTokenEncryptor {
    async fn encrypt(&self, subject: &AccountId) -> ApplicationResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApplicationError::infrastructure("signing key unavailable"));
        }
        self.subjects.lock().unwrap().push(*subject);
        Ok(Self::access_token_for(subject))
    }

    async fn decrypt(&self, token: &str) -> ApplicationResult<AccessClaims> {
        let subject = token
            .strip_prefix("access-")
            .ok_or_else(|| ApplicationError::unauthorized("unknown token"))?
            .parse::<AccountId>()
            .map_err(|_| ApplicationError::unauthorized("unknown token"))?;

        Ok(AccessClaims {
            subject,
            issued_at: fixed_now(),
            expires_at: fixed_now() + Duration::minutes(15),
        })
    }
}
