// src/application/ports/security.rs
use crate::{
    application::{ApplicationResult, dto::AccessClaims},
    domain::account::AccountId,
};
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<String>;

    /// `Ok(false)` means the password does not match; `Err` is reserved for
    /// failures such as an unparseable stored hash.
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<bool>;
}

#[async_trait]
pub trait TokenEncryptor: Send + Sync {
    /// Issue a signed, time-bound access token whose subject is `subject`.
    async fn encrypt(&self, subject: &AccountId) -> ApplicationResult<String>;

    /// Verify signature and lifetime of an access token and return its claims.
    async fn decrypt(&self, token: &str) -> ApplicationResult<AccessClaims>;
}
