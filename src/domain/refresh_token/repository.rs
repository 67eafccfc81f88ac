use crate::domain::errors::DomainResult;
use crate::domain::refresh_token::entity::{NewRefreshToken, RefreshToken, RefreshTokenId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>>;

    async fn insert(&self, new_token: NewRefreshToken) -> DomainResult<RefreshToken>;

    /// Remove the record with the given id. Returns `false` when nothing was
    /// removed because the record no longer exists.
    async fn delete_by_id(&self, id: RefreshTokenId) -> DomainResult<bool>;

    /// Remove every record whose `expires_in` is strictly before `before`.
    /// Returns the number of records removed.
    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<u64>;
}
