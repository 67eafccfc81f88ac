// src/infrastructure/repositories/postgres_refresh_token.rs
use super::map_sqlx;
use crate::domain::account::AccountId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::refresh_token::{
    NewRefreshToken, RefreshToken, RefreshTokenId, RefreshTokenRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    token: String,
    user_id: Uuid,
    expires_in: DateTime<Utc>,
}

impl TryFrom<RefreshTokenRow> for RefreshToken {
    type Error = DomainError;

    fn try_from(row: RefreshTokenRow) -> Result<Self, Self::Error> {
        Ok(RefreshToken {
            id: RefreshTokenId::new(row.id)?,
            token: row.token,
            user_id: AccountId::new(row.user_id)?,
            expires_in: row.expires_in,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT id, token, user_id, expires_in FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(RefreshToken::try_from).transpose()
    }

    async fn insert(&self, new_token: NewRefreshToken) -> DomainResult<RefreshToken> {
        let NewRefreshToken {
            token,
            user_id,
            expires_in,
        } = new_token;

        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "INSERT INTO refresh_tokens (id, token, user_id, expires_in)
             VALUES ($1, $2, $3, $4)
            RETURNING id, token, user_id, expires_in",
        )
        .bind(Uuid::new_v4())
        .bind(token)
        .bind(user_id.as_uuid())
        .bind(expires_in)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        RefreshToken::try_from(row)
    }

    async fn delete_by_id(&self, id: RefreshTokenId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_in < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }
}
