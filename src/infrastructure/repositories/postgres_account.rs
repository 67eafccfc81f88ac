// src/infrastructure/repositories/postgres_account.rs
use super::map_sqlx;
use crate::domain::account::{
    Account, AccountId, AccountName, AccountRepository, Email, NewAccount, PasswordHash,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId::new(row.id)?,
            name: AccountName::new(row.name)?,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email, password_hash, created_at, updated_at
             FROM accounts WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name, email, password_hash, created_at, updated_at
             FROM accounts WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Account::try_from).transpose()
    }

    async fn insert(&self, new_account: NewAccount) -> DomainResult<Account> {
        let NewAccount {
            name,
            email,
            password_hash,
        } = new_account;

        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO accounts (id, name, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, now(), now())
            RETURNING id, name, email, password_hash, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(name.as_str())
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Account::try_from(row)
    }

    async fn update(&self, account: Account) -> DomainResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            "UPDATE accounts
                SET name = $2, email = $3, password_hash = $4, updated_at = now()
              WHERE id = $1
          RETURNING id, name, email, password_hash, created_at, updated_at",
        )
        .bind(account.id.as_uuid())
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Account::try_from).transpose()
    }
}
