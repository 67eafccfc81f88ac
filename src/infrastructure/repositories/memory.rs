// src/infrastructure/repositories/memory.rs
use crate::application::ports::time::Clock;
use crate::domain::account::{Account, AccountId, AccountRepository, Email, NewAccount};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::refresh_token::{
    NewRefreshToken, RefreshToken, RefreshTokenId, RefreshTokenRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> DomainResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
}

/// Process-local account store. Emails are unique, matched byte for byte.
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, Account>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAccountRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool> {
        let guard = lock(&self.accounts)?;
        Ok(guard.values().any(|account| account.email == *email))
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Account>> {
        let guard = lock(&self.accounts)?;
        Ok(guard
            .values()
            .find(|account| account.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>> {
        let guard = lock(&self.accounts)?;
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, new_account: NewAccount) -> DomainResult<Account> {
        let mut guard = lock(&self.accounts)?;
        if guard.values().any(|account| account.email == new_account.email) {
            return Err(DomainError::Conflict("email already exists".into()));
        }

        let now = self.clock.now();
        let account = Account {
            id: AccountId::generate(),
            name: new_account.name,
            email: new_account.email,
            password_hash: new_account.password_hash,
            created_at: now,
            updated_at: now,
        };
        guard.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, mut account: Account) -> DomainResult<Option<Account>> {
        let mut guard = lock(&self.accounts)?;
        if !guard.contains_key(&account.id) {
            return Ok(None);
        }
        if guard
            .values()
            .any(|other| other.id != account.id && other.email == account.email)
        {
            return Err(DomainError::Conflict("email already exists".into()));
        }

        account.updated_at = self.clock.now();
        guard.insert(account.id, account.clone());
        Ok(Some(account))
    }
}

/// Process-local refresh-token store. Deletion is a single locked removal, so
/// of two concurrent deletes of the same id exactly one reports success.
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Mutex<HashMap<RefreshTokenId, RefreshToken>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        let guard = lock(&self.tokens)?;
        Ok(guard.values().find(|record| record.token == token).cloned())
    }

    async fn insert(&self, new_token: NewRefreshToken) -> DomainResult<RefreshToken> {
        let mut guard = lock(&self.tokens)?;
        if guard.values().any(|record| record.token == new_token.token) {
            return Err(DomainError::Conflict(
                "refresh token value already exists".into(),
            ));
        }

        let record = RefreshToken {
            id: RefreshTokenId::generate(),
            token: new_token.token,
            user_id: new_token.user_id,
            expires_in: new_token.expires_in,
        };
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_by_id(&self, id: RefreshTokenId) -> DomainResult<bool> {
        let mut guard = lock(&self.tokens)?;
        Ok(guard.remove(&id).is_some())
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        let mut guard = lock(&self.tokens)?;
        let len = guard.len();
        guard.retain(|_, record| record.expires_in >= before);
        Ok((len - guard.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountName, PasswordHash};
    use crate::infrastructure::time::ManualClock;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount::new(
            AccountName::new("Alice").unwrap(),
            Email::new(email).unwrap(),
            PasswordHash::new("hash").unwrap(),
        )
    }

    #[tokio::test]
    async fn account_store_assigns_ids_and_timestamps() {
        let clock = Arc::new(ManualClock::new(start()));
        let repo = InMemoryAccountRepository::new(clock.clone());

        let account = repo.insert(new_account("a@example.com")).await.unwrap();
        assert_eq!(account.created_at, start());
        assert_eq!(account.updated_at, start());

        let email = Email::new("a@example.com").unwrap();
        assert!(repo.exists_by_email(&email).await.unwrap());
        assert_eq!(
            repo.find_by_email(&email).await.unwrap().unwrap().id,
            account.id
        );
        assert!(
            !repo
                .exists_by_email(&Email::new("A@example.com").unwrap())
                .await
                .unwrap()
        );

        clock.advance(Duration::seconds(5));
        let mut changed = account.clone();
        changed.rename(AccountName::new("Alicia").unwrap());
        let stored = repo.update(changed).await.unwrap().unwrap();
        assert_eq!(stored.name.as_str(), "Alicia");
        assert_eq!(stored.created_at, start());
        assert_eq!(stored.updated_at, start() + Duration::seconds(5));
    }

    #[tokio::test]
    async fn account_store_rejects_duplicate_email() {
        let repo = InMemoryAccountRepository::new(Arc::new(ManualClock::new(start())));
        repo.insert(new_account("a@example.com")).await.unwrap();

        let err = repo.insert(new_account("a@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn updating_unknown_account_yields_none() {
        let repo = InMemoryAccountRepository::new(Arc::new(ManualClock::new(start())));
        let ghost = Account {
            id: AccountId::generate(),
            name: AccountName::new("Ghost").unwrap(),
            email: Email::new("ghost@example.com").unwrap(),
            password_hash: PasswordHash::new("hash").unwrap(),
            created_at: start(),
            updated_at: start(),
        };
        assert!(repo.update(ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn refresh_token_delete_succeeds_once() {
        let repo = InMemoryRefreshTokenRepository::new();
        let record = repo
            .insert(NewRefreshToken::new("t1", AccountId::generate(), start()).unwrap())
            .await
            .unwrap();

        assert!(repo.find_by_token("t1").await.unwrap().is_some());
        assert!(repo.delete_by_id(record.id).await.unwrap());
        assert!(!repo.delete_by_id(record.id).await.unwrap());
        assert!(repo.find_by_token("t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn purge_keeps_tokens_expiring_at_the_cutoff() {
        let repo = InMemoryRefreshTokenRepository::new();
        let user = AccountId::generate();
        for (token, offset) in [("old", -1), ("edge", 0), ("fresh", 1)] {
            repo.insert(
                NewRefreshToken::new(token, user, start() + Duration::seconds(offset)).unwrap(),
            )
            .await
            .unwrap();
        }

        assert_eq!(repo.delete_expired(start()).await.unwrap(), 1);
        assert!(repo.find_by_token("old").await.unwrap().is_none());
        assert!(repo.find_by_token("edge").await.unwrap().is_some());
        assert!(repo.find_by_token("fresh").await.unwrap().is_some());
    }
}
