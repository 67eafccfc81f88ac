// tests/support/mocks/repos.rs
use account_core::application::ports::time::Clock;
use account_core::domain::account::{Account, AccountId, AccountRepository, Email, NewAccount};
use account_core::domain::errors::{DomainError, DomainResult};
use account_core::domain::refresh_token::{
    NewRefreshToken, RefreshToken, RefreshTokenId, RefreshTokenRepository,
};
use account_core::infrastructure::repositories::{
    InMemoryAccountRepository, InMemoryRefreshTokenRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Barrier;

/// Records the name of every repository call and can be told to fail one of
/// them with a persistence error.
#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<&'static str>>,
    fail_on: Mutex<Option<&'static str>>,
}

impl CallLog {
    fn enter(&self, op: &'static str) -> DomainResult<()> {
        self.calls.lock().unwrap().push(op);
        if *self.fail_on.lock().unwrap() == Some(op) {
            return Err(DomainError::Persistence(format!("{op} failed")));
        }
        Ok(())
    }

    fn count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }
}

/// In-memory account store wrapped with call recording and failure injection.
pub struct SpyAccountRepo {
    inner: InMemoryAccountRepository,
    log: CallLog,
}

impl SpyAccountRepo {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: InMemoryAccountRepository::new(clock),
            log: CallLog::default(),
        }
    }

    pub fn fail_on(&self, op: &'static str) {
        *self.log.fail_on.lock().unwrap() = Some(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.log.count(op)
    }

    /// Insert directly, bypassing the call log.
    pub async fn seed(&self, account: NewAccount) -> Account {
        self.inner.insert(account).await.unwrap()
    }

    pub async fn stored(&self, id: AccountId) -> Option<Account> {
        self.inner.find_by_id(id).await.unwrap()
    }
}

#[async_trait]
impl AccountRepository for SpyAccountRepo {
    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool> {
        self.log.enter("exists_by_email")?;
        self.inner.exists_by_email(email).await
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Account>> {
        self.log.enter("find_by_email")?;
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>> {
        self.log.enter("find_by_id")?;
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, new_account: NewAccount) -> DomainResult<Account> {
        self.log.enter("insert")?;
        self.inner.insert(new_account).await
    }

    async fn update(&self, account: Account) -> DomainResult<Option<Account>> {
        self.log.enter("update")?;
        self.inner.update(account).await
    }
}

/// In-memory refresh-token store wrapped with call recording and failure
/// injection. It can also make the next `delete_by_id` lose a race against
/// another caller, or hold lookups until several callers have arrived.
#[derive(Default)]
pub struct SpyRefreshTokenRepo {
    inner: InMemoryRefreshTokenRepository,
    log: CallLog,
    lose_next_delete: AtomicBool,
    lookup_gate: Mutex<Option<Arc<Barrier>>>,
}

impl SpyRefreshTokenRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, op: &'static str) {
        *self.log.fail_on.lock().unwrap() = Some(op);
    }

    pub fn lose_next_delete_race(&self) {
        self.lose_next_delete.store(true, Ordering::SeqCst);
    }

    /// Hold the next `callers` lookups until all of them have read the store,
    /// so every one of them sees the same record.
    pub fn gate_lookups(&self, callers: usize) {
        *self.lookup_gate.lock().unwrap() = Some(Arc::new(Barrier::new(callers)));
    }

    pub fn calls(&self, op: &str) -> usize {
        self.log.count(op)
    }

    /// Insert directly, bypassing the call log.
    pub async fn seed(
        &self,
        token: &str,
        user_id: AccountId,
        expires_in: DateTime<Utc>,
    ) -> RefreshToken {
        self.inner
            .insert(NewRefreshToken::new(token, user_id, expires_in).unwrap())
            .await
            .unwrap()
    }

    pub async fn stored(&self, token: &str) -> Option<RefreshToken> {
        self.inner.find_by_token(token).await.unwrap()
    }
}

#[async_trait]
impl RefreshTokenRepository for SpyRefreshTokenRepo {
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        self.log.enter("find_by_token")?;
        let found = self.inner.find_by_token(token).await?;
        let gate = self.lookup_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            if gate.wait().await.is_leader() {
                self.lookup_gate.lock().unwrap().take();
            }
        }
        Ok(found)
    }

    async fn insert(&self, new_token: NewRefreshToken) -> DomainResult<RefreshToken> {
        self.log.enter("insert")?;
        self.inner.insert(new_token).await
    }

    async fn delete_by_id(&self, id: RefreshTokenId) -> DomainResult<bool> {
        self.log.enter("delete_by_id")?;
        if self.lose_next_delete.swap(false, Ordering::SeqCst) {
            self.inner.delete_by_id(id).await?;
        }
        self.inner.delete_by_id(id).await
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        self.log.enter("delete_expired")?;
        self.inner.delete_expired(before).await
    }
}
