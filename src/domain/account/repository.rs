use crate::domain::account::{
    entity::{Account, NewAccount},
    value_objects::{AccountId, Email},
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn exists_by_email(&self, email: &Email) -> DomainResult<bool>;

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Account>>;

    async fn find_by_id(&self, id: AccountId) -> DomainResult<Option<Account>>;

    /// Persist a new account. The store assigns `id`, `created_at` and `updated_at`.
    async fn insert(&self, new_account: NewAccount) -> DomainResult<Account>;

    /// Persist the mutable fields of `account`. Returns `None` when no account
    /// with that id exists any more.
    async fn update(&self, account: Account) -> DomainResult<Option<Account>>;
}
