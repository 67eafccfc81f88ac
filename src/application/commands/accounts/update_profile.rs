use std::sync::Arc;

use super::guards::ensure_email_available;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::account::{Account, AccountId, AccountName, AccountRepository, Email},
};
use tracing::info;
use uuid::Uuid;

pub struct UpdateNameCommand {
    pub user_id: Uuid,
    pub name: String,
}

pub struct UpdateEmailCommand {
    pub user_id: Uuid,
    pub email: String,
}

pub struct NameUpdate {
    account_repo: Arc<dyn AccountRepository>,
}

impl NameUpdate {
    pub fn new(account_repo: Arc<dyn AccountRepository>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, command: UpdateNameCommand) -> ApplicationResult<Account> {
        let account_id = AccountId::new(command.user_id)?;
        let name = AccountName::new(command.name)?;

        let mut account = load_account(self.account_repo.as_ref(), account_id).await?;
        account.rename(name);

        persist(self.account_repo.as_ref(), account).await
    }
}

/// Moves an account to a new email, keeping emails unique across accounts.
pub struct EmailUpdate {
    account_repo: Arc<dyn AccountRepository>,
}

impl EmailUpdate {
    pub fn new(account_repo: Arc<dyn AccountRepository>) -> Self {
        Self { account_repo }
    }

    pub async fn execute(&self, command: UpdateEmailCommand) -> ApplicationResult<Account> {
        let account_id = AccountId::new(command.user_id)?;
        let email = Email::new(command.email)?;

        let mut account = load_account(self.account_repo.as_ref(), account_id).await?;
        if account.email == email {
            return Ok(account);
        }

        ensure_email_available(self.account_repo.as_ref(), &email).await?;
        account.change_email(email);

        let account = persist(self.account_repo.as_ref(), account).await?;
        info!(account_id = %account.id, "account email changed");
        Ok(account)
    }
}

async fn load_account(
    account_repo: &dyn AccountRepository,
    account_id: AccountId,
) -> ApplicationResult<Account> {
    account_repo
        .find_by_id(account_id)
        .await?
        .ok_or(ApplicationError::AccountNotFoundById)
}

async fn persist(account_repo: &dyn AccountRepository, account: Account) -> ApplicationResult<Account> {
    account_repo
        .update(account)
        .await?
        .ok_or(ApplicationError::AccountNotFoundById)
}
