use std::sync::Arc;

use super::{guards::ensure_email_available, password::validate_password};
use crate::{
    application::{error::ApplicationResult, ports::security::PasswordHasher},
    domain::account::{Account, AccountName, AccountRepository, Email, NewAccount, PasswordHash},
};
use tracing::info;

pub struct RegisterAccountCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Creates accounts, refusing emails that are already registered.
pub struct AccountRegistration {
    account_repo: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AccountRegistration {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            account_repo,
            password_hasher,
        }
    }

    pub async fn execute(&self, command: RegisterAccountCommand) -> ApplicationResult<Account> {
        let name = AccountName::new(command.name)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        ensure_email_available(self.account_repo.as_ref(), &email).await?;

        let account = self
            .create_account(name, email, &command.password)
            .await?;

        info!(account_id = %account.id, "account registered");
        Ok(account)
    }

    async fn create_account(
        &self,
        name: AccountName,
        email: Email,
        password: &str,
    ) -> ApplicationResult<Account> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let account = self
            .account_repo
            .insert(NewAccount::new(name, email, password_hash))
            .await?;

        Ok(account)
    }
}
