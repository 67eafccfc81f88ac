use std::sync::Arc;

use super::{guards::ensure_password_matches, password::validate_password};
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::security::PasswordHasher,
    },
    domain::account::{AccountId, AccountRepository, PasswordHash},
};
use tracing::info;
use uuid::Uuid;

pub struct ChangePasswordCommand {
    pub user_id: Uuid,
    pub old_password: String,
    pub new_password: String,
}

/// Replaces an account's password after re-verifying the current one.
pub struct PasswordRotation {
    account_repo: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl PasswordRotation {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            account_repo,
            password_hasher,
        }
    }

    pub async fn execute(&self, command: ChangePasswordCommand) -> ApplicationResult<()> {
        let account_id = AccountId::new(command.user_id)?;
        validate_password(&command.new_password)?;

        let mut account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(ApplicationError::AccountNotFoundById)?;

        ensure_password_matches(
            self.password_hasher.as_ref(),
            &account,
            &command.old_password,
        )
        .await?;

        let hashed = self.password_hasher.hash(&command.new_password).await?;
        account.set_password(PasswordHash::new(hashed)?);

        self.account_repo
            .update(account)
            .await?
            .ok_or(ApplicationError::AccountNotFoundById)?;

        info!(account_id = %account_id, "password rotated");
        Ok(())
    }
}
