use std::sync::Arc;

use super::guards::verify_credentials;
use crate::{
    application::{
        dto::AccessTokenDto,
        error::ApplicationResult,
        ports::security::{PasswordHasher, TokenEncryptor},
    },
    domain::account::{AccountRepository, Email},
};

pub struct AuthenticateCommand {
    pub email: String,
    pub password: String,
}

/// Checks an email/password pair and mints an access token for the account.
/// Never writes to any store.
pub struct CredentialVerification {
    account_repo: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_encryptor: Arc<dyn TokenEncryptor>,
}

impl CredentialVerification {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_encryptor: Arc<dyn TokenEncryptor>,
    ) -> Self {
        Self {
            account_repo,
            password_hasher,
            token_encryptor,
        }
    }

    pub async fn execute(&self, command: AuthenticateCommand) -> ApplicationResult<AccessTokenDto> {
        let email = Email::new(command.email)?;

        let account = verify_credentials(
            self.account_repo.as_ref(),
            self.password_hasher.as_ref(),
            &email,
            &command.password,
        )
        .await?;

        let access_token = self.token_encryptor.encrypt(&account.id).await?;

        Ok(AccessTokenDto { access_token })
    }
}
