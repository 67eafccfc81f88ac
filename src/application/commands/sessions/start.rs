use std::sync::Arc;

use super::issue::issue_refresh_token;
use crate::{
    application::{
        commands::accounts::verify_credentials,
        dto::AuthenticationDto,
        error::ApplicationResult,
        ports::{
            security::{PasswordHasher, TokenEncryptor},
            time::Clock,
            util::UniqueTokenGenerator,
        },
    },
    domain::{
        account::{AccountRepository, Email},
        refresh_token::RefreshTokenRepository,
    },
};
use chrono::Duration;
use tracing::info;

pub struct StartSessionCommand {
    pub email: String,
    pub password: String,
}

/// Login flow that issues the first refresh token of a session alongside
/// the access token.
pub struct SessionStart {
    account_repo: Arc<dyn AccountRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_encryptor: Arc<dyn TokenEncryptor>,
    token_generator: Arc<dyn UniqueTokenGenerator>,
    clock: Arc<dyn Clock>,
    refresh_ttl: Duration,
}

impl SessionStart {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_encryptor: Arc<dyn TokenEncryptor>,
        token_generator: Arc<dyn UniqueTokenGenerator>,
        clock: Arc<dyn Clock>,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            account_repo,
            refresh_token_repo,
            password_hasher,
            token_encryptor,
            token_generator,
            clock,
            refresh_ttl,
        }
    }

    pub async fn execute(&self, command: StartSessionCommand) -> ApplicationResult<AuthenticationDto> {
        let email = Email::new(command.email)?;

        let account = verify_credentials(
            self.account_repo.as_ref(),
            self.password_hasher.as_ref(),
            &email,
            &command.password,
        )
        .await?;

        let access_token = self.token_encryptor.encrypt(&account.id).await?;

        let issued = issue_refresh_token(
            self.refresh_token_repo.as_ref(),
            self.token_generator.as_ref(),
            account.id,
            self.clock.now(),
            self.refresh_ttl,
        )
        .await?;

        info!(account_id = %account.id, token_id = %issued.record.id, "session started");

        Ok(AuthenticationDto {
            access_token,
            refresh_token: issued.token,
        })
    }
}
