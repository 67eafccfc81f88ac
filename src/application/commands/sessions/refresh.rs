use std::sync::Arc;

use super::issue::{IssuedRefreshToken, issue_refresh_token};
use crate::{
    application::{
        dto::AuthenticationDto,
        error::{ApplicationError, ApplicationResult},
        ports::{security::TokenEncryptor, time::Clock, util::UniqueTokenGenerator},
    },
    domain::refresh_token::{RefreshToken, RefreshTokenRepository},
};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

pub struct RefreshSessionCommand {
    pub refresh_token: String,
}

/// Rotates a refresh token: the presented token is consumed and a new
/// access/refresh pair is issued for the same account.
///
/// The sequence is lookup, expiry check, access token, replacement record,
/// then deletion of the presented record. Each step aborts the rotation on
/// failure. A failed deletion is reported to the caller even though the
/// replacement record already exists.
///
/// When the presented record has already been removed by a concurrent
/// rotation, the replacement is deleted again and the call fails with
/// [`ApplicationError::RefreshTokenNotFound`], so one token never yields two
/// live sessions.
pub struct SessionRefresh {
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    token_encryptor: Arc<dyn TokenEncryptor>,
    token_generator: Arc<dyn UniqueTokenGenerator>,
    clock: Arc<dyn Clock>,
    refresh_ttl: Duration,
}

impl SessionRefresh {
    pub fn new(
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        token_encryptor: Arc<dyn TokenEncryptor>,
        token_generator: Arc<dyn UniqueTokenGenerator>,
        clock: Arc<dyn Clock>,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            refresh_token_repo,
            token_encryptor,
            token_generator,
            clock,
            refresh_ttl,
        }
    }

    pub async fn execute(
        &self,
        command: RefreshSessionCommand,
    ) -> ApplicationResult<AuthenticationDto> {
        let presented = self.find_presented_token(&command.refresh_token).await?;

        let now = self.clock.now();
        ensure_not_expired(&presented, now)?;

        let access_token = self.token_encryptor.encrypt(&presented.user_id).await?;

        let replacement = issue_refresh_token(
            self.refresh_token_repo.as_ref(),
            self.token_generator.as_ref(),
            presented.user_id,
            now,
            self.refresh_ttl,
        )
        .await?;

        self.retire_presented_token(&presented, &replacement).await?;

        debug!(
            account_id = %presented.user_id,
            old_token_id = %presented.id,
            new_token_id = %replacement.record.id,
            "refresh token rotated"
        );

        Ok(AuthenticationDto {
            access_token,
            refresh_token: replacement.token,
        })
    }

    async fn find_presented_token(&self, token: &str) -> ApplicationResult<RefreshToken> {
        self.refresh_token_repo
            .find_by_token(token)
            .await?
            .ok_or(ApplicationError::RefreshTokenNotFound)
    }

    async fn retire_presented_token(
        &self,
        presented: &RefreshToken,
        replacement: &IssuedRefreshToken,
    ) -> ApplicationResult<()> {
        if self.refresh_token_repo.delete_by_id(presented.id).await? {
            return Ok(());
        }

        warn!(
            account_id = %presented.user_id,
            token_id = %presented.id,
            "refresh token was consumed by a concurrent rotation"
        );
        self.refresh_token_repo
            .delete_by_id(replacement.record.id)
            .await?;

        Err(ApplicationError::RefreshTokenNotFound)
    }
}

fn ensure_not_expired(token: &RefreshToken, now: DateTime<Utc>) -> ApplicationResult<()> {
    if token.is_expired_at(now) {
        debug!(
            token_id = %token.id,
            expires_in = %token.expires_in,
            "refresh token expired"
        );
        return Err(ApplicationError::RefreshTokenExpired);
    }

    Ok(())
}
