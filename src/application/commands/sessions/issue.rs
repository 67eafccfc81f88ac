use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::util::UniqueTokenGenerator,
    },
    domain::{
        account::AccountId,
        refresh_token::{NewRefreshToken, RefreshToken, RefreshTokenRepository},
    },
};
use chrono::{DateTime, Duration, SubsecRound, Utc};

/// A freshly persisted refresh token together with the value handed to the client.
pub(super) struct IssuedRefreshToken {
    pub token: String,
    pub record: RefreshToken,
}

// Stores keep microseconds, so the expiry is truncated to match what a
// round trip through any of them returns.
pub(super) fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> ApplicationResult<DateTime<Utc>> {
    now.trunc_subsecs(6)
        .checked_add_signed(ttl)
        .ok_or_else(|| ApplicationError::infrastructure("refresh token expiry overflow"))
}

pub(super) async fn issue_refresh_token(
    refresh_token_repo: &dyn RefreshTokenRepository,
    token_generator: &dyn UniqueTokenGenerator,
    user_id: AccountId,
    now: DateTime<Utc>,
    ttl: Duration,
) -> ApplicationResult<IssuedRefreshToken> {
    let token = token_generator.generate().await?;
    let expires_in = expiry_from(now, ttl)?;

    let record = refresh_token_repo
        .insert(NewRefreshToken::new(token.clone(), user_id, expires_in)?)
        .await?;

    Ok(IssuedRefreshToken { token, record })
}
