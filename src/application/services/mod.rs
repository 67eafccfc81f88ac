// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            accounts::{
                AccountRegistration, CredentialVerification, EmailUpdate, NameUpdate,
                PasswordRotation,
            },
            sessions::{ExpiredTokenPurge, SessionRefresh, SessionStart},
        },
        ports::{
            security::{PasswordHasher, TokenEncryptor},
            time::Clock,
            util::UniqueTokenGenerator,
        },
        queries::accounts::AccountProfile,
    },
    domain::{account::AccountRepository, refresh_token::RefreshTokenRepository},
};
use chrono::Duration;

/// Every use case, wired once from a shared set of ports.
pub struct ApplicationServices {
    pub account_registration: Arc<AccountRegistration>,
    pub credential_verification: Arc<CredentialVerification>,
    pub password_rotation: Arc<PasswordRotation>,
    pub name_update: Arc<NameUpdate>,
    pub email_update: Arc<EmailUpdate>,
    pub account_profile: Arc<AccountProfile>,
    pub session_start: Arc<SessionStart>,
    pub session_refresh: Arc<SessionRefresh>,
    pub expired_token_purge: Arc<ExpiredTokenPurge>,
    token_encryptor: Arc<dyn TokenEncryptor>,
}

impl ApplicationServices {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_encryptor: Arc<dyn TokenEncryptor>,
        token_generator: Arc<dyn UniqueTokenGenerator>,
        clock: Arc<dyn Clock>,
        refresh_ttl: Duration,
    ) -> Self {
        let account_registration = Arc::new(AccountRegistration::new(
            Arc::clone(&account_repo),
            Arc::clone(&password_hasher),
        ));
        let credential_verification = Arc::new(CredentialVerification::new(
            Arc::clone(&account_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_encryptor),
        ));
        let password_rotation = Arc::new(PasswordRotation::new(
            Arc::clone(&account_repo),
            Arc::clone(&password_hasher),
        ));
        let name_update = Arc::new(NameUpdate::new(Arc::clone(&account_repo)));
        let email_update = Arc::new(EmailUpdate::new(Arc::clone(&account_repo)));
        let account_profile = Arc::new(AccountProfile::new(Arc::clone(&account_repo)));

        let session_start = Arc::new(SessionStart::new(
            Arc::clone(&account_repo),
            Arc::clone(&refresh_token_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_encryptor),
            Arc::clone(&token_generator),
            Arc::clone(&clock),
            refresh_ttl,
        ));
        let session_refresh = Arc::new(SessionRefresh::new(
            Arc::clone(&refresh_token_repo),
            Arc::clone(&token_encryptor),
            Arc::clone(&token_generator),
            Arc::clone(&clock),
            refresh_ttl,
        ));
        let expired_token_purge = Arc::new(ExpiredTokenPurge::new(
            Arc::clone(&refresh_token_repo),
            Arc::clone(&clock),
        ));

        Self {
            account_registration,
            credential_verification,
            password_rotation,
            name_update,
            email_update,
            account_profile,
            session_start,
            session_refresh,
            expired_token_purge,
            token_encryptor,
        }
    }

    /// Port used by transports to authenticate bearer access tokens.
    pub fn token_encryptor(&self) -> Arc<dyn TokenEncryptor> {
        Arc::clone(&self.token_encryptor)
    }
}
