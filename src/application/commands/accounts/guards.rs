// Steps shared by several account and session use cases.
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::security::PasswordHasher,
    },
    domain::account::{Account, AccountRepository, Email},
};
use tracing::{debug, warn};

/// Look the account up by email and check `password` against its stored hash.
pub(crate) async fn verify_credentials(
    account_repo: &dyn AccountRepository,
    password_hasher: &dyn PasswordHasher,
    email: &Email,
    password: &str,
) -> ApplicationResult<Account> {
    let account = account_repo
        .find_by_email(email)
        .await?
        .ok_or(ApplicationError::AccountNotFoundByEmail)?;

    ensure_password_matches(password_hasher, &account, password).await?;

    Ok(account)
}

pub(super) async fn ensure_password_matches(
    password_hasher: &dyn PasswordHasher,
    account: &Account,
    password: &str,
) -> ApplicationResult<()> {
    if password_hasher
        .verify(password, account.password_hash.as_str())
        .await?
    {
        return Ok(());
    }

    warn!(account_id = %account.id, "password verification failed");
    Err(ApplicationError::WrongPassword)
}

pub(super) async fn ensure_email_available(
    account_repo: &dyn AccountRepository,
    email: &Email,
) -> ApplicationResult<()> {
    if account_repo.exists_by_email(email).await? {
        debug!("email is already registered to another account");
        return Err(ApplicationError::AccountAlreadyExists);
    }

    Ok(())
}
