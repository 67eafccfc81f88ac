use crate::domain::errors::{DomainError, DomainResult};

// Bounds the input of a single hashing call.
pub(super) const MAX_PASSWORD_BYTES: usize = 1024;

pub(super) fn validate_password(password: &str) -> DomainResult<()> {
    if password.is_empty() {
        return Err(DomainError::Validation("password cannot be empty".into()));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(DomainError::Validation(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    Ok(())
}
