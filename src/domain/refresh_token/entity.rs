// src/domain/refresh_token/entity.rs
use crate::domain::account::AccountId;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefreshTokenId(Uuid);

impl RefreshTokenId {
    pub fn new(id: Uuid) -> DomainResult<Self> {
        if id.is_nil() {
            return Err(DomainError::Validation(
                "refresh token id cannot be nil".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RefreshTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RefreshTokenId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Uuid::parse_str(s)
            .map_err(|_| DomainError::Validation(format!("invalid refresh token id '{s}'")))?;
        Self::new(id)
    }
}

#[derive(Clone)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    pub token: String,
    pub user_id: AccountId,
    pub expires_in: DateTime<Utc>,
}

impl RefreshToken {
    /// Validity is boundary-inclusive: the token still works at exactly
    /// `expires_in` and stops working at any later instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_in
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshToken")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    pub token: String,
    pub user_id: AccountId,
    pub expires_in: DateTime<Utc>,
}

impl NewRefreshToken {
    pub fn new(
        token: impl Into<String>,
        user_id: AccountId,
        expires_in: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::Validation(
                "refresh token value cannot be empty".into(),
            ));
        }
        Ok(Self {
            token,
            user_id,
            expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn token_expiring_at(expires_in: DateTime<Utc>) -> RefreshToken {
        RefreshToken {
            id: RefreshTokenId::generate(),
            token: "abc".into(),
            user_id: AccountId::generate(),
            expires_in,
        }
    }

    #[test]
    fn valid_at_exact_expiry_instant() {
        let expiry = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let token = token_expiring_at(expiry);

        assert!(!token.is_expired_at(expiry - Duration::seconds(1)));
        assert!(!token.is_expired_at(expiry));
        assert!(token.is_expired_at(expiry + Duration::milliseconds(1)));
    }

    #[test]
    fn new_token_rejects_empty_value() {
        let expiry = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(NewRefreshToken::new("", AccountId::generate(), expiry).is_err());
    }

    #[test]
    fn debug_output_hides_token_value() {
        let expiry = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let token = token_expiring_at(expiry);
        assert!(!format!("{token:?}").contains("\"abc\""));
    }
}
