// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("an account with this email already exists")]
    AccountAlreadyExists,

    #[error("no account found with the provided email")]
    AccountNotFoundByEmail,

    #[error("no account found with the provided id")]
    AccountNotFoundById,

    #[error("wrong password")]
    WrongPassword,

    #[error("refresh token not found")]
    RefreshTokenNotFound,

    #[error("refresh token expired")]
    RefreshTokenExpired,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }
}
