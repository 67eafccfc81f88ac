pub mod accounts;
pub mod auth;

pub use accounts::AccountDto;
pub use auth::{AccessClaims, AccessTokenDto, AuthenticationDto};
