// src/domain/refresh_token/mod.rs
pub mod entity;
pub mod repository;

pub use entity::{NewRefreshToken, RefreshToken, RefreshTokenId};
pub use repository::RefreshTokenRepository;
