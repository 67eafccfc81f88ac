// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_account;
mod postgres_refresh_token;
mod redis_refresh_token;

pub use error::{map_redis, map_sqlx};
pub use memory::{InMemoryAccountRepository, InMemoryRefreshTokenRepository};
pub use postgres_account::PostgresAccountRepository;
pub use postgres_refresh_token::PostgresRefreshTokenRepository;
pub use redis_refresh_token::RedisRefreshTokenRepository;
