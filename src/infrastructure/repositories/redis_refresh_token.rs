// src/infrastructure/repositories/redis_refresh_token.rs
use super::map_redis;
use crate::application::error::ApplicationError;
use crate::domain::account::AccountId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::refresh_token::{
    NewRefreshToken, RefreshToken, RefreshTokenId, RefreshTokenRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;
use std::collections::HashMap;

const DEFAULT_PREFIX: &str = "accounts";

// KEYS[1] record hash, KEYS[2] id index, KEYS[3] expiry set.
// ARGV: id, token, user_id, expires_in (µs since epoch).
const INSERT_SCRIPT: &str = r#"
    if redis.call('EXISTS', KEYS[1]) == 1 then
        return 0
    end
    redis.call('HSET', KEYS[1], 'id', ARGV[1], 'user_id', ARGV[3], 'expires_in', ARGV[4])
    redis.call('SET', KEYS[2], ARGV[2])
    redis.call('ZADD', KEYS[3], ARGV[4], ARGV[1])
    return 1
"#;

// KEYS[1] id index, KEYS[2] expiry set. ARGV[1] id, ARGV[2] record key prefix.
const DELETE_SCRIPT: &str = r#"
    local token = redis.call('GET', KEYS[1])
    if not token then
        return 0
    end
    redis.call('DEL', ARGV[2] .. token)
    redis.call('DEL', KEYS[1])
    redis.call('ZREM', KEYS[2], ARGV[1])
    return 1
"#;

// KEYS[1] expiry set. ARGV[1] cutoff (exclusive), ARGV[2] record key prefix,
// ARGV[3] id index prefix.
const PURGE_SCRIPT: &str = r#"
    local ids = redis.call('ZRANGEBYSCORE', KEYS[1], '-inf', '(' .. ARGV[1])
    for _, id in ipairs(ids) do
        local token = redis.call('GET', ARGV[3] .. id)
        if token then
            redis.call('DEL', ARGV[2] .. token)
        end
        redis.call('DEL', ARGV[3] .. id)
        redis.call('ZREM', KEYS[1], id)
    end
    return #ids
"#;

/// Refresh-token store on Redis. Each record is a hash keyed by the token
/// value, with a string index from record id to token and a sorted set of ids
/// scored by expiry for purging. Multi-key changes run as Lua scripts so they
/// are atomic on the server.
#[derive(Clone)]
pub struct RedisRefreshTokenRepository {
    pool: Pool,
    prefix: String,
}

impl RedisRefreshTokenRepository {
    /// Create a store from a redis URL (e.g. redis://:password@host:6379/0).
    pub fn from_url(url: &str) -> Result<Self, ApplicationError> {
        Self::with_prefix(url, DEFAULT_PREFIX)
    }

    /// Same as [`Self::from_url`] with every key placed under `prefix`.
    pub fn with_prefix(url: &str, prefix: impl Into<String>) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self {
            pool,
            prefix: prefix.into(),
        })
    }

    async fn conn(&self) -> DomainResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| DomainError::Persistence(format!("redis pool: {err}")))
    }

    fn record_prefix(&self) -> String {
        format!("{}:refresh_token:", self.prefix)
    }

    fn id_prefix(&self) -> String {
        format!("{}:refresh_token_id:", self.prefix)
    }

    fn record_key(&self, token: &str) -> String {
        format!("{}{token}", self.record_prefix())
    }

    fn id_key(&self, id: RefreshTokenId) -> String {
        format!("{}{id}", self.id_prefix())
    }

    fn expiry_key(&self) -> String {
        format!("{}:refresh_tokens_by_expiry", self.prefix)
    }
}

fn field<'a>(fields: &'a HashMap<String, String>, name: &str) -> DomainResult<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| DomainError::Persistence(format!("refresh token record lacks '{name}'")))
}

fn record_from_fields(token: &str, fields: &HashMap<String, String>) -> DomainResult<RefreshToken> {
    let id: RefreshTokenId = field(fields, "id")?.parse()?;
    let user_id: AccountId = field(fields, "user_id")?.parse()?;
    let micros: i64 = field(fields, "expires_in")?
        .parse()
        .map_err(|_| DomainError::Persistence("malformed refresh token expiry".into()))?;
    let expires_in = DateTime::<Utc>::from_timestamp_micros(micros)
        .ok_or_else(|| DomainError::Persistence("refresh token expiry out of range".into()))?;

    Ok(RefreshToken {
        id,
        token: token.to_owned(),
        user_id,
        expires_in,
    })
}

#[async_trait]
impl RefreshTokenRepository for RedisRefreshTokenRepository {
    async fn find_by_token(&self, token: &str) -> DomainResult<Option<RefreshToken>> {
        let mut conn = self.conn().await?;
        let fields: HashMap<String, String> = conn
            .hgetall(self.record_key(token))
            .await
            .map_err(map_redis)?;

        if fields.is_empty() {
            return Ok(None);
        }
        record_from_fields(token, &fields).map(Some)
    }

    async fn insert(&self, new_token: NewRefreshToken) -> DomainResult<RefreshToken> {
        let mut conn = self.conn().await?;
        let record = RefreshToken {
            id: RefreshTokenId::generate(),
            token: new_token.token,
            user_id: new_token.user_id,
            expires_in: new_token.expires_in,
        };

        let inserted: i32 = redis::cmd("EVAL")
            .arg(INSERT_SCRIPT)
            .arg(3)
            .arg(self.record_key(&record.token))
            .arg(self.id_key(record.id))
            .arg(self.expiry_key())
            .arg(record.id.to_string())
            .arg(&record.token)
            .arg(record.user_id.to_string())
            .arg(record.expires_in.timestamp_micros())
            .query_async(&mut conn)
            .await
            .map_err(map_redis)?;

        if inserted == 0 {
            return Err(DomainError::Conflict(
                "refresh token value already exists".into(),
            ));
        }
        Ok(record)
    }

    async fn delete_by_id(&self, id: RefreshTokenId) -> DomainResult<bool> {
        let mut conn = self.conn().await?;
        let deleted: i32 = redis::cmd("EVAL")
            .arg(DELETE_SCRIPT)
            .arg(2)
            .arg(self.id_key(id))
            .arg(self.expiry_key())
            .arg(id.to_string())
            .arg(self.record_prefix())
            .query_async(&mut conn)
            .await
            .map_err(map_redis)?;

        Ok(deleted == 1)
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> DomainResult<u64> {
        let mut conn = self.conn().await?;
        let purged: u64 = redis::cmd("EVAL")
            .arg(PURGE_SCRIPT)
            .arg(1)
            .arg(self.expiry_key())
            .arg(before.timestamp_micros())
            .arg(self.record_prefix())
            .arg(self.id_prefix())
            .query_async(&mut conn)
            .await
            .map_err(map_redis)?;

        Ok(purged)
    }
}
