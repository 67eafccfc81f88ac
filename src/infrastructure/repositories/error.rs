use crate::domain::errors::DomainError;

const CNT_ACCOUNT_EMAIL: &str = "accounts_email_key";
const CNT_REFRESH_TOKEN_VALUE: &str = "refresh_tokens_token_key";
const CNT_REFRESH_TOKEN_ACCOUNT: &str = "refresh_tokens_user_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ACCOUNT_EMAIL => DomainError::Conflict("email already exists".into()),
                    CNT_REFRESH_TOKEN_VALUE => {
                        DomainError::Conflict("refresh token value already exists".into())
                    }
                    CNT_REFRESH_TOKEN_ACCOUNT => DomainError::NotFound("account not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

pub fn map_redis(err: redis::RedisError) -> DomainError {
    DomainError::Persistence(format!("redis: {err}"))
}
