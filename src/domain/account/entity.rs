// src/domain/account/entity.rs
use crate::domain::account::value_objects::{AccountId, AccountName, Email, PasswordHash};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn set_password(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }

    pub fn rename(&mut self, name: AccountName) {
        self.name = name;
    }

    pub fn change_email(&mut self, email: Email) {
        self.email = email;
    }
}

/// Fields needed to create an account; the store assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: AccountName,
    pub email: Email,
    pub password_hash: PasswordHash,
}

impl NewAccount {
    pub fn new(name: AccountName, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }
}
