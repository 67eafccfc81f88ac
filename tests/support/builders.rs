// tests/support/builders.rs
use account_core::domain::account::{AccountName, Email, NewAccount, PasswordHash};

use super::mocks::StrictPasswordHasher;

pub const ALICE_EMAIL: &str = "alice@example.com";
pub const ALICE_PASSWORD: &str = "correct horse";

/// Account whose stored hash matches `password` under [`StrictPasswordHasher`].
pub fn new_account(name: &str, email: &str, password: &str) -> NewAccount {
    NewAccount::new(
        AccountName::new(name).unwrap(),
        Email::new(email).unwrap(),
        PasswordHash::new(StrictPasswordHasher::hashed(password)).unwrap(),
    )
}

pub fn alice() -> NewAccount {
    new_account("Alice", ALICE_EMAIL, ALICE_PASSWORD)
}
