// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod repos;
pub mod security;
pub mod time;
pub mod util;

pub use repos::{SpyAccountRepo, SpyRefreshTokenRepo};
pub use security::{FakeTokenEncryptor, StrictPasswordHasher};
pub use time::fixed_now;
pub use util::SequentialTokenGenerator;
