// src/application/commands/sessions/mod.rs
mod issue;
mod purge;
mod refresh;
mod start;

pub use purge::ExpiredTokenPurge;
pub use refresh::{RefreshSessionCommand, SessionRefresh};
pub use start::{SessionStart, StartSessionCommand};
