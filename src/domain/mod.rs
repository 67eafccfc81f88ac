pub mod account;
pub mod errors;
pub mod refresh_token;
