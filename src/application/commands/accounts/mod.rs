// src/application/commands/accounts/mod.rs
mod authenticate;
mod change_password;
mod guards;
mod password;
mod register;
mod update_profile;

pub use authenticate::{AuthenticateCommand, CredentialVerification};
pub use change_password::{ChangePasswordCommand, PasswordRotation};
pub use register::{AccountRegistration, RegisterAccountCommand};
pub use update_profile::{EmailUpdate, NameUpdate, UpdateEmailCommand, UpdateNameCommand};

pub(crate) use guards::verify_credentials;
