mod profile;

pub use profile::{AccountProfile, AccountProfileQuery};
