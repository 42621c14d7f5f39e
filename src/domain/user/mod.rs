//! User domain module.
//!
//! Users are owned by the external identity provider; this core only
//! reads their profiles.

mod profile;

pub use profile::UserProfile;
