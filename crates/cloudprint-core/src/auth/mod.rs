//! Credentials, token renewal and identity lookup.

mod credentials;
pub use credentials::Credentials;
mod identity;
pub use identity::{IdentityClient, UserInfo};
pub(crate) mod renew;
mod token_handler;
pub use token_handler::TokenHandler;
