//! Core of the Cloud Print SDK.
//!
//! Holds the [`Client`], its [`ClientSettings`], the caller supplied [`Credentials`] and the
//! [`http::Dispatcher`] that every API call goes through. The dispatcher attaches the bearer token
//! and transparently renews it once when the server answers `401 Unauthorized`.

pub mod auth;
pub mod client;
mod error;
pub mod http;

pub use auth::{Credentials, IdentityClient, UserInfo};
pub use client::{Client, ClientSettings};
pub use error::{ApiError, EmptyAccessTokenError};
