//! Shared ownership of the client [`Credentials`].

use std::sync::{Arc, RwLock};

use chrono::Utc;
use reqwest_middleware::ClientWithMiddleware;
use tracing::info;

use super::renew::{RenewedToken, renew_token};
use crate::{ApiError, auth::Credentials};

/// Owns the credentials of a client and renews the access token on request.
///
/// Clones share the same credentials. The lock is never held across an await point, so two
/// requests failing at the same time may both renew the token; the last renewal wins.
#[derive(Clone, Debug)]
pub struct TokenHandler {
    inner: Arc<RwLock<Credentials>>,
}

impl TokenHandler {
    #[allow(missing_docs)]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(credentials)),
        }
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.read().clone()
    }

    /// The bearer token to attach to the next request.
    pub fn access_token(&self) -> String {
        self.read().access_token.clone()
    }

    /// Renew the access token through the token endpoint at `token_url`.
    ///
    /// Returns `true` if a new token was stored. The credentials are left untouched otherwise.
    pub async fn renew(
        &self,
        http: &ClientWithMiddleware,
        token_url: &str,
    ) -> Result<bool, ApiError> {
        let credentials = self.credentials();

        match renew_token(http, token_url, &credentials).await? {
            Some(renewed) => {
                self.apply(renewed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn apply(&self, renewed: RenewedToken) {
        let expires_at = renewed.expires_at(Utc::now());

        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.access_token = renewed.access_token;
        if expires_at.is_some() {
            inner.token_expires_at = expires_at;
        }
        info!(expires_at = ?inner.token_expires_at, "Renewed access token");
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Credentials> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }
}
