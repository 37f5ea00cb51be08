use chrono::{DateTime, Utc};

use crate::EmptyAccessTokenError;

/// OAuth2 credentials used to authorize requests against the Cloud Print API.
///
/// Only [`Credentials::access_token`] and [`Credentials::token_expires_at`] change after
/// construction, and only when a refresh succeeds.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) access_token: String,
    pub(crate) token_expires_at: Option<DateTime<Utc>>,
    pub(crate) refresh_token: Option<String>,
    pub(crate) client_id: Option<String>,
    pub(crate) client_secret: Option<String>,
}

impl Credentials {
    /// Create credentials from an access token alone. Such credentials cannot be refreshed.
    pub fn new(access_token: impl Into<String>) -> Result<Self, EmptyAccessTokenError> {
        let access_token = access_token.into();
        if access_token.is_empty() {
            return Err(EmptyAccessTokenError);
        }

        Ok(Self {
            access_token,
            token_expires_at: None,
            refresh_token: None,
            client_id: None,
            client_secret: None,
        })
    }

    /// Attach the OAuth2 client and refresh token needed to renew the access token.
    pub fn with_refresh(
        mut self,
        refresh_token: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Record when the current access token expires.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.token_expires_at = Some(expires_at);
        self
    }

    #[allow(missing_docs)]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Expiry of the current access token, when the token endpoint reported one.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.token_expires_at
    }

    #[allow(missing_docs)]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    #[allow(missing_docs)]
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Returns the refresh grant `(refresh_token, client_id, client_secret)` if every part of it
    /// is present and non-empty.
    pub(crate) fn refresh_grant(&self) -> Option<(&str, &str, &str)> {
        fn non_empty(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        Some((
            non_empty(&self.refresh_token)?,
            non_empty(&self.client_id)?,
            non_empty(&self.client_secret)?,
        ))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"********")
            .field("token_expires_at", &self.token_expires_at)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "********"))
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "********"))
            .finish()
    }
}
