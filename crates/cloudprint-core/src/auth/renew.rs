//! Exchange of a refresh token for a new access token.

use chrono::{DateTime, Duration, Utc};
use reqwest::header;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ApiError, auth::Credentials};

#[derive(Serialize, Debug)]
pub(crate) struct RenewTokenRequest<'a> {
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
}

impl<'a> RenewTokenRequest<'a> {
    pub(crate) fn new(refresh_token: &'a str, client_id: &'a str, client_secret: &'a str) -> Self {
        Self {
            refresh_token,
            client_id,
            client_secret,
            grant_type: "refresh_token",
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct RenewTokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// A token handed out by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenewedToken {
    pub(crate) access_token: String,
    pub(crate) expires_in: Option<i64>,
}

impl RenewedToken {
    pub(crate) fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let secs = self.expires_in.filter(|secs| *secs > 0)?;
        now.checked_add_signed(Duration::try_seconds(secs)?)
    }
}

impl RenewTokenResponse {
    fn into_renewed(self) -> Option<RenewedToken> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        Some(RenewedToken {
            access_token,
            expires_in: self.expires_in,
        })
    }
}

/// Ask the token endpoint for a new access token.
///
/// Returns `Ok(None)` when the credentials cannot be refreshed or the server did not hand out a
/// usable token. A refused grant (any error status) is also `Ok(None)`, so callers only ever see
/// the 401 that triggered the renewal. Transport failures and undecodable bodies are returned as
/// errors.
pub(crate) async fn renew_token(
    http: &ClientWithMiddleware,
    token_url: &str,
    credentials: &Credentials,
) -> Result<Option<RenewedToken>, ApiError> {
    let Some((refresh_token, client_id, client_secret)) = credentials.refresh_grant() else {
        debug!("Credentials carry no refresh grant, skipping token renewal");
        return Ok(None);
    };

    let body = serde_json::to_string(&RenewTokenRequest::new(
        refresh_token,
        client_id,
        client_secret,
    ))?;

    let response = http
        .post(token_url)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        warn!(%status, "Token endpoint refused to renew the access token");
        return Ok(None);
    }

    let renewed = serde_json::from_str::<RenewTokenResponse>(&text)?.into_renewed();
    if renewed.is_none() {
        warn!("Token endpoint response did not contain an access token");
    }

    Ok(renewed)
}
