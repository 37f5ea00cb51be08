use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    ApiError, Client,
    http::{RequestOptions, read_json},
};

/// The OAuth2 userinfo document of the authenticated account.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserInfo {
    pub id: Option<String>,
    pub email: Option<String>,
    pub verified_email: Option<bool>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
    pub locale: Option<String>,

    /// Any other field returned by the endpoint.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Subclient containing identity functionality.
#[derive(Clone)]
pub struct IdentityClient {
    pub(crate) client: Client,
}

impl IdentityClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Look up the account the access token belongs to.
    pub async fn whoami(&self) -> Result<UserInfo, ApiError> {
        let internal = &self.client.internal;
        let response = internal
            .dispatcher()
            .send(
                Method::GET,
                &internal.get_settings().userinfo_url(),
                RequestOptions::default(),
            )
            .await?;

        read_json(response).await
    }
}
