use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the targets of the Cloud Print
/// client. They are optional and uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use cloudprint_core::ClientSettings;
/// let settings = ClientSettings {
///     identity_url: "https://www.googleapis.com".to_string(),
///     cloudprint_url: "https://www.google.com/cloudprint".to_string(),
///     user_agent: "Cloud Print Rust-SDK".to_string(),
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// Base url of the OAuth2 token and userinfo endpoints. Defaults to `https://www.googleapis.com`
    pub identity_url: String,
    /// Base url of the Cloud Print API. Defaults to `https://www.google.com/cloudprint`
    pub cloudprint_url: String,
    /// The user_agent to send with every request. Defaults to `Cloud Print Rust-SDK`
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            identity_url: "https://www.googleapis.com".into(),
            cloudprint_url: "https://www.google.com/cloudprint".into(),
            user_agent: "Cloud Print Rust-SDK".into(),
        }
    }
}

impl ClientSettings {
    /// OAuth2 token endpoint used to renew access tokens.
    pub fn token_url(&self) -> String {
        join(&self.identity_url, "oauth2/v4/token")
    }

    /// OAuth2 userinfo endpoint.
    pub fn userinfo_url(&self) -> String {
        join(&self.identity_url, "oauth2/v2/userinfo")
    }

    /// Url of a Cloud Print API operation, such as `search` or `submit`.
    pub fn cloudprint_endpoint(&self, operation: &str) -> String {
        join(&self.cloudprint_url, operation)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
