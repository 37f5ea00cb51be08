use std::sync::Arc;

use reqwest_middleware::ClientWithMiddleware;

use super::internal::InternalClient;
use crate::{
    ApiError, Credentials,
    auth::{IdentityClient, TokenHandler},
    client::client_settings::ClientSettings,
    http::Dispatcher,
};

/// The main struct to interact with the Cloud Print SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Clones must share the same credentials, so any mutable state lives behind the `Arc`.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new client that owns its HTTP transport.
    pub fn new(
        settings: Option<ClientSettings>,
        credentials: Credentials,
    ) -> Result<Self, ApiError> {
        let settings = settings.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()?;
        let http_client = reqwest_middleware::ClientBuilder::new(http_client).build();

        Ok(Self::new_with_http_client(
            Some(settings),
            credentials,
            http_client,
        ))
    }

    /// Create a new client on top of an existing HTTP transport.
    ///
    /// The transport is used as is: default headers such as the user agent are up to the caller.
    pub fn new_with_http_client(
        settings: Option<ClientSettings>,
        credentials: Credentials,
        http_client: ClientWithMiddleware,
    ) -> Self {
        let settings = settings.unwrap_or_default();
        let dispatcher = Dispatcher::new(
            http_client,
            TokenHandler::new(credentials),
            settings.token_url(),
        );

        Self {
            internal: Arc::new(InternalClient {
                settings,
                dispatcher,
            }),
        }
    }

    /// Snapshot of the current credentials, including any renewed access token.
    pub fn credentials(&self) -> Credentials {
        self.internal.dispatcher.tokens().credentials()
    }

    /// Client for identity functionality.
    pub fn identity(&self) -> IdentityClient {
        IdentityClient::new(self.clone())
    }
}
