use reqwest::{Method, StatusCode, header};
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, warn};

use super::RequestOptions;
use crate::{ApiError, auth::TokenHandler};

/// Issues authenticated requests against the Cloud Print API.
///
/// Every request carries `Authorization: Bearer <access token>`. When the server answers
/// `401 Unauthorized` the access token is renewed once and the request is issued once more with
/// the new token. All other failures are returned to the caller untouched.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    http: ClientWithMiddleware,
    tokens: TokenHandler,
    token_url: String,
}

impl Dispatcher {
    pub(crate) fn new(http: ClientWithMiddleware, tokens: TokenHandler, token_url: String) -> Self {
        Self {
            http,
            tokens,
            token_url,
        }
    }

    #[allow(missing_docs)]
    pub fn tokens(&self) -> &TokenHandler {
        &self.tokens
    }

    /// Send a request, renewing the access token once if the server rejects it.
    ///
    /// Any response with a success status is returned as is. Error statuses are converted into
    /// [`ApiError::ResponseContent`] carrying the response body.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        self.send_with_retry(method, url, options, true).await
    }

    async fn send_with_retry(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
        allow_retry: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.execute(method.clone(), url, &options).await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let error = response_error(response).await?;

            if status == StatusCode::UNAUTHORIZED && allow_retry {
                debug!(%url, "Access token rejected, attempting renewal");
                if self.tokens.renew(&self.http, &self.token_url).await? {
                    return Box::pin(self.send_with_retry(method, url, options, false)).await;
                }
                warn!(%url, "Access token could not be renewed");
            }

            return Err(error);
        }

        Ok(response)
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        debug!(%method, %url, "Sending request");

        let mut request = self
            .http
            .request(method, url)
            .headers(options.headers_for_send())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.tokens.access_token()),
            );

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = options.body.payload() {
            request = request.body(body);
        }

        request.send().await.map_err(|e| {
            warn!(%url, "Request failed before a response was received: {e}");
            ApiError::from(e)
        })
    }
}

async fn response_error(response: reqwest::Response) -> Result<ApiError, ApiError> {
    let status = response.status();
    let message = response.text().await?;

    Ok(ApiError::ResponseContent { status, message })
}
