use wiremock::{MockServer, ResponseTemplate, matchers::HeaderExactMatcher};

/// Helper for testing the Cloud Print API using wiremock. Returns the server and its base url.
///
/// Warning: when using `Mock::expected` ensure `server` is not dropped before the test completes.
pub async fn start_api_mock(mocks: Vec<wiremock::Mock>) -> (MockServer, String) {
    let server = MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let base_url = server.uri();
    (server, base_url)
}

/// Matches requests authorized with the given bearer token.
pub fn bearer(token: &str) -> HeaderExactMatcher {
    wiremock::matchers::header("Authorization", format!("Bearer {token}").as_str())
}

/// A successful response from the OAuth2 token endpoint.
pub fn token_response(access_token: &str, expires_in: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "token_type": "Bearer",
        "scope": "https://www.googleapis.com/auth/cloudprint",
    }))
}
