use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::Serialize;

use crate::ApiError;

/// Per-request options applied on top of the bearer token.
///
/// Options are kept by value so the exact same request can be issued again after the access token
/// has been renewed.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. An `Authorization` header set here is replaced by the client's bearer token.
    pub headers: HeaderMap,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    #[allow(missing_docs)]
    pub body: RequestBody,
}

impl RequestOptions {
    /// Add a query string pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[allow(missing_docs)]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// An already encoded request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    #[allow(missing_docs)]
    Empty,
    /// `application/json` encoded body.
    Json(String),
    /// `application/x-www-form-urlencoded` encoded body.
    Form(String),
}

impl RequestBody {
    /// Encode `value` as JSON.
    pub fn json(value: &impl Serialize) -> Result<Self, ApiError> {
        Ok(Self::Json(serde_json::to_string(value)?))
    }

    /// Encode `value` as a url encoded form.
    pub fn form(value: &impl Serialize) -> Result<Self, ApiError> {
        Ok(Self::Form(serde_qs::to_string(value)?))
    }

    pub(crate) fn content_type(&self) -> Option<HeaderValue> {
        match self {
            Self::Empty => None,
            Self::Json(_) => Some(HeaderValue::from_static("application/json")),
            Self::Form(_) => Some(HeaderValue::from_static(
                "application/x-www-form-urlencoded; charset=utf-8",
            )),
        }
    }

    pub(crate) fn payload(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Json(body) | Self::Form(body) => Some(body.clone()),
        }
    }
}

impl RequestOptions {
    /// Headers to send, with the content type of the body filled in unless already set.
    pub(crate) fn headers_for_send(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        headers.remove(header::AUTHORIZATION);
        if let Some(content_type) = self.body.content_type() {
            headers.entry(header::CONTENT_TYPE).or_insert(content_type);
        }
        headers
    }
}
