//! Authenticated request dispatch.

mod dispatcher;
mod request;

pub use dispatcher::Dispatcher;
pub use request::{RequestBody, RequestOptions};

use serde::de::DeserializeOwned;

use crate::ApiError;

/// Read a response body and decode it as JSON.
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
