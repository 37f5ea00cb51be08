use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use cloudprint_core::{
    ApiError, ClientSettings,
    http::{Dispatcher, RequestBody, RequestOptions, read_json},
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SubmitJobError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The server accepted the request but refused to create the job. `response` holds the full
    /// parsed response body.
    #[error("Print job failed: {message}")]
    Rejected {
        message: String,
        error_code: Option<String>,
        response: Value,
    },
}

/// A document to submit to a printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJobRequest {
    #[allow(missing_docs)]
    pub printer_id: String,
    #[allow(missing_docs)]
    pub job_title: String,
    /// Raw document bytes. They are base64 encoded on submission.
    pub content: Vec<u8>,
    /// MIME type of the document, e.g. `application/pdf`.
    pub content_type: String,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJobResult {
    #[allow(missing_docs)]
    pub success: bool,
    #[allow(missing_docs)]
    pub job_id: Option<String>,
    #[allow(missing_docs)]
    pub error_code: Option<String>,
    #[allow(missing_docs)]
    pub error_message: Option<String>,
    /// The full parsed response body.
    pub response: Value,
}

#[derive(Serialize, Debug)]
struct SubmitJobRequestModel<'a> {
    printerid: &'a str,
    title: &'a str,
    #[serde(rename = "contentTransferEncoding")]
    content_transfer_encoding: &'static str,
    content: String,
    #[serde(rename = "contentType")]
    content_type: &'a str,
}

impl<'a> From<&'a PrintJobRequest> for SubmitJobRequestModel<'a> {
    fn from(request: &'a PrintJobRequest) -> Self {
        Self {
            printerid: &request.printer_id,
            title: &request.job_title,
            content_transfer_encoding: "base64",
            content: STANDARD.encode(&request.content),
            content_type: &request.content_type,
        }
    }
}

pub(super) async fn print_document(
    dispatcher: &Dispatcher,
    settings: &ClientSettings,
    request: &PrintJobRequest,
) -> Result<PrintJobResult, SubmitJobError> {
    debug!(
        printer_id = %request.printer_id,
        bytes = request.content.len(),
        "Submitting print job"
    );

    let body = RequestBody::form(&SubmitJobRequestModel::from(request))?;
    let response = dispatcher
        .send(
            Method::POST,
            &settings.cloudprint_endpoint("submit"),
            RequestOptions::default().body(body),
        )
        .await?;

    let response: Value = read_json(response).await?;
    parse_submit_response(response)
}

pub(super) async fn print_file(
    dispatcher: &Dispatcher,
    settings: &ClientSettings,
    printer_id: &str,
    job_title: &str,
    path: &Path,
    content_type: &str,
) -> Result<PrintJobResult, SubmitJobError> {
    let content = tokio::fs::read(path).await?;

    let request = PrintJobRequest {
        printer_id: printer_id.to_owned(),
        job_title: job_title.to_owned(),
        content,
        content_type: content_type.to_owned(),
    };
    print_document(dispatcher, settings, &request).await
}

fn parse_submit_response(response: Value) -> Result<PrintJobResult, SubmitJobError> {
    if is_success(response.get("success")) {
        let job_id = response
            .pointer("/job/id")
            .and_then(Value::as_str)
            .map(str::to_owned);

        return Ok(PrintJobResult {
            success: true,
            job_id,
            error_code: None,
            error_message: None,
            response,
        });
    }

    let message = response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let error_code = response.get("errorCode").and_then(|code| match code {
        Value::String(code) => Some(code.clone()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    });

    warn!(?error_code, %message, "Print job rejected");
    Err(SubmitJobError::Rejected {
        message,
        error_code,
        response,
    })
}

/// The API reports success as `true`, but older responses used `1`.
fn is_success(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>() == Ok(1.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_exposes_job_id() {
        let result = parse_submit_response(json!({ "success": 1, "job": { "id": "j1" } })).unwrap();

        assert!(result.success);
        assert_eq!(result.job_id.as_deref(), Some("j1"));
        assert_eq!(result.response["job"]["id"], "j1");
    }

    #[test]
    fn boolean_success_is_accepted() {
        let result =
            parse_submit_response(json!({ "success": true, "job": { "id": "j2" } })).unwrap();
        assert_eq!(result.job_id.as_deref(), Some("j2"));
    }

    #[test]
    fn failure_carries_message_and_response() {
        let err = parse_submit_response(json!({
            "success": 0,
            "message": "bad printer",
            "errorCode": 8,
        }))
        .unwrap_err();

        let SubmitJobError::Rejected {
            message,
            error_code,
            response,
        } = err
        else {
            panic!("expected a rejection");
        };
        assert_eq!(message, "bad printer");
        assert_eq!(error_code.as_deref(), Some("8"));
        assert_eq!(response["success"], 0);
    }

    #[test]
    fn only_numeric_string_one_counts_as_success() {
        assert!(parse_submit_response(json!({ "success": "1" })).is_ok());

        for success in ["true", "TRUE", "yes", "0"] {
            let err = parse_submit_response(json!({ "success": success, "message": "x" }))
                .unwrap_err();
            assert!(matches!(err, SubmitJobError::Rejected { .. }), "{success}");
        }
    }

    #[test]
    fn missing_success_is_a_rejection() {
        let err = parse_submit_response(json!({})).unwrap_err();
        assert!(matches!(err, SubmitJobError::Rejected { .. }));
    }

    #[test]
    fn request_model_encodes_content() {
        let request = PrintJobRequest {
            printer_id: "p1".to_string(),
            job_title: "title".to_string(),
            content: b"hello".to_vec(),
            content_type: "text/plain".to_string(),
        };

        let model = SubmitJobRequestModel::from(&request);
        assert_eq!(model.content, "aGVsbG8=");
        assert_eq!(model.content_transfer_encoding, "base64");
    }
}
