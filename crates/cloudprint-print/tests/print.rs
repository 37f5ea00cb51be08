use std::io::Write;

use cloudprint_core::{Client, ClientSettings, Credentials};
use cloudprint_print::{
    PrintClientExt, PrintJobRequest, Printer, SubmitJobError, UNKNOWN_JOB_STATUS,
};
use cloudprint_test::{bearer, start_api_mock, token_response};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

fn client(base_url: &str) -> Client {
    let settings = ClientSettings {
        identity_url: base_url.to_string(),
        cloudprint_url: format!("{base_url}/cloudprint"),
        ..ClientSettings::default()
    };
    let credentials = Credentials::new("old-token")
        .unwrap()
        .with_refresh("refresh", "client", "secret");

    Client::new(Some(settings), credentials).unwrap()
}

fn search_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "printers": [{
            "id": "p1",
            "name": "n1",
            "displayName": "D1",
            "connectionStatus": "ONLINE",
        }]
    }))
}

#[tokio::test]
async fn lists_printers() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/search"))
            .and(bearer("old-token"))
            .respond_with(search_response())
            .expect(1),
    ])
    .await;

    let printers = client(&base_url).print().list_printers().await.unwrap();

    assert_eq!(
        printers,
        vec![Printer {
            id: "p1".to_string(),
            name: "n1".to_string(),
            display_name: "D1".to_string(),
            status: "ONLINE".to_string(),
        }]
    );
}

#[tokio::test]
async fn empty_search_lists_no_printers() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({}))),
    ])
    .await;

    let client = client(&base_url);
    assert!(client.print().list_printers().await.unwrap().is_empty());
    assert_eq!(
        client.print().list_printers_raw().await.unwrap(),
        serde_json::json!({})
    );
}

#[tokio::test]
async fn expired_token_is_renewed_transparently() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/search"))
            .and(bearer("old-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1),
        Mock::given(method("POST"))
            .and(path("/oauth2/v4/token"))
            .respond_with(token_response("new-token", 3600))
            .expect(1),
        Mock::given(method("GET"))
            .and(path("/cloudprint/search"))
            .and(bearer("new-token"))
            .respond_with(search_response())
            .expect(1),
    ])
    .await;

    let client = client(&base_url);
    let printers = client.print().list_printers().await.unwrap();

    assert_eq!(printers.len(), 1);
    assert_eq!(client.credentials().access_token(), "new-token");
    assert!(client.credentials().token_expires_at().is_some());
}

#[tokio::test]
async fn submits_form_encoded_document() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("POST"))
            .and(path("/cloudprint/submit"))
            .and(bearer("old-token"))
            .and(header(
                "Content-Type",
                "application/x-www-form-urlencoded; charset=utf-8",
            ))
            .and(body_string_contains("printerid=p1"))
            .and(body_string_contains("title=invoice"))
            .and(body_string_contains("contentTransferEncoding=base64"))
            .and(body_string_contains("content=aGVsbG8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": 1,
                "job": { "id": "j1" },
            })))
            .expect(1),
    ])
    .await;

    let request = PrintJobRequest {
        printer_id: "p1".to_string(),
        job_title: "invoice".to_string(),
        content: b"hello".to_vec(),
        content_type: "text/plain".to_string(),
    };
    let result = client(&base_url)
        .print()
        .print_document(&request)
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.job_id.as_deref(), Some("j1"));
}

#[tokio::test]
async fn rejected_submission_carries_server_message() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("POST"))
            .and(path("/cloudprint/submit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": 0,
                "message": "bad printer",
            }))),
    ])
    .await;

    let request = PrintJobRequest {
        printer_id: "missing".to_string(),
        job_title: "invoice".to_string(),
        content: b"hello".to_vec(),
        content_type: "text/plain".to_string(),
    };
    let err = client(&base_url)
        .print()
        .print_document(&request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitJobError::Rejected { ref message, .. } if message == "bad printer"
    ));
}

#[tokio::test]
async fn prints_file_contents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"hello").unwrap();

    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("POST"))
            .and(path("/cloudprint/submit"))
            .and(body_string_contains("content=aGVsbG8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "job": { "id": "j7" },
            })))
            .expect(1),
    ])
    .await;

    let result = client(&base_url)
        .print()
        .print_file("p1", "notes", file.path(), "text/plain")
        .await
        .unwrap();

    assert_eq!(result.job_id.as_deref(), Some("j7"));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let (_server, base_url) = start_api_mock(vec![]).await;

    let err = client(&base_url)
        .print()
        .print_file(
            "p1",
            "notes",
            std::path::Path::new("/does/not/exist.pdf"),
            "application/pdf",
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitJobError::Io(_)));
}

#[tokio::test]
async fn reports_job_status() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jobs": [
                    { "id": "j1", "status": "DONE" },
                    { "id": "j42", "status": "IN_PROGRESS" },
                ]
            }))),
    ])
    .await;

    let print = client(&base_url).print();
    assert_eq!(print.job_status("j42").await.unwrap(), "IN_PROGRESS");
    assert_eq!(print.job_status("j43").await.unwrap(), UNKNOWN_JOB_STATUS);
}

#[tokio::test]
async fn job_status_skips_malformed_entries() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jobs": [
                    { "status": "DONE" },
                    { "id": "j7", "status": null },
                    { "id": "j42", "status": "IN_PROGRESS" },
                ]
            }))),
    ])
    .await;

    let print = client(&base_url).print();
    assert_eq!(print.job_status("j42").await.unwrap(), "IN_PROGRESS");
    assert_eq!(print.job_status("j7").await.unwrap(), UNKNOWN_JOB_STATUS);
}

#[tokio::test]
async fn lists_jobs_of_one_printer() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/jobs"))
            .and(query_param("printerid", "p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jobs": [{ "id": "j1", "status": "QUEUED", "printerid": "p1" }]
            })))
            .expect(1),
    ])
    .await;

    let jobs = client(&base_url).print().list_jobs(Some("p1")).await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].printer_id.as_deref(), Some("p1"));
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let (_server, base_url) = start_api_mock(vec![
        Mock::given(method("GET"))
            .and(path("/cloudprint/jobs"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .expect(1),
        Mock::given(method("POST"))
            .and(path("/oauth2/v4/token"))
            .respond_with(token_response("new-token", 3600))
            .expect(0),
    ])
    .await;

    let err = client(&base_url).print().job_status("j1").await.unwrap_err();

    assert_eq!(
        err.status(),
        Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    );
}
