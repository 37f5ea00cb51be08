use std::path::Path;

use cloudprint_core::{ApiError, Client};
use serde_json::Value;

use crate::{
    Job, PrintJobRequest, PrintJobResult, Printer, SubmitJobError, jobs, printers, submit,
};

/// Subclient containing printer and print job functionality.
#[derive(Clone)]
pub struct PrintClient {
    client: Client,
}

impl PrintClient {
    fn new(client: Client) -> Self {
        Self { client }
    }

    /// Search response of the printer listing, as returned by the server.
    pub async fn list_printers_raw(&self) -> Result<Value, ApiError> {
        let internal = &self.client.internal;
        printers::list_printers_raw(internal.dispatcher(), internal.get_settings()).await
    }

    /// List the printers available to the account. Returns an empty list if there are none.
    pub async fn list_printers(&self) -> Result<Vec<Printer>, ApiError> {
        let internal = &self.client.internal;
        printers::list_printers(internal.dispatcher(), internal.get_settings()).await
    }

    /// Submit a document to a printer.
    ///
    /// The request is not validated locally. An unknown printer or unsupported content type is
    /// reported by the server as [`SubmitJobError::Rejected`].
    pub async fn print_document(
        &self,
        request: &PrintJobRequest,
    ) -> Result<PrintJobResult, SubmitJobError> {
        let internal = &self.client.internal;
        submit::print_document(internal.dispatcher(), internal.get_settings(), request).await
    }

    /// Read a file and submit its contents to a printer.
    pub async fn print_file(
        &self,
        printer_id: &str,
        job_title: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<PrintJobResult, SubmitJobError> {
        let internal = &self.client.internal;
        submit::print_file(
            internal.dispatcher(),
            internal.get_settings(),
            printer_id,
            job_title,
            path,
            content_type,
        )
        .await
    }

    /// List print jobs, optionally only those of one printer.
    pub async fn list_jobs(&self, printer_id: Option<&str>) -> Result<Vec<Job>, ApiError> {
        let internal = &self.client.internal;
        jobs::list_jobs(internal.dispatcher(), internal.get_settings(), printer_id).await
    }

    /// Status of a print job, or [`UNKNOWN_JOB_STATUS`](crate::UNKNOWN_JOB_STATUS) if the job is
    /// not listed.
    pub async fn job_status(&self, job_id: &str) -> Result<String, ApiError> {
        let internal = &self.client.internal;
        jobs::job_status(internal.dispatcher(), internal.get_settings(), job_id).await
    }
}

/// Extension trait for `Client` to provide access to the `PrintClient`.
pub trait PrintClientExt {
    /// Creates a new `PrintClient` instance.
    fn print(&self) -> PrintClient;
}

impl PrintClientExt for Client {
    fn print(&self) -> PrintClient {
        PrintClient::new(self.clone())
    }
}
