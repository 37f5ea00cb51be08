//! Printer listing, print job submission and job status on top of [`cloudprint_core::Client`].

mod jobs;
pub use jobs::{Job, UNKNOWN_JOB_STATUS};
mod print_client;
pub use print_client::{PrintClient, PrintClientExt};
mod printers;
pub use printers::Printer;
mod submit;
pub use submit::{PrintJobRequest, PrintJobResult, SubmitJobError};
