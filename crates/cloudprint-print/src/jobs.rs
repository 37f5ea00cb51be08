use cloudprint_core::{
    ApiError, ClientSettings,
    http::{Dispatcher, RequestOptions, read_json},
};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Status reported by [`PrintClient::job_status`](crate::PrintClient::job_status) for a job id
/// that is not in the job listing.
pub const UNKNOWN_JOB_STATUS: &str = "UNKNOWN";

/// A print job as reported by the job listing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Job {
    #[allow(missing_docs)]
    pub id: String,
    /// Job status, such as `QUEUED`, `IN_PROGRESS` or `DONE`.
    pub status: Option<String>,
    #[allow(missing_docs)]
    pub title: Option<String>,
    #[allow(missing_docs)]
    pub printer_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct JobResponseModel {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "printerid", default)]
    printer_id: Option<String>,
}

impl JobResponseModel {
    fn into_job(self) -> Option<Job> {
        Some(Job {
            id: self.id?,
            status: self.status,
            title: self.title,
            printer_id: self.printer_id,
        })
    }
}

#[derive(Deserialize, Debug, Default)]
struct JobsResponseModel {
    #[serde(default)]
    jobs: Option<Vec<JobResponseModel>>,
}

impl JobsResponseModel {
    /// Entries without an id cannot be matched and are skipped.
    fn into_jobs(self) -> Vec<Job> {
        self.jobs
            .unwrap_or_default()
            .into_iter()
            .filter_map(JobResponseModel::into_job)
            .collect()
    }
}

pub(super) async fn list_jobs(
    dispatcher: &Dispatcher,
    settings: &ClientSettings,
    printer_id: Option<&str>,
) -> Result<Vec<Job>, ApiError> {
    let mut options = RequestOptions::default();
    if let Some(printer_id) = printer_id {
        options = options.query("printerid", printer_id);
    }

    let response = dispatcher
        .send(Method::GET, &settings.cloudprint_endpoint("jobs"), options)
        .await?;

    let response: JobsResponseModel = read_json(response).await?;
    Ok(response.into_jobs())
}

pub(super) async fn job_status(
    dispatcher: &Dispatcher,
    settings: &ClientSettings,
    job_id: &str,
) -> Result<String, ApiError> {
    let jobs = list_jobs(dispatcher, settings, None).await?;
    Ok(find_status(jobs, job_id))
}

fn find_status(jobs: Vec<Job>, job_id: &str) -> String {
    jobs.into_iter()
        .find(|job| job.id == job_id)
        .and_then(|job| job.status)
        .unwrap_or_else(|| UNKNOWN_JOB_STATUS.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn jobs(value: serde_json::Value) -> Vec<Job> {
        serde_json::from_value::<JobsResponseModel>(value)
            .unwrap()
            .into_jobs()
    }

    #[test]
    fn finds_matching_job() {
        let jobs = jobs(json!({
            "jobs": [
                { "id": "j1", "status": "DONE" },
                { "id": "j42", "status": "IN_PROGRESS" },
            ]
        }));

        assert_eq!(find_status(jobs.clone(), "j42"), "IN_PROGRESS");
        assert_eq!(find_status(jobs, "j1"), "DONE");
    }

    #[test]
    fn unknown_job_is_sentinel() {
        let listed = jobs(json!({ "jobs": [{ "id": "j1", "status": "DONE" }] }));
        assert_eq!(find_status(listed, "j2"), UNKNOWN_JOB_STATUS);

        assert_eq!(find_status(jobs(json!({})), "j2"), UNKNOWN_JOB_STATUS);
    }

    #[test]
    fn skips_jobs_without_id() {
        let listed = jobs(json!({
            "jobs": [
                { "status": "DONE" },
                { "id": null, "status": "QUEUED" },
                { "id": "j42", "status": "IN_PROGRESS" },
            ]
        }));

        assert_eq!(listed.len(), 1);
        assert_eq!(find_status(listed, "j42"), "IN_PROGRESS");
    }

    #[test]
    fn null_status_is_unknown() {
        let listed = jobs(json!({ "jobs": [{ "id": "j42", "status": null }] }));

        assert_eq!(listed[0].status, None);
        assert_eq!(find_status(listed, "j42"), UNKNOWN_JOB_STATUS);
    }

    #[test]
    fn reads_optional_job_fields() {
        let listed = jobs(json!({
            "jobs": [{
                "id": "j1",
                "status": "QUEUED",
                "title": "Invoice",
                "printerid": "p1",
                "numberOfPages": 3,
            }]
        }));

        assert_eq!(
            listed,
            vec![Job {
                id: "j1".to_string(),
                status: Some("QUEUED".to_string()),
                title: Some("Invoice".to_string()),
                printer_id: Some("p1".to_string()),
            }]
        );
    }
}
