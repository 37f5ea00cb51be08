use cloudprint_core::{
    ApiError, ClientSettings,
    http::{Dispatcher, RequestOptions, read_json},
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A printer registered with Cloud Print.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Printer {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub name: String,
    /// Human readable name.
    pub display_name: String,
    /// Connection status, such as `ONLINE` or `OFFLINE`.
    pub status: String,
}

#[derive(Deserialize, Debug)]
struct PrinterResponseModel {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(rename = "connectionStatus", default)]
    connection_status: Option<String>,
}

impl From<PrinterResponseModel> for Printer {
    fn from(printer: PrinterResponseModel) -> Self {
        Self {
            id: printer.id,
            name: printer.name.unwrap_or_default(),
            display_name: printer.display_name.unwrap_or_default(),
            status: printer.connection_status.unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
struct SearchResponseModel {
    #[serde(default)]
    printers: Option<Vec<PrinterResponseModel>>,
}

pub(super) async fn list_printers_raw(
    dispatcher: &Dispatcher,
    settings: &ClientSettings,
) -> Result<Value, ApiError> {
    let response = dispatcher
        .send(
            Method::GET,
            &settings.cloudprint_endpoint("search"),
            RequestOptions::default(),
        )
        .await?;

    read_json(response).await
}

pub(super) async fn list_printers(
    dispatcher: &Dispatcher,
    settings: &ClientSettings,
) -> Result<Vec<Printer>, ApiError> {
    let raw = list_printers_raw(dispatcher, settings).await?;
    parse_printers(raw)
}

fn parse_printers(raw: Value) -> Result<Vec<Printer>, ApiError> {
    let response: SearchResponseModel = serde_json::from_value(raw)?;

    Ok(response
        .printers
        .unwrap_or_default()
        .into_iter()
        .map(Printer::from)
        .collect())
}
