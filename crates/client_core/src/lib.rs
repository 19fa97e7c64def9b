//! Core of the audio-feature dashboard: the canonical record sequence, the
//! pure classification/sort/view logic, and the HTTP client for the two
//! external endpoints (`GET /api/features`, `POST /upload`).
//!
//! Nothing here touches a UI toolkit; the desktop front end drives this crate
//! through a command/event bridge.

use reqwest::multipart;
use reqwest::Client;
use shared::{domain::FeatureRecord, error::ErrorBody};
use tracing::debug;

pub mod classify;
pub mod error;
pub mod sort;
pub mod view;

pub use error::FeatureApiError;
pub use sort::{sorted_records, SortMode};

/// Canonical, append-only sequence of analyzed files. Created empty, replaced
/// wholesale by the initial fetch, extended by one record per successful
/// upload. Display ordering is always derived from a copy (see [`sort`]);
/// nothing reorders or removes entries here.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    records: Vec<FeatureRecord>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, records: Vec<FeatureRecord>) {
        self.records = records;
    }

    pub fn append(&mut self, record: FeatureRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted copy of the canonical sequence for display.
    pub fn sorted(&self, mode: SortMode) -> Vec<FeatureRecord> {
        sorted_records(&self.records, mode)
    }
}

/// A local audio file staged for analysis.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Client for the external feature endpoints. Deliberately built without a
/// request timeout: a stalled request keeps its UI affordance in the pending
/// state, matching the dashboard's contract.
#[derive(Debug, Clone)]
pub struct FeatureClient {
    http: Client,
    server_url: String,
}

impl FeatureClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            server_url,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Fetches the full feature list. Consumed once at startup to initialize
    /// the dashboard state.
    pub async fn fetch_features(&self) -> Result<Vec<FeatureRecord>, FeatureApiError> {
        let url = format!("{}/api/features", self.server_url);
        debug!(%url, "fetching feature list");
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeatureApiError::Server {
                status: status.as_u16(),
                message: format!("feature list request failed with status {}", status.as_u16()),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FeatureApiError::MalformedResponse {
            context: "feature list",
            source,
        })
    }

    /// Submits one file for analysis as the single multipart part `file` and
    /// returns the computed record. Non-2xx responses surface the server's
    /// `error` message when present, the generic fallback otherwise.
    pub async fn upload(&self, upload: AudioUpload) -> Result<FeatureRecord, FeatureApiError> {
        let url = format!("{}/upload", self.server_url);
        debug!(%url, filename = %upload.filename, "uploading audio for analysis");

        let mut part = multipart::Part::bytes(upload.bytes).file_name(upload.filename);
        if let Some(mime_type) = &upload.mime_type {
            part = part.mime_str(mime_type)?;
        }
        let form = multipart::Form::new().part("file", part);

        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .unwrap_or_default()
                .message_or_default();
            return Err(FeatureApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FeatureApiError::MalformedResponse {
            context: "analysis",
            source,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
