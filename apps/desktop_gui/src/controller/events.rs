//! Backend-to-UI events and error modeling for the dashboard controller.

use client_core::FeatureApiError;
use shared::domain::FeatureRecord;

pub enum UiEvent {
    /// Worker lifecycle or progress note for the status line.
    BackendInfo(String),
    /// Initial fetch finished; replaces the whole dashboard state.
    FeaturesLoaded(Vec<FeatureRecord>),
    /// One upload finished; the analyzed record joins the dashboard state.
    FeatureAnalyzed(FeatureRecord),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorKind {
    /// Non-2xx endpoint response carrying a server message (or the fallback).
    Server,
    /// Request-level network failure.
    Network,
    /// A 2xx body that did not parse as the expected shape.
    Malformed,
    /// Worker-local failure (runtime startup, file read).
    Worker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    InitialLoad,
    Upload,
    BackendStartup,
}

#[derive(Debug, Clone)]
pub struct UiError {
    kind: UiErrorKind,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api_error(context: UiErrorContext, err: &FeatureApiError) -> Self {
        let kind = match err {
            FeatureApiError::Server { .. } => UiErrorKind::Server,
            FeatureApiError::Network(_) => UiErrorKind::Network,
            FeatureApiError::MalformedResponse { .. } => UiErrorKind::Malformed,
        };
        Self {
            kind,
            context,
            message: err.to_string(),
        }
    }

    pub fn worker(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            kind: UiErrorKind::Worker,
            context,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> UiErrorKind {
        self.kind
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text for the status line next to the affordance that failed. Server
    /// messages pass through verbatim; network failures get the generic
    /// message (the detail is already in the log).
    pub fn status_text(&self) -> String {
        match (self.context, self.kind) {
            (UiErrorContext::Upload, UiErrorKind::Server) => self.message.clone(),
            (UiErrorContext::Upload, UiErrorKind::Network) => "Error during upload.".to_string(),
            (UiErrorContext::Upload, UiErrorKind::Malformed) => {
                "Analysis finished but the response was malformed.".to_string()
            }
            (UiErrorContext::Upload, UiErrorKind::Worker) => self.message.clone(),
            (UiErrorContext::InitialLoad, _) => {
                format!("Failed to load features: {}", self.message)
            }
            (UiErrorContext::BackendStartup, _) => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(message: &str) -> FeatureApiError {
        FeatureApiError::Server {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn upload_server_message_passes_through_verbatim() {
        let err = UiError::from_api_error(
            UiErrorContext::Upload,
            &server_error("Unsupported file type"),
        );
        assert_eq!(err.kind(), UiErrorKind::Server);
        assert_eq!(err.status_text(), "Unsupported file type");
    }

    #[test]
    fn malformed_analysis_body_gets_a_dedicated_message() {
        let parse_err = serde_json::from_str::<shared::domain::FeatureRecord>("{}")
            .expect_err("must fail");
        let err = UiError::from_api_error(
            UiErrorContext::Upload,
            &FeatureApiError::MalformedResponse {
                context: "analysis",
                source: parse_err,
            },
        );
        assert_eq!(err.kind(), UiErrorKind::Malformed);
        assert_eq!(
            err.status_text(),
            "Analysis finished but the response was malformed."
        );
    }

    #[test]
    fn initial_load_failures_prefix_the_cause() {
        let err = UiError::from_api_error(
            UiErrorContext::InitialLoad,
            &server_error("feature list request failed with status 500"),
        );
        assert_eq!(
            err.status_text(),
            "Failed to load features: feature list request failed with status 500"
        );
    }
}
