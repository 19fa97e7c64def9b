use serde::{Deserialize, Serialize};

/// Fallback shown when a failed upload carries no server-supplied message.
pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed.";

/// Wire body of a non-2xx `/upload` response. The `error` field is optional;
/// absent means the caller falls back to [`GENERIC_UPLOAD_FAILURE`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message_or_default(self) -> String {
        self.error
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| GENERIC_UPLOAD_FAILURE.to_string())
    }
}
