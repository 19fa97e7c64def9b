use thiserror::Error;

/// Failures of the two feature endpoints, split the way the UI reports them.
#[derive(Debug, Error)]
pub enum FeatureApiError {
    /// Non-2xx response. `message` is the server-supplied error when the body
    /// carried one, otherwise the generic fallback.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Request-level failure (connect, DNS, aborted body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx body that does not parse as the expected shape.
    #[error("malformed {context} response: {source}")]
    MalformedResponse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FeatureApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
