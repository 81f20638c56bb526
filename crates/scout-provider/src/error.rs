use thiserror::Error;

/// Errors returned by the provider API client.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success HTTP status. The raw body is
    /// carried for diagnostics.
    #[error("provider API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
