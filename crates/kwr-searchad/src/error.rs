use thiserror::Error;

/// Errors returned by the keyword statistics client.
#[derive(Debug, Error)]
pub enum SearchAdError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("keyword API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request signing failed: {0}")]
    Signature(String),

    /// The submitted text has no sentence long enough to search for.
    #[error("no sentence longer than {min_chars} characters to check")]
    NoCheckableSentences { min_chars: usize },
}
