use thiserror::Error;

/// Errors returned by the AEM client and the product-tree walker.
#[derive(Debug, Error)]
pub enum AemError {
    /// Network or TLS failure from the underlying HTTP client, including
    /// non-2xx responses (a 401 from bad credentials surfaces here).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured instance URL could not be parsed.
    #[error("invalid AEM instance URL '{0}'")]
    InvalidBaseUrl(String),

    /// A response body or product node could not be deserialized into the
    /// expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A node in the tree violates the export conventions (for example a
    /// product leaf whose price is neither a number nor a string).
    #[error("malformed node at {path}: {reason}")]
    MalformedNode { path: String, reason: String },
}
