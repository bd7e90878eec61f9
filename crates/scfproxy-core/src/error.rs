//! Error types for proxy event translation.

/// Errors raised while translating between proxy events and HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The event could not be turned into a valid HTTP request: bad method,
    /// malformed URL, or an invalid header name/value.
    #[error("could not convert request {method}:{path} to http request: {source}")]
    InvalidRequest {
        /// Method as found in the event.
        method: String,
        /// Path as found in the event.
        path: String,
        /// Underlying `http` construction error.
        #[source]
        source: http::Error,
    },

    /// The request carries no API Gateway context header.
    #[error("no context header in request")]
    MissingContext,

    /// The context header is present but is not a valid gateway context, or
    /// the context could not be encoded into it.
    #[error("API Gateway context JSON error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The response was finalized before any status was set or body written.
    #[error("status code not set on response")]
    StatusNotSet,
}

/// Convenience result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;
