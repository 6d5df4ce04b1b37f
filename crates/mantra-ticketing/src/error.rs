use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketingError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Discovery API answered with a non-2xx status.
    #[error("Discovery API returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("normalization error for event {event_id}: {reason}")]
    Normalization { event_id: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
