use thiserror::Error;

/// Reasons a zip lookup produced no coordinates.
///
/// These never reach callers of [`crate::ZipGeocoder::resolve_zip`]; they
/// are logged and collapsed to "not found".
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} for zip {zip}")]
    UnexpectedStatus { status: u16, zip: String },

    #[error("JSON deserialization error for zip {zip}: {source}")]
    Deserialize {
        zip: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no places listed for zip {0}")]
    NoPlaces(String),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
