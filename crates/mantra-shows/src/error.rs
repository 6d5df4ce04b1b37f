use thiserror::Error;

/// Every way a show lookup can fail, each mapped to one HTTP status.
#[derive(Debug, Error)]
pub enum ShowsError {
    /// No Ticketmaster API key is configured. Operator-fixable only.
    #[error("Ticketmaster API not configured")]
    NotConfigured,

    #[error("Valid 5-digit zip code required")]
    InvalidZip,

    /// The geocoder could not resolve a well-formed zip. Reported as a
    /// client error even when the lookup service itself failed.
    #[error("Could not locate that zip code")]
    ZipNotFound,

    /// The events API answered with a non-success status.
    #[error("Failed to fetch shows")]
    Upstream { status: u16, body: String },

    #[error("Server error")]
    Unexpected(String),
}

/// Failures while wiring a [`crate::ShowFinder`] from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoder setup failed: {0}")]
    Geocode(#[from] mantra_geocode::GeocodeError),

    #[error("ticketing client setup failed: {0}")]
    Ticketing(#[from] mantra_ticketing::TicketingError),
}

impl ShowsError {
    /// HTTP status code this error is reported with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidZip | Self::ZipNotFound => 400,
            Self::Unexpected(_) => 500,
            Self::Upstream { .. } => 502,
            Self::NotConfigured => 503,
        }
    }

    /// Message safe to show to end users. Upstream bodies and internal
    /// causes never appear here.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<mantra_ticketing::TicketingError> for ShowsError {
    fn from(err: mantra_ticketing::TicketingError) -> Self {
        match err {
            mantra_ticketing::TicketingError::UpstreamStatus { status, body } => {
                Self::Upstream { status, body }
            }
            other => Self::Unexpected(other.to_string()),
        }
    }
}
