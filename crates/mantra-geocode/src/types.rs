//! Zippopotam.us response shapes.

use serde::Deserialize;

/// Latitude/longitude for a postal code.
///
/// Kept as the upstream decimal strings so they can be forwarded verbatim
/// as a `latlong` query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub lat: String,
    pub lon: String,
}

impl Coordinates {
    /// `"lat,lon"`, the form the Discovery API expects.
    #[must_use]
    pub fn latlong(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// `GET /us/{zip}` response.
#[derive(Debug, Deserialize)]
pub struct ZipLookupResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
pub struct Place {
    pub latitude: String,
    pub longitude: String,
}
