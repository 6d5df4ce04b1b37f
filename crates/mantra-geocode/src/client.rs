//! HTTP client for the Zippopotam.us postal-code lookup.
//!
//! Postal-code geography is static, so successful lookups are cached in
//! process for the configured TTL (24 hours by default).

use std::time::Duration;

use mantra_core::TtlCache;
use reqwest::{Client, StatusCode, Url};

use crate::error::GeocodeError;
use crate::types::{Coordinates, ZipLookupResponse};

const DEFAULT_BASE_URL: &str = "https://api.zippopotam.us/";
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolves 5-digit US zip codes to coordinates.
///
/// Use [`ZipGeocoder::new`] for production or [`ZipGeocoder::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ZipGeocoder {
    client: Client,
    base_url: Url,
    cache: TtlCache<String, Coordinates>,
}

impl ZipGeocoder {
    /// Creates a geocoder pointed at the public Zippopotam.us service.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ZipGeocoder::with_base_url`].
    pub fn new(client: Client) -> Result<Self, GeocodeError> {
        Self::with_base_url(client, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL)
    }

    /// Creates a geocoder with a custom base URL and cache TTL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        base_url: &str,
        cache_ttl: Duration,
    ) -> Result<Self, GeocodeError> {
        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            cache: TtlCache::new(cache_ttl),
        })
    }

    /// Resolves `zip` to coordinates, or `None` when it cannot be located.
    ///
    /// Callers must pass exactly five ASCII digits. Lookup failures of any
    /// kind are logged and reported as `None`.
    pub async fn resolve_zip(&self, zip: &str) -> Option<Coordinates> {
        if let Some(hit) = self.cache.get(&zip.to_owned()).await {
            tracing::debug!(zip, "geocode cache hit");
            return Some(hit);
        }

        match self.lookup(zip).await {
            Ok(coords) => {
                self.cache.insert(zip.to_owned(), coords.clone()).await;
                Some(coords)
            }
            Err(GeocodeError::UnexpectedStatus { status, .. })
                if status == StatusCode::NOT_FOUND.as_u16() =>
            {
                tracing::debug!(zip, "zip code not found");
                None
            }
            Err(err) => {
                tracing::warn!(zip, error = %err, "zip geocode lookup failed");
                None
            }
        }
    }

    fn lookup_url(&self, zip: &str) -> Result<Url, GeocodeError> {
        self.base_url
            .join(&format!("us/{zip}"))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn lookup(&self, zip: &str) -> Result<Coordinates, GeocodeError> {
        let url = self.lookup_url(zip)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                zip: zip.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed: ZipLookupResponse =
            serde_json::from_str(&body).map_err(|source| GeocodeError::Deserialize {
                zip: zip.to_owned(),
                source,
            })?;

        let place = parsed
            .places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoPlaces(zip.to_owned()))?;

        Ok(Coordinates {
            lat: place.latitude,
            lon: place.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_geocoder(base_url: &str) -> ZipGeocoder {
        ZipGeocoder::with_base_url(Client::new(), base_url, DEFAULT_CACHE_TTL)
            .expect("geocoder construction should not fail")
    }

    #[test]
    fn lookup_url_appends_country_and_zip() {
        let geocoder = test_geocoder("https://api.zippopotam.us");
        let url = geocoder.lookup_url("94102").unwrap();
        assert_eq!(url.as_str(), "https://api.zippopotam.us/us/94102");
    }

    #[test]
    fn lookup_url_keeps_base_path_prefix() {
        let geocoder = test_geocoder("http://127.0.0.1:9000/geo/");
        let url = geocoder.lookup_url("10001").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/geo/us/10001");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ZipGeocoder::with_base_url(Client::new(), "not a url", DEFAULT_CACHE_TTL);
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn coordinates_latlong_joins_with_comma() {
        let coords = Coordinates {
            lat: "37.7813".to_owned(),
            lon: "-122.4209".to_owned(),
        };
        assert_eq!(coords.latlong(), "37.7813,-122.4209");
    }
}
