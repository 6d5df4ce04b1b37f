//! Show lookup pipeline: validate, geocode, query, normalize.

use std::time::Duration;

use mantra_core::{AppConfig, ShowsResponse};
use mantra_geocode::ZipGeocoder;
use mantra_ticketing::{normalize_events, AffiliateLinker, DiscoveryClient, EventQuery};

use crate::error::{BuildError, ShowsError};
use crate::params::ShowsParams;

/// Builds the `reqwest::Client` shared by the geocoder and the events client.
///
/// # Errors
///
/// Returns [`BuildError::Http`] if the client cannot be constructed.
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<reqwest::Client, BuildError> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Orchestrates one `GET /api/shows` request.
///
/// Holds no per-request state. Cloning is cheap; the HTTP clients and
/// caches inside are shared.
#[derive(Debug, Clone)]
pub struct ShowFinder {
    discovery: Option<DiscoveryClient>,
    geocoder: ZipGeocoder,
    affiliate: AffiliateLinker,
}

impl ShowFinder {
    #[must_use]
    pub fn new(
        discovery: Option<DiscoveryClient>,
        geocoder: ZipGeocoder,
        affiliate: AffiliateLinker,
    ) -> Self {
        Self {
            discovery,
            geocoder,
            affiliate,
        }
    }

    /// Wires the geocoder and events client from configuration.
    ///
    /// A missing Ticketmaster key is not an error here: the finder is built
    /// unconfigured and every lookup answers [`ShowsError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if the HTTP client cannot be built or a base
    /// URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, BuildError> {
        let http = build_http_client(config.http_timeout_secs, &config.user_agent)?;

        let geocoder = ZipGeocoder::with_base_url(
            http.clone(),
            &config.geocode_base_url,
            Duration::from_secs(config.geocode_cache_ttl_secs),
        )?;

        let discovery = config
            .ticketmaster_api_key
            .as_deref()
            .map(|key| {
                DiscoveryClient::with_base_url(
                    http.clone(),
                    key,
                    &config.ticketmaster_base_url,
                    &config.country_code,
                    Duration::from_secs(config.events_cache_ttl_secs),
                )
            })
            .transpose()?;

        if discovery.is_none() {
            tracing::warn!("TICKETMASTER_API_KEY not set; show lookups will answer 503");
        }

        Ok(Self::new(
            discovery,
            geocoder,
            AffiliateLinker::new(config.affiliate_base.clone()),
        ))
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.discovery.is_some()
    }

    /// Runs one lookup.
    ///
    /// Checks run in a fixed order: configuration, zip shape (browse mode
    /// only), geocoding, then the events call. The geocoder always answers
    /// before the events API is contacted, and an unlocatable zip never
    /// reaches it.
    ///
    /// In search mode a malformed zip is ignored and the search runs
    /// nationwide; the response then echoes an empty zip.
    ///
    /// # Errors
    ///
    /// See [`ShowsError`] for the variants and their HTTP statuses.
    pub async fn find_shows(&self, params: &ShowsParams) -> Result<ShowsResponse, ShowsError> {
        let Some(discovery) = &self.discovery else {
            return Err(ShowsError::NotConfigured);
        };

        let keyword = params.keyword();
        let zip = params.valid_zip();
        let radius = params.radius_miles();
        let page = params.page_index();
        let sort = params.sort_order();

        if keyword.is_none() && zip.is_none() {
            return Err(ShowsError::InvalidZip);
        }

        let latlong = match zip {
            Some(zip) => {
                let coords = self
                    .geocoder
                    .resolve_zip(zip)
                    .await
                    .ok_or(ShowsError::ZipNotFound)?;
                Some(coords.latlong())
            }
            None => None,
        };

        let query = match (&keyword, latlong) {
            (Some(keyword), near) => EventQuery::search(keyword.clone(), near, sort, page),
            (None, Some(latlong)) => EventQuery::browse(latlong, radius, sort, page),
            (None, None) => return Err(ShowsError::InvalidZip),
        };

        let result = discovery.query_events(&query).await.map_err(ShowsError::from)?;
        let upstream_count = result.events.len();
        let shows = normalize_events(result.events, &self.affiliate);

        tracing::debug!(
            zip = zip.unwrap_or_default(),
            keyword = keyword.as_deref().unwrap_or_default(),
            page,
            upstream_count,
            returned = shows.len(),
            "show lookup complete"
        );

        Ok(ShowsResponse {
            shows,
            total: result.total_elements,
            total_pages: result.total_pages,
            page,
            zip: zip.unwrap_or_default().to_owned(),
            radius,
            keyword,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_http_client_accepts_timeout_and_user_agent() {
        assert!(build_http_client(15, "mantra/0.1 (show-discovery)").is_ok());
    }

    #[test]
    fn build_http_client_rejects_invalid_user_agent() {
        let err = build_http_client(15, "bad\nagent").expect_err("newline is not a valid header value");
        assert!(matches!(err, BuildError::Http(_)));
    }
}
