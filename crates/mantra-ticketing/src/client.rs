//! HTTP client for the Ticketmaster Discovery v2 `events.json` endpoint.
//!
//! One call per request, no retries. Results are restricted to the Music
//! segment and the configured country. Successful raw pages are cached in
//! process keyed by their query (minus the API key).

use std::time::Duration;

use mantra_core::{SortOrder, TtlCache};
use reqwest::{Client, Url};

use crate::error::TicketingError;
use crate::types::{DiscoveryEvent, DiscoveryResponse};

const DEFAULT_BASE_URL: &str = "https://app.ticketmaster.com/discovery/v2/";
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Events requested per upstream page.
pub const PAGE_SIZE: u32 = 80;

/// Radius applied when a keyword search is biased toward a location. Wide
/// enough to keep national tour announcements in the results.
pub const SEARCH_RADIUS_MILES: u32 = 500;

/// Upstream bodies longer than this are truncated in errors and logs.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Geographic restriction for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoFilter {
    /// `"lat,lon"`.
    pub latlong: String,
    pub radius_miles: u32,
}

/// One upstream request. Browse mode sets `location` only; search mode sets
/// `keyword` and optionally a wide-radius `location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub location: Option<GeoFilter>,
    pub keyword: Option<String>,
    pub sort: SortOrder,
    /// 0-indexed.
    pub page: u32,
}

impl EventQuery {
    #[must_use]
    pub fn browse(latlong: String, radius_miles: u32, sort: SortOrder, page: u32) -> Self {
        Self {
            location: Some(GeoFilter {
                latlong,
                radius_miles,
            }),
            keyword: None,
            sort,
            page,
        }
    }

    /// Keyword search; `near` biases results toward a point using
    /// [`SEARCH_RADIUS_MILES`].
    #[must_use]
    pub fn search(keyword: String, near: Option<String>, sort: SortOrder, page: u32) -> Self {
        Self {
            location: near.map(|latlong| GeoFilter {
                latlong,
                radius_miles: SEARCH_RADIUS_MILES,
            }),
            keyword: Some(keyword),
            sort,
            page,
        }
    }
}

/// Raw events plus the upstream's pagination counts.
#[derive(Debug, Clone)]
pub struct EventPage {
    pub events: Vec<DiscoveryEvent>,
    /// Upstream total before local dedup.
    pub total_elements: u64,
    pub total_pages: u32,
}

/// Client for the Discovery API.
///
/// Use [`DiscoveryClient::new`] for production or
/// [`DiscoveryClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    client: Client,
    api_key: String,
    base_url: Url,
    country_code: String,
    cache: TtlCache<String, EventPage>,
}

impl DiscoveryClient {
    /// Creates a client pointed at the production Discovery API.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`DiscoveryClient::with_base_url`].
    pub fn new(client: Client, api_key: &str) -> Result<Self, TicketingError> {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL, "US", DEFAULT_CACHE_TTL)
    }

    /// Creates a client with a custom base URL, country and cache TTL.
    ///
    /// # Errors
    ///
    /// Returns [`TicketingError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        client: Client,
        api_key: &str,
        base_url: &str,
        country_code: &str,
        cache_ttl: Duration,
    ) -> Result<Self, TicketingError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TicketingError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            country_code: country_code.to_owned(),
            cache: TtlCache::new(cache_ttl),
        })
    }

    /// Fetches one page of music events.
    ///
    /// # Errors
    ///
    /// - [`TicketingError::UpstreamStatus`] on a non-2xx response.
    /// - [`TicketingError::Http`] on network failure.
    /// - [`TicketingError::Deserialize`] if the body is not the expected shape.
    pub async fn query_events(&self, query: &EventQuery) -> Result<EventPage, TicketingError> {
        let params = self.query_params(query);
        let cache_key = cache_key(&params);

        if let Some(hit) = self.cache.get(&cache_key).await {
            tracing::debug!(query = %cache_key, "discovery cache hit");
            return Ok(hit);
        }

        let url = self.build_url(&params)?;
        tracing::debug!(query = %cache_key, "querying discovery api");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TicketingError::UpstreamStatus {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let body = response.text().await?;
        let parsed: DiscoveryResponse =
            serde_json::from_str(&body).map_err(|source| TicketingError::Deserialize {
                context: format!("events.json({cache_key})"),
                source,
            })?;

        let page_info = parsed.page;
        let page = EventPage {
            events: parsed.embedded.map(|e| e.events).unwrap_or_default(),
            total_elements: page_info
                .as_ref()
                .and_then(|p| p.total_elements)
                .unwrap_or(0),
            total_pages: page_info
                .as_ref()
                .and_then(|p| p.total_pages)
                .filter(|&n| n > 0)
                .unwrap_or(1),
        };

        self.cache.insert(cache_key, page.clone()).await;
        Ok(page)
    }

    /// Query parameters for `query`, excluding the API key.
    fn query_params(&self, query: &EventQuery) -> Vec<(&'static str, String)> {
        let mut params: Vec<(&'static str, String)> = Vec::with_capacity(10);

        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }
        if let Some(geo) = &query.location {
            params.push(("latlong", geo.latlong.clone()));
            params.push(("radius", geo.radius_miles.to_string()));
            params.push(("unit", "miles".to_owned()));
        }

        params.push(("segmentName", "Music".to_owned()));
        params.push(("countryCode", self.country_code.clone()));
        params.push(("sort", query.sort.upstream_expr().to_owned()));
        params.push(("size", PAGE_SIZE.to_string()));
        params.push(("page", query.page.to_string()));
        params
    }

    /// Builds the request URL with properly percent-encoded query parameters.
    fn build_url(&self, params: &[(&'static str, String)]) -> Result<Url, TicketingError> {
        let mut url = self
            .base_url
            .join("events.json")
            .map_err(|e| TicketingError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

fn cache_key(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn truncate(body: &str, max_chars: usize) -> String {
    if body.chars().count() > max_chars {
        format!("{}...", body.chars().take(max_chars).collect::<String>())
    } else {
        body.to_owned()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
