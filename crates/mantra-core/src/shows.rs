//! Wire types for the show-discovery endpoint.
//!
//! Both the server (producing) and the CLI browse layer (consuming) share
//! these shapes, so field names follow the camelCase JSON contract.

use serde::{Deserialize, Serialize};

/// Search radius in miles when the caller supplies none, or garbage.
pub const DEFAULT_RADIUS_MILES: u32 = 50;

/// A single normalized live event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: String,
    pub name: String,
    /// Venue-local calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Venue-local start time, `HH:MM`. `None` when unannounced.
    pub time: Option<String>,
    pub venue: String,
    pub city: String,
    pub state: String,
    /// Rounded miles from the query point.
    pub distance: Option<i64>,
    pub artists: Vec<String>,
    pub genre: String,
    pub ticket_url: String,
    pub image: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

/// Paginated envelope returned by `GET /api/shows`.
///
/// `total` and `total_pages` describe the upstream result set before local
/// deduplication; they are not the length of `shows`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowsResponse {
    pub shows: Vec<Show>,
    pub total: u64,
    pub total_pages: u32,
    pub page: u32,
    pub zip: String,
    pub radius: u32,
    pub keyword: Option<String>,
}

/// Allow-listed sort orders accepted from callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    DateAsc,
    DateDesc,
    NameAsc,
    DistanceAsc,
    RelevanceDesc,
}

impl SortOrder {
    /// Maps a caller-supplied value onto the allow-list.
    ///
    /// Anything unrecognized, including `None`, sorts by date ascending.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("date-desc") => Self::DateDesc,
            Some("name") => Self::NameAsc,
            Some("distance") => Self::DistanceAsc,
            Some("relevance") => Self::RelevanceDesc,
            _ => Self::DateAsc,
        }
    }

    /// The parameter value understood by the caller-facing API.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::DateAsc => "date",
            Self::DateDesc => "date-desc",
            Self::NameAsc => "name",
            Self::DistanceAsc => "distance",
            Self::RelevanceDesc => "relevance",
        }
    }

    /// The sort expression sent upstream to the Discovery API.
    #[must_use]
    pub fn upstream_expr(self) -> &'static str {
        match self {
            Self::DateAsc => "date,asc",
            Self::DateDesc => "date,desc",
            Self::NameAsc => "name,asc",
            Self::DistanceAsc => "distance,asc",
            Self::RelevanceDesc => "relevance,desc",
        }
    }
}
