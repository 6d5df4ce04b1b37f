//! Ticketmaster Discovery v2 response types.
//!
//! Only the fields the normalizer reads are modelled. Almost everything is
//! optional upstream, so most fields carry `#[serde(default)]`.

use serde::Deserialize;

/// Top-level `events.json` response.
#[derive(Debug, Deserialize)]
pub struct DiscoveryResponse {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedEvents>,
    #[serde(default)]
    pub page: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddedEvents {
    #[serde(default)]
    pub events: Vec<DiscoveryEvent>,
}

/// Server-side pagination metadata. Counts cover the full upstream result
/// set, before any local deduplication.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// One upstream listing. Every field tolerates absence so that a single
/// malformed record cannot fail the whole page; the normalizer decides
/// what is usable.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub dates: EventDates,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EventEmbedded>,
    #[serde(default)]
    pub images: Vec<EventImage>,
    #[serde(default)]
    pub classifications: Vec<Classification>,
    #[serde(default)]
    pub price_ranges: Vec<PriceRange>,
}

impl DiscoveryEvent {
    /// The headline venue (first listed), if any.
    #[must_use]
    pub fn primary_venue(&self) -> Option<&Venue> {
        self.embedded.as_ref().and_then(|e| e.venues.first())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDates {
    #[serde(default)]
    pub start: EventStart,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStart {
    /// `YYYY-MM-DD`, venue-local.
    #[serde(default)]
    pub local_date: Option<String>,
    /// `HH:MM:SS`, venue-local. Absent when unannounced.
    #[serde(default)]
    pub local_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventEmbedded {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<NamedRef>,
    #[serde(default)]
    pub state: Option<StateRef>,
    /// Distance from the query point, in miles (`unit=miles` is always sent).
    #[serde(default)]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRef {
    #[serde(default)]
    pub state_code: Option<String>,
}

/// `{"name": ...}` reference used for cities and classification levels.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attraction {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    /// Aspect ratio tag such as `"16_9"`, `"3_2"`, `"4_3"`.
    #[serde(default)]
    pub ratio: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default)]
    pub genre: Option<NamedRef>,
    #[serde(default)]
    pub sub_genre: Option<NamedRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}
