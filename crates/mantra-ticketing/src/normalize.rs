//! Normalization from raw Discovery events to [`mantra_core::Show`].

use std::collections::HashSet;

use mantra_core::Show;

use crate::affiliate::AffiliateLinker;
use crate::error::TicketingError;
use crate::types::{Classification, DiscoveryEvent, EventImage};

/// Genre used when neither sub-genre nor genre is usable.
pub const FALLBACK_GENRE: &str = "Rock";

/// Placeholder venue name when the event lists none.
pub const UNKNOWN_VENUE: &str = "TBA";

const EXCLUDED_GENRES: [&str; 2] = ["Other", "Undefined"];
const PREFERRED_RATIO: &str = "16_9";

fn usable_genre(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty() && !EXCLUDED_GENRES.contains(n))
}

/// Sub-genre, else genre, else [`FALLBACK_GENRE`]. `"Other"` and
/// `"Undefined"` count as absent at both levels.
#[must_use]
pub fn resolve_genre(classification: Option<&Classification>) -> String {
    let sub = classification.and_then(|c| c.sub_genre.as_ref()?.name.as_deref());
    let main = classification.and_then(|c| c.genre.as_ref()?.name.as_deref());
    usable_genre(sub)
        .or_else(|| usable_genre(main))
        .unwrap_or(FALLBACK_GENRE)
        .to_owned()
}

/// Widest 16:9 image, else the first image listed. Images without a URL
/// are not candidates.
///
/// Ties on width keep the earlier image.
#[must_use]
pub fn select_image(images: &[EventImage]) -> Option<String> {
    let candidates = || images.iter().filter(|i| !i.url.is_empty());
    let widest_16_9 = candidates()
        .filter(|i| i.ratio.as_deref() == Some(PREFERRED_RATIO))
        .fold(None::<&EventImage>, |best, img| match best {
            Some(b) if b.width >= img.width => Some(b),
            _ => Some(img),
        });
    widest_16_9
        .or_else(|| candidates().next())
        .map(|i| i.url.clone())
}

/// Upstream times are `HH:MM:SS`; shows carry `HH:MM`.
fn normalize_time(local_time: Option<&str>) -> Option<String> {
    let time = local_time.map(str::trim).filter(|t| !t.is_empty())?;
    match time.get(..5) {
        Some(hm) if hm.as_bytes()[2] == b':' => Some(hm.to_owned()),
        _ => Some(time.to_owned()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_miles(distance: f64) -> i64 {
    distance.round() as i64
}

/// Composite identity used to collapse duplicate listings:
/// `name|date|venue`, with an empty venue segment when none is listed.
#[must_use]
pub fn dedup_key(event: &DiscoveryEvent) -> String {
    let date = event.dates.start.local_date.as_deref().unwrap_or_default();
    let venue = event
        .primary_venue()
        .and_then(|v| v.name.as_deref())
        .unwrap_or_default();
    let name = event.name.as_deref().unwrap_or_default();
    format!("{name}|{date}|{venue}")
}

/// Normalizes a raw [`DiscoveryEvent`] into a [`Show`].
///
/// # Errors
///
/// Returns [`TicketingError::Normalization`] if the event has no name or no
/// start date.
pub fn normalize_event(
    event: DiscoveryEvent,
    affiliate: &AffiliateLinker,
) -> Result<Show, TicketingError> {
    let Some(name) = event.name.clone().filter(|n| !n.trim().is_empty()) else {
        return Err(TicketingError::Normalization {
            event_id: event.id,
            reason: "event has no name".into(),
        });
    };
    let Some(date) = event
        .dates
        .start
        .local_date
        .clone()
        .filter(|d| !d.is_empty())
    else {
        return Err(TicketingError::Normalization {
            event_id: event.id,
            reason: "event has no local start date".into(),
        });
    };

    let time = normalize_time(event.dates.start.local_time.as_deref());
    let genre = resolve_genre(event.classifications.first());
    let image = select_image(&event.images);
    let ticket_url = affiliate.wrap(&event.url);

    let (price_min, price_max) = event
        .price_ranges
        .first()
        .map_or((None, None), |p| (p.min, p.max));

    let venue = event.primary_venue();
    let venue_name = venue
        .and_then(|v| v.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| UNKNOWN_VENUE.to_owned());
    let city = venue
        .and_then(|v| v.city.as_ref())
        .and_then(|c| c.name.clone())
        .unwrap_or_default();
    let state = venue
        .and_then(|v| v.state.as_ref())
        .and_then(|s| s.state_code.clone())
        .unwrap_or_default();
    let distance = venue.and_then(|v| v.distance).map(round_miles);

    let artists = event
        .embedded
        .as_ref()
        .map(|e| {
            e.attractions
                .iter()
                .filter_map(|a| a.name.clone())
                .filter(|n| !n.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(Show {
        id: event.id,
        name,
        date,
        time,
        venue: venue_name,
        city,
        state,
        distance,
        artists,
        genre,
        ticket_url,
        image,
        price_min,
        price_max,
    })
}

/// Normalizes a batch in upstream order, keeping the first event for each
/// [`dedup_key`]. Later duplicates are dropped silently. Events that fail
/// normalization are skipped and logged.
#[must_use]
pub fn normalize_events(events: Vec<DiscoveryEvent>, affiliate: &AffiliateLinker) -> Vec<Show> {
    let mut seen = HashSet::with_capacity(events.len());
    let mut shows = Vec::with_capacity(events.len());

    for event in events {
        if !seen.insert(dedup_key(&event)) {
            continue;
        }
        match normalize_event(event, affiliate) {
            Ok(show) => shows.push(show),
            Err(e) => tracing::debug!(error = %e, "skipping event"),
        }
    }

    shows
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
