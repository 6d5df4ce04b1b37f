//! Ticketmaster Discovery API client and event normalization.

pub mod affiliate;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use affiliate::AffiliateLinker;
pub use client::{DiscoveryClient, EventPage, EventQuery, GeoFilter, PAGE_SIZE, SEARCH_RADIUS_MILES};
pub use error::TicketingError;
pub use normalize::{normalize_event, normalize_events};
pub use types::DiscoveryEvent;
