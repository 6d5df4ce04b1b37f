//! Postal-code geocoding backed by the Zippopotam.us lookup service.

pub mod client;
pub mod error;
pub mod types;

pub use client::ZipGeocoder;
pub use error::GeocodeError;
pub use types::Coordinates;
