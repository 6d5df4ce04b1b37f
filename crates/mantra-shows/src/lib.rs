//! The `GET /api/shows` pipeline, independent of any HTTP framework.

pub mod error;
pub mod finder;
pub mod params;

pub use error::{BuildError, ShowsError};
pub use finder::{build_http_client, ShowFinder};
pub use params::{is_valid_zip, ShowsParams};
