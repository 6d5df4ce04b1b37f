//! Read-only queries over the pre-generated posts, categories and tags.

pub mod dates;
pub mod error;
pub mod model;
pub mod repository;

pub use dates::{format_date, format_date_short, parse_post_date};
pub use error::ContentError;
pub use model::{Category, Post, PostTag, Seo, Tag};
pub use repository::ContentRepository;
