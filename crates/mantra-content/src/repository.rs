//! In-memory post queries.
//!
//! Posts are kept in file order, which the generator writes newest first;
//! "latest" queries rely on that.

use std::cmp::Reverse;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::dates::parse_post_date;
use crate::error::ContentError;
use crate::model::{Category, Post, Tag};

const POSTS_FILE: &str = "posts.json";
const CATEGORIES_FILE: &str = "categories.json";
const TAGS_FILE: &str = "tags.json";

const SECONDS_PER_DAY: f64 = 86_400.0;
const TRENDING_WINDOW_DAYS: f64 = 30.0;
const TRENDING_FULL_TAG_COUNT: f64 = 5.0;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    posts: Vec<Post>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
}

impl ContentRepository {
    #[must_use]
    pub fn new(posts: Vec<Post>, categories: Vec<Category>, tags: Vec<Tag>) -> Self {
        Self {
            posts,
            categories,
            tags,
        }
    }

    /// Loads `posts.json`, `categories.json` and `tags.json` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] if a file cannot be read, or
    /// [`ContentError::Parse`] if it does not match the expected shape.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let dir = dir.as_ref();
        let posts: Vec<Post> = read_json(&dir.join(POSTS_FILE))?;
        let categories: Vec<Category> = read_json(&dir.join(CATEGORIES_FILE))?;
        let tags: Vec<Tag> = read_json(&dir.join(TAGS_FILE))?;

        tracing::debug!(
            dir = %dir.display(),
            posts = posts.len(),
            categories = categories.len(),
            tags = tags.len(),
            "content loaded"
        );
        Ok(Self::new(posts, categories, tags))
    }

    #[must_use]
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    #[must_use]
    pub fn posts_by_type(&self, content_type: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.content_type == content_type)
            .collect()
    }

    /// Posts filed under a category, matched by lowercased display name or
    /// by that name with whitespace runs replaced by `-`.
    #[must_use]
    pub fn posts_by_category(&self, category_slug: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| {
                p.categories.iter().any(|c| {
                    let lower = c.to_lowercase();
                    lower == category_slug || WHITESPACE_RUN.replace_all(&lower, "-") == category_slug
                })
            })
            .collect()
    }

    #[must_use]
    pub fn posts_by_tag(&self, tag_slug: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.has_tag_slug(tag_slug))
            .collect()
    }

    #[must_use]
    pub fn latest_posts(&self, count: usize) -> &[Post] {
        &self.posts[..count.min(self.posts.len())]
    }

    /// Up to `count` posts most related to `post`, best first.
    ///
    /// Scoring: 3 per shared category, 2 per shared tag, 1 for the same
    /// content type, plus 2 when published within 7 days of `post` or 1
    /// within 30 days. Posts scoring zero are excluded. Equal scores keep
    /// file order.
    #[must_use]
    pub fn related_posts(&self, post: &Post, count: usize) -> Vec<&Post> {
        let anchor_date = parse_post_date(&post.date);

        let mut scored: Vec<(&Post, u32)> = self
            .posts
            .iter()
            .filter(|p| p.id != post.id)
            .map(|p| (p, relatedness(post, anchor_date, p)))
            .filter(|(_, score)| *score > 0)
            .collect();

        scored.sort_by_key(|(_, score)| Reverse(*score));
        scored.into_iter().take(count).map(|(p, _)| p).collect()
    }

    /// Case-insensitive substring search over title, tag names and excerpt.
    #[must_use]
    pub fn search_posts(&self, query: &str) -> Vec<&Post> {
        let q = query.to_lowercase();
        self.posts
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&q)
                    || p.tags.iter().any(|t| t.name.to_lowercase().contains(&q))
                    || p.excerpt.to_lowercase().contains(&q)
            })
            .collect()
    }

    /// Categories with at least one post, in file order.
    #[must_use]
    pub fn all_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.count > 0).collect()
    }

    /// Tags with at least one post, most used first.
    #[must_use]
    pub fn all_tags(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.tags.iter().filter(|t| t.count > 0).collect();
        tags.sort_by_key(|t| Reverse(t.count));
        tags
    }

    #[must_use]
    pub fn popular_tags(&self, count: usize) -> Vec<&Tag> {
        let mut tags = self.all_tags();
        tags.truncate(count);
        tags
    }

    /// Up to `count` posts ranked by `recency * 0.6 + tag_score * 0.4`.
    ///
    /// `recency` falls linearly from 1 (published at `now`) to 0 (30 days
    /// old). `tag_score` is the tag count over 5, capped at 1.
    #[must_use]
    pub fn trending_posts(&self, count: usize, now: DateTime<Utc>) -> Vec<&Post> {
        let mut scored: Vec<(&Post, f64)> = self
            .posts
            .iter()
            .map(|p| (p, trending_score(p, now)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(count).map(|(p, _)| p).collect()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[allow(clippy::cast_precision_loss)]
fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (a - b).num_seconds() as f64 / SECONDS_PER_DAY
}

#[allow(clippy::cast_possible_truncation)]
fn relatedness(anchor: &Post, anchor_date: Option<DateTime<Utc>>, candidate: &Post) -> u32 {
    let shared_categories = candidate
        .categories
        .iter()
        .filter(|c| anchor.categories.contains(c))
        .count();
    let shared_tags = candidate
        .tags
        .iter()
        .filter(|t| anchor.has_tag_slug(&t.slug))
        .count();

    let mut score = (shared_categories * 3 + shared_tags * 2) as u32;
    if candidate.content_type == anchor.content_type {
        score += 1;
    }

    let gap = anchor_date
        .zip(parse_post_date(&candidate.date))
        .map(|(a, c)| days_between(c, a).abs());
    match gap {
        Some(days) if days < 7.0 => score += 2,
        Some(days) if days < 30.0 => score += 1,
        _ => {}
    }
    score
}

#[allow(clippy::cast_precision_loss)]
fn trending_score(post: &Post, now: DateTime<Utc>) -> f64 {
    let recency = parse_post_date(&post.date).map_or(0.0, |published| {
        let age = days_between(now, published);
        (TRENDING_WINDOW_DAYS - age).max(0.0) / TRENDING_WINDOW_DAYS
    });
    let tag_score = (post.tags.len() as f64 / TRENDING_FULL_TAG_COUNT).min(1.0);
    recency * 0.6 + tag_score * 0.4
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
