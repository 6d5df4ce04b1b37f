use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    /// Publication timestamp as written by the generator: either a bare
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    #[serde(default)]
    pub modified: String,
    /// Category display names, e.g. `"Album Reviews"`.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<PostTag>,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub featured_image_alt: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub reading_time: u32,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub url_prefix: String,
    #[serde(default)]
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub focus_keyword: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u32,
}

impl Post {
    /// Site-relative URL for the post.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.path
    }

    pub(crate) fn has_tag_slug(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }
}
