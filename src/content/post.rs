//! Post model and derived metadata

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reading speed used to estimate reading time
const WORDS_PER_MINUTE: usize = 200;

/// A blog post, one per content file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL-safe identifier, derived from the file name stem
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDateTime,

    /// Short summary shown on cards and in the feed
    pub excerpt: String,

    /// Cover image path
    pub cover_image: String,

    /// Single category; "Uncategorized" when absent
    pub category: String,

    /// Post tags, front-matter order
    pub tags: Vec<String>,

    /// Estimated minutes to read the body
    pub reading_time: usize,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    /// Lightweight projection without the body, used by the search
    /// index, RSS and sitemap.
    pub fn metadata(&self) -> PostMetadata {
        PostMetadata {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            excerpt: self.excerpt.clone(),
            cover_image: self.cover_image.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            reading_time: self.reading_time,
        }
    }

    /// Case-insensitive exact tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Post metadata as exported to search-index.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMetadata {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(rename = "readingTime")]
    pub reading_time: usize,
}

/// A tag with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Estimate reading time in minutes from the raw markdown body.
/// Word count over 200 wpm, rounded up, never below one minute.
pub fn reading_time(body: &str) -> usize {
    let words = body.split_whitespace().count();
    std::cmp::max(1, words.div_ceil(WORDS_PER_MINUTE))
}
