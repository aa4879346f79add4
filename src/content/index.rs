//! The built post collection and its derived views
//!
//! All views are pure functions over the date-descending collection; nothing
//! here is cached or stored separately.

use indexmap::IndexMap;
use std::collections::BTreeSet;

use super::{Post, PostMetadata, TagCount};

/// Immutable, date-descending collection of posts produced by one build pass
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    /// Wrap an already-sorted collection
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by slug; unknown slugs are `None`, never a panic
    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Distinct category values, case-sensitive, alphabetically sorted
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.posts.iter().map(|p| p.category.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Tags with their post counts, sorted by count descending.
    /// Equal counts keep first-discovery order in the collection.
    pub fn tags(&self) -> Vec<TagCount> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(tag, count)| TagCount {
                tag: tag.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }

    /// Posts in a category, case-insensitive exact match
    pub fn posts_by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Posts carrying a tag, case-insensitive exact match
    pub fn posts_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// Posts sharing a category with `slug`, excluding the post itself,
    /// in collection order, truncated to `limit`
    pub fn related_posts(&self, slug: &str, limit: usize) -> Vec<&Post> {
        let Some(current) = self.get(slug) else {
            return Vec::new();
        };
        self.posts_by_category(&current.category)
            .into_iter()
            .filter(|p| p.slug != slug)
            .take(limit)
            .collect()
    }

    /// The newest `limit` posts
    pub fn latest(&self, limit: usize) -> &[Post] {
        &self.posts[..limit.min(self.posts.len())]
    }

    /// Metadata projection of the whole collection, used for the
    /// search-index export
    pub fn metadata(&self) -> Vec<PostMetadata> {
        self.posts.iter().map(Post::metadata).collect()
    }
}
