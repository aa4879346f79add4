//! Content loader - builds the post index from the posts directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{reading_time, FrontMatter, Post, PostIndex};
use crate::Site;

/// Why a single content file was excluded from the index
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file name is not valid UTF-8: {path:?}")]
    InvalidFileName { path: PathBuf },
}

/// Loads posts from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Build the post index from `<source>/posts`.
    ///
    /// A file that cannot be loaded is logged and skipped; the build
    /// never aborts. Duplicate slugs are resolved first-seen-wins over
    /// the sorted directory listing, so the outcome is deterministic.
    pub fn load(&self) -> PostIndex {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.exists() {
            return PostIndex::new(Vec::new());
        }

        let mut posts = Vec::new();
        let mut seen_slugs: HashSet<String> = HashSet::new();

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) => {
                    if seen_slugs.contains(&post.slug) {
                        tracing::warn!(
                            "Duplicate slug {:?}, keeping the first occurrence and skipping {:?}",
                            post.slug,
                            path
                        );
                        continue;
                    }
                    seen_slugs.insert(post.slug.clone());
                    posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        // Newest first; stable, so equal dates keep listing order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        PostIndex::new(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| LoadError::InvalidFileName {
                path: path.to_path_buf(),
            })?;

        let (fm, body) = FrontMatter::parse(&raw);
        let config = &self.site.config;

        // Missing or unparsable dates resolve to the epoch so the build
        // stays a pure function of file contents
        let date = match (&fm.date, fm.parse_date()) {
            (_, Some(date)) => date,
            (Some(given), None) => {
                tracing::warn!("Unparsable date {:?} in {:?}, sorting as epoch", given, path);
                chrono::NaiveDateTime::UNIX_EPOCH
            }
            (None, None) => {
                tracing::warn!("Missing date in {:?}, sorting as epoch", path);
                chrono::NaiveDateTime::UNIX_EPOCH
            }
        };

        Ok(Post {
            slug,
            title: fm.title.unwrap_or_default(),
            date,
            excerpt: fm.excerpt.unwrap_or_default(),
            cover_image: fm
                .cover_image
                .unwrap_or_else(|| config.default_cover_image.clone()),
            category: fm
                .category
                .unwrap_or_else(|| config.default_category.clone()),
            tags: fm.tags,
            reading_time: reading_time(body),
            content: body.to_string(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx")
        .unwrap_or(false)
}
