//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub category_dir: String,
    pub tag_dir: String,

    // Content defaults
    pub default_category: String,
    pub default_cover_image: String,

    // Pagination
    pub per_page: usize,

    // Feed
    pub feed_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Red Panda Creations".to_string(),
            description: "A blog about web development, crafts, and creative projects"
                .to_string(),
            author: "John Doe".to_string(),
            language: "en-us".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),
            category_dir: "category".to_string(),
            tag_dir: "tag".to_string(),

            default_category: "Uncategorized".to_string(),
            default_cover_image: "/images/blog/default.svg".to_string(),

            per_page: 12,

            feed_path: "rss.xml".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
