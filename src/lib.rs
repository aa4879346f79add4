//! plumage: a small static site generator for markdown blogs
//!
//! This crate turns a directory of markdown posts with YAML front matter
//! into a static site: one page per post, category and tag, a paginated
//! blog listing, an RSS feed, a sitemap, and a JSON search index consumed
//! by the client-side search page.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod query;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main site handle: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory (markdown content and assets)
    pub source_dir: std::path::PathBuf,
    /// Posts directory (markdown files, one per post)
    pub posts_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site handle from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let posts_dir = source_dir.join("posts");
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            posts_dir,
            public_dir,
        })
    }

    /// Build the post index from the posts directory
    pub fn load_posts(&self) -> content::PostIndex {
        content::loader::ContentLoader::new(self).load()
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<()> {
        commands::new::create_post(self, title)
    }
}
