//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default site configuration written by `plumage init`
const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: Notes and projects
author: Your Name
language: en-us

# URL
url: http://example.com
root: /

# Directories
source_dir: content
public_dir: public

# Pagination
per_page: 12
"#;

/// A small first post so a fresh site generates something
const WELCOME_POST: &str = r#"---
title: Welcome
date: 2024-01-01
excerpt: Your first post.
category: Meta
tags:
  - hello
---

# Welcome

Edit `content/posts/welcome.md` or add more markdown files next to it,
then run `plumage generate`.
"#;

/// Scaffold a new site directory
pub fn run(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("Site already initialized: {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("content/images/blog"))?;

    fs::write(target_dir.join("_config.yml"), DEFAULT_CONFIG)?;
    fs::write(
        target_dir.join("content/posts/welcome.md"),
        WELCOME_POST,
    )?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_scaffolds_site() {
        let tmp = tempfile::tempdir().unwrap();
        run(tmp.path()).unwrap();

        assert!(tmp.path().join("_config.yml").exists());
        assert!(tmp.path().join("content/posts/welcome.md").exists());

        let site = crate::Site::new(tmp.path()).unwrap();
        let index = site.load_posts();
        assert_eq!(index.len(), 1);
        assert!(index.get("welcome").is_some());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = tempfile::tempdir().unwrap();
        run(tmp.path()).unwrap();
        assert!(run(tmp.path()).is_err());
    }
}
