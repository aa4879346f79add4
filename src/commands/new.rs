//! Create a new post

use anyhow::Result;
use chrono::Local;
use std::fs;

use crate::Site;

/// Create a new post file under the posts directory
pub fn create_post(site: &Site, title: &str) -> Result<()> {
    fs::create_dir_all(&site.posts_dir)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let file_path = site.posts_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
date: {}
excerpt:
category: {}
tags: []
---

"#,
        title,
        Local::now().format("%Y-%m-%d"),
        site.config.default_category,
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}
