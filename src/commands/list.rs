//! List site content

use anyhow::Result;

use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let index = site.load_posts();

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", index.len());
            for post in index.posts() {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
        "tag" | "tags" => {
            let tags = index.tags();
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag.tag, tag.count);
            }
        }
        "category" | "categories" => {
            let categories = index.categories();
            println!("Categories ({}):", categories.len());
            for category in &categories {
                println!(
                    "  {} ({})",
                    category,
                    index.posts_by_category(category).len()
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
