//! Sitemap generation
//!
//! Covers the static pages plus every post, category and tag page.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2024-01-15</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use anyhow::Result;
use std::fs;

use super::escape_xml;
use crate::config::SiteConfig;
use crate::content::PostIndex;
use crate::helpers::{date, url};
use crate::Site;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Single URL entry in the sitemap
struct UrlEntry {
    loc: String,
    /// YYYY-MM-DD, omitted when unknown
    lastmod: Option<String>,
    changefreq: &'static str,
    priority: &'static str,
}

/// Build the sitemap XML string
pub fn build(config: &SiteConfig, index: &PostIndex) -> String {
    let mut urls: Vec<UrlEntry> = vec![
        UrlEntry {
            loc: url::full_url_for(config, ""),
            lastmod: None,
            changefreq: "daily",
            priority: "1.0",
        },
        UrlEntry {
            loc: url::full_url_for(config, "blog/"),
            lastmod: None,
            changefreq: "daily",
            priority: "0.9",
        },
        UrlEntry {
            loc: url::full_url_for(config, "search/"),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.6",
        },
        UrlEntry {
            loc: url::full_url_for(config, "tags/"),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.6",
        },
    ];

    for post in index.posts() {
        urls.push(UrlEntry {
            loc: url::full_url_for(config, &url::post_path(&post.slug)),
            lastmod: Some(date::ymd(&post.date)),
            changefreq: "monthly",
            priority: "0.8",
        });
    }

    for category in index.categories() {
        urls.push(UrlEntry {
            loc: url::full_url_for(config, &url::category_path(config, &category)),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.7",
        });
    }

    for tag_count in index.tags() {
        urls.push(UrlEntry {
            loc: url::full_url_for(config, &url::tag_path(config, &tag_count.tag)),
            lastmod: None,
            changefreq: "weekly",
            priority: "0.6",
        });
    }

    into_xml(urls)
}

fn into_xml(urls: Vec<UrlEntry>) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');

    for entry in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Write the sitemap into the public directory
pub fn write(site: &Site, index: &PostIndex) -> Result<()> {
    let xml = build(&site.config, index);
    fs::write(site.public_dir.join("sitemap.xml"), xml)?;
    tracing::info!("Generated sitemap.xml");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    fn post(slug: &str, date: &str, category: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            excerpt: String::new(),
            cover_image: String::new(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: 1,
            content: String::new(),
        }
    }

    fn config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_sitemap_static_pages() {
        let xml = build(&config(), &PostIndex::new(Vec::new()));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/</loc>"));
        assert!(xml.contains("<loc>https://example.com/search/</loc>"));
        assert!(xml.contains("<loc>https://example.com/tags/</loc>"));
        assert_eq!(xml.matches("<url>").count(), 4);
    }

    #[test]
    fn test_sitemap_post_entries() {
        let index = PostIndex::new(vec![post("clay", "2024-01-15", "Crafts", &["pottery"])]);
        let xml = build(&config(), &index);

        assert!(xml.contains("<loc>https://example.com/posts/clay/</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/category/crafts/</loc>"));
        assert!(xml.contains("<loc>https://example.com/tag/pottery/</loc>"));
    }

    #[test]
    fn test_sitemap_tag_urls_lowercased_and_encoded() {
        let index = PostIndex::new(vec![post("p", "2024-01-01", "Crafts", &["Polymer Clay"])]);
        let xml = build(&config(), &index);
        assert!(xml.contains("<loc>https://example.com/tag/polymer%20clay/</loc>"));
    }

    #[test]
    fn test_sitemap_changefreq_and_priority() {
        let index = PostIndex::new(vec![post("p", "2024-01-01", "Crafts", &[])]);
        let xml = build(&config(), &index);

        // Home entry comes first with the highest priority
        let home_pos = xml.find("<priority>1.0</priority>").unwrap();
        let post_pos = xml.find("<priority>0.8</priority>").unwrap();
        assert!(home_pos < post_pos);
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
    }

    #[test]
    fn test_sitemap_structure() {
        let xml = build(&config(), &PostIndex::new(Vec::new()));
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
    }
}
