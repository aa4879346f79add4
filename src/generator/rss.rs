//! RSS 2.0 feed generation
//!
//! Every post becomes an `<item>` with title, description (the excerpt),
//! link, guid, pubDate and category. All text fields are XML-escaped.

use anyhow::Result;
use std::fs;

use super::escape_xml;
use crate::config::SiteConfig;
use crate::content::PostIndex;
use crate::helpers::{date, url};
use crate::Site;

/// Build the feed XML string
pub fn build(config: &SiteConfig, index: &PostIndex) -> String {
    let site_url = config.url.trim_end_matches('/');
    let mut xml = String::with_capacity(4096);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    xml.push('\n');
    xml.push_str("  <channel>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&config.title)));
    xml.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    xml.push_str(&format!("    <link>{}</link>\n", site_url));
    xml.push_str(&format!("    <language>{}</language>\n", config.language));
    xml.push_str(&format!(
        "    <atom:link href=\"{}/{}\" rel=\"self\" type=\"application/rss+xml\" />\n",
        site_url, config.feed_path
    ));

    for post in index.posts() {
        let link = url::full_url_for(config, &url::post_path(&post.slug));
        xml.push_str("    <item>\n");
        xml.push_str(&format!(
            "      <title>{}</title>\n",
            escape_xml(&post.title)
        ));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            escape_xml(&post.excerpt)
        ));
        xml.push_str(&format!("      <link>{}</link>\n", link));
        xml.push_str(&format!(
            "      <guid isPermaLink=\"true\">{}</guid>\n",
            link
        ));
        xml.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            date::rfc2822(&post.date)
        ));
        xml.push_str(&format!(
            "      <category>{}</category>\n",
            escape_xml(&post.category)
        ));
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");
    xml
}

/// Write the feed into the public directory
pub fn write(site: &Site, index: &PostIndex) -> Result<()> {
    let xml = build(&site.config, index);
    let path = site.public_dir.join(&site.config.feed_path);
    fs::write(&path, xml)?;
    tracing::info!("Generated {}", site.config.feed_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    fn index_with(posts: Vec<Post>) -> PostIndex {
        PostIndex::new(posts)
    }

    fn post(slug: &str, title: &str, excerpt: &str, category: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            excerpt: excerpt.to_string(),
            cover_image: String::new(),
            category: category.to_string(),
            tags: Vec::new(),
            reading_time: 1,
            content: String::new(),
        }
    }

    #[test]
    fn test_feed_empty() {
        let xml = build(&SiteConfig::default(), &index_with(Vec::new()));
        assert!(xml.contains(r#"<rss version="2.0""#));
        assert!(xml.contains("<channel>"));
        assert!(!xml.contains("<item>"));
    }

    #[test]
    fn test_feed_item_fields() {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        let index = index_with(vec![post("clay", "Clay Planters", "Slabs.", "Crafts")]);

        let xml = build(&config, &index);
        assert!(xml.contains("<title>Clay Planters</title>"));
        assert!(xml.contains("<description>Slabs.</description>"));
        assert!(xml.contains("<link>https://example.com/posts/clay/</link>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://example.com/posts/clay/</guid>"#
        ));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<category>Crafts</category>"));
    }

    #[test]
    fn test_feed_escapes_text() {
        let index = index_with(vec![post("q", "Tips & <Tricks>", "it's \"fine\"", "Q&A")]);
        let xml = build(&SiteConfig::default(), &index);
        assert!(xml.contains("<title>Tips &amp; &lt;Tricks&gt;</title>"));
        assert!(xml.contains("<description>it&apos;s &quot;fine&quot;</description>"));
        assert!(xml.contains("<category>Q&amp;A</category>"));
    }

    #[test]
    fn test_feed_lists_all_posts() {
        let posts: Vec<Post> = (0..25)
            .map(|i| post(&format!("p{}", i), &format!("P{}", i), "", "C"))
            .collect();
        let xml = build(&SiteConfig::default(), &index_with(posts));
        assert_eq!(xml.matches("<item>").count(), 25);
    }
}
