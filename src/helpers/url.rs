//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped in a path segment, matching encodeURIComponent
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'&')
    .add(b'+')
    .add(b'=');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "posts/clay-planters/") // -> "/posts/clay-planters/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://example.com/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode one path segment
pub fn encode_component(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// The URL path of a tag page: the tag lower-cased and percent-encoded
pub fn tag_path(config: &SiteConfig, tag: &str) -> String {
    format!(
        "{}/{}/",
        config.tag_dir.trim_matches('/'),
        encode_component(&tag.to_lowercase())
    )
}

/// The directory a tag page is written to (the decoded form of `tag_path`)
pub fn tag_dir_name(tag: &str) -> String {
    tag.to_lowercase()
}

/// The URL path of a category page, using the slugified category name
pub fn category_path(config: &SiteConfig, category: &str) -> String {
    format!(
        "{}/{}/",
        config.category_dir.trim_matches('/'),
        slug::slugify(category)
    )
}

/// The URL path of a post page
pub fn post_path(slug: &str) -> String {
    format!("posts/{}/", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, ""), "/");
        assert_eq!(url_for(&config, "blog/"), "/blog/");
        assert_eq!(url_for(&config, "/blog/"), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        assert_eq!(full_url_for(&config, "/blog/"), "https://example.com/blog/");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("polymer clay"), "polymer%20clay");
        assert_eq!(encode_component("rust"), "rust");
    }

    #[test]
    fn test_tag_path_lowercases_and_encodes() {
        let config = SiteConfig::default();
        assert_eq!(tag_path(&config, "Polymer Clay"), "tag/polymer%20clay/");
    }

    #[test]
    fn test_category_path_slugified() {
        let config = SiteConfig::default();
        assert_eq!(category_path(&config, "Web Dev"), "category/web-dev/");
    }
}
