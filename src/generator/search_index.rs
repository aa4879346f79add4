//! Search index export
//!
//! A JSON array of post metadata (everything except the body), the
//! snapshot the search page fetches and queries client-side.

use anyhow::Result;
use std::fs;

use crate::content::PostIndex;
use crate::Site;

/// Serialize the metadata projection of the collection
pub fn build(index: &PostIndex) -> Result<String> {
    Ok(serde_json::to_string_pretty(&index.metadata())?)
}

/// Write search-index.json into the public directory
pub fn write(site: &Site, index: &PostIndex) -> Result<()> {
    let json = build(index)?;
    fs::write(site.public_dir.join("search-index.json"), json)?;
    tracing::info!("Generated search-index.json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;

    #[test]
    fn test_search_index_shape() {
        let index = PostIndex::new(vec![Post {
            slug: "clay-planters".to_string(),
            title: "Clay Planters".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            excerpt: "Slabs.".to_string(),
            cover_image: "/images/blog/default.svg".to_string(),
            category: "Crafts".to_string(),
            tags: vec!["pottery".to_string()],
            reading_time: 2,
            content: "the whole body".to_string(),
        }]);

        let json = build(&index).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entry = &value.as_array().unwrap()[0];

        assert_eq!(entry["slug"], "clay-planters");
        assert_eq!(entry["date"], "2024-01-15");
        assert_eq!(entry["coverImage"], "/images/blog/default.svg");
        assert_eq!(entry["readingTime"], 2);
        // The body never leaves the build
        assert!(entry.get("content").is_none());
        assert!(!json.contains("the whole body"));
    }

    #[test]
    fn test_empty_index_is_empty_array() {
        let json = build(&PostIndex::new(Vec::new())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }
}
