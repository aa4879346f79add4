//! Built-in page templates using the Tera template engine
//!
//! The whole theme is embedded in the binary, so a generated site needs no
//! template directory on disk.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded theme loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates registered
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The templates receive already-rendered HTML fragments, so
        // autoescaping would double-escape post bodies
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("blog.html", include_str!("theme/blog.html")),
            ("post.html", include_str!("theme/post.html")),
            ("category.html", include_str!("theme/category.html")),
            ("tag.html", include_str!("theme/tag.html")),
            ("tags.html", include_str!("theme/tags.html")),
            ("search.html", include_str!("theme/search.html")),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub root: String,
    pub feed_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub long_date: String,
    pub url: String,
    pub excerpt: String,
    pub cover_image: String,
    pub category: String,
    pub category_url: String,
    pub tags: Vec<TagLink>,
    pub reading_time: usize,
    /// Rendered HTML body; empty on listing cards
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub current: usize,
    pub total: usize,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        // add_raw_templates parses every embedded template eagerly
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_strip_html_filter() {
        let v = tera::Value::String("<p>hi <b>there</b></p>".into());
        let out = strip_html_filter(&v, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("hi there".into()));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let v = tera::Value::String("abcdef".into());
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(3));
        let out = truncate_chars_filter(&v, &args).unwrap();
        assert_eq!(out, tera::Value::String("abc…".into()));
    }
}
