//! Generator module - writes the static site into the public directory

pub mod rss;
pub mod search_index;
pub mod sitemap;

use anyhow::Result;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post, PostIndex};
use crate::helpers::{date, url};
use crate::query::{self, QueryState};
use crate::templates::{PaginationData, PostData, SiteData, TagLink, TemplateRenderer};
use crate::Site;

/// Number of posts shown on the home page
const HOME_POST_COUNT: usize = 3;

/// Number of related posts listed under an article
const RELATED_POST_COUNT: usize = 3;

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
        })
    }

    /// Generate the entire site from a built post index
    pub fn generate(&self, index: &PostIndex) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_source_assets()?;

        let site_data = self.site_data();

        self.generate_home(index, &site_data)?;
        self.generate_blog_pages(index, &site_data)?;
        self.generate_post_pages(index, &site_data)?;
        self.generate_category_pages(index, &site_data)?;
        self.generate_tag_pages(index, &site_data)?;
        self.generate_tags_page(index, &site_data)?;
        self.generate_search_page(&site_data)?;

        rss::write(&self.site, index)?;
        sitemap::write(&self.site, index)?;
        search_index::write(&self.site, index)?;

        Ok(())
    }

    fn site_data(&self) -> SiteData {
        let config = &self.site.config;
        SiteData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            root: url::url_for(config, ""),
            feed_path: config.feed_path.clone(),
        }
    }

    /// Template data for one post; `content_html` is empty on listing cards
    fn post_data(&self, post: &Post, content_html: String) -> PostData {
        let config = &self.site.config;
        PostData {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: date::ymd(&post.date),
            long_date: date::long_date(&post.date),
            url: url::url_for(config, &url::post_path(&post.slug)),
            excerpt: post.excerpt.clone(),
            cover_image: post.cover_image.clone(),
            category: post.category.clone(),
            category_url: url::url_for(config, &url::category_path(config, &post.category)),
            tags: post
                .tags
                .iter()
                .map(|t| TagLink {
                    name: t.clone(),
                    url: url::url_for(config, &url::tag_path(config, t)),
                    count: 0,
                })
                .collect(),
            reading_time: post.reading_time,
            content: content_html,
        }
    }

    fn base_context(&self, site_data: &SiteData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context
    }

    /// Write `html` to `<public>/<rel>/index.html`
    fn write_page(&self, rel: &str, html: &str) -> Result<()> {
        let dir = self.site.public_dir.join(rel);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("index.html"), html)?;
        Ok(())
    }

    /// Home page with the latest posts
    fn generate_home(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        let latest: Vec<PostData> = index
            .latest(HOME_POST_COUNT)
            .iter()
            .map(|p| self.post_data(p, String::new()))
            .collect();

        let mut context = self.base_context(site_data);
        context.insert("latest", &latest);

        let html = self.renderer.render("index.html", &context)?;
        self.write_page("", &html)
    }

    /// Paginated blog listing, driven by the query pipeline
    fn generate_blog_pages(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        let config = &self.site.config;
        let mut state = QueryState {
            page_size: config.per_page,
            ..QueryState::default()
        };

        let mut page_number = 1;
        loop {
            state.set_page(page_number);
            let page = query::run(index.posts(), &state);

            let posts: Vec<PostData> = page
                .results
                .iter()
                .map(|p| self.post_data(p, String::new()))
                .collect();

            let page_url = |n: usize| {
                if n == 1 {
                    url::url_for(config, "blog/")
                } else {
                    url::url_for(config, &format!("blog/page/{}/", n))
                }
            };

            let pagination = PaginationData {
                current: page_number,
                total: page.total_pages,
                prev_url: (page_number > 1).then(|| page_url(page_number - 1)),
                next_url: (page_number < page.total_pages).then(|| page_url(page_number + 1)),
            };

            let mut context = self.base_context(site_data);
            context.insert("posts", &posts);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("blog.html", &context)?;
            let rel = if page_number == 1 {
                "blog".to_string()
            } else {
                format!("blog/page/{}", page_number)
            };
            self.write_page(&rel, &html)?;

            if page_number >= page.total_pages {
                break;
            }
            page_number += 1;
        }

        tracing::info!("Generated blog listing");
        Ok(())
    }

    /// One page per post
    fn generate_post_pages(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        for post in index.posts() {
            let content_html = self.markdown.render(&post.content)?;
            let post_data = self.post_data(post, content_html);

            let related: Vec<PostData> = index
                .related_posts(&post.slug, RELATED_POST_COUNT)
                .iter()
                .map(|p| self.post_data(p, String::new()))
                .collect();

            let mut context = self.base_context(site_data);
            context.insert("post", &post_data);
            context.insert("related", &related);

            let html = self.renderer.render("post.html", &context)?;
            self.write_page(&format!("posts/{}", post.slug), &html)?;
        }

        tracing::info!("Generated {} post pages", index.len());
        Ok(())
    }

    /// One page per category
    fn generate_category_pages(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        let config = &self.site.config;
        for category in index.categories() {
            let posts: Vec<PostData> = index
                .posts_by_category(&category)
                .iter()
                .map(|p| self.post_data(p, String::new()))
                .collect();

            let mut context = self.base_context(site_data);
            context.insert("category", &category);
            context.insert("posts", &posts);

            let html = self.renderer.render("category.html", &context)?;
            let slug = slug::slugify(&category);
            if slug.is_empty() {
                continue;
            }
            self.write_page(&format!("{}/{}", config.category_dir, slug), &html)?;
        }

        tracing::info!("Generated {} category pages", index.categories().len());
        Ok(())
    }

    /// One page per tag
    fn generate_tag_pages(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        let config = &self.site.config;
        for tag_count in index.tags() {
            let tag = &tag_count.tag;
            if tag.trim().is_empty() {
                continue;
            }

            let posts: Vec<PostData> = index
                .posts_by_tag(tag)
                .iter()
                .map(|p| self.post_data(p, String::new()))
                .collect();

            let mut context = self.base_context(site_data);
            context.insert("tag", tag);
            context.insert("posts", &posts);

            let html = self.renderer.render("tag.html", &context)?;
            self.write_page(
                &format!("{}/{}", config.tag_dir, url::tag_dir_name(tag)),
                &html,
            )?;
        }

        tracing::info!("Generated {} tag pages", index.tags().len());
        Ok(())
    }

    /// Tag overview page with counts
    fn generate_tags_page(&self, index: &PostIndex, site_data: &SiteData) -> Result<()> {
        let config = &self.site.config;
        let tags: Vec<TagLink> = index
            .tags()
            .into_iter()
            .map(|tc| TagLink {
                url: url::url_for(config, &url::tag_path(config, &tc.tag)),
                name: tc.tag,
                count: tc.count,
            })
            .collect();

        let mut context = self.base_context(site_data);
        context.insert("tags", &tags);

        let html = self.renderer.render("tags.html", &context)?;
        self.write_page("tags", &html)
    }

    /// The client-side search page
    fn generate_search_page(&self, site_data: &SiteData) -> Result<()> {
        let mut context = self.base_context(site_data);
        context.insert("per_page", &self.site.config.per_page);

        let html = self.renderer.render("search.html", &context)?;
        self.write_page("search", &html)
    }

    /// Copy non-markdown files under the source dir through as assets
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("mdx")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

/// Escape XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
