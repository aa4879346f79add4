//! Filter, sort and paginate the post collection
//!
//! This is the same pipeline the search page runs in the browser over the
//! JSON snapshot; the generator reuses it to paginate the blog listing. It
//! is a pure function of `(posts, state)`: every invocation recomputes the
//! visible page, nothing is cached.

use crate::content::Post;

/// Default page size, matching the search page grid
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Sort direction for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// One browsing session's filter state.
///
/// Changing the search text, category selection or sort order resets
/// `current_page` to 1, matching the search page behavior.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub search_text: String,
    pub selected_categories: Vec<String>,
    pub sort_order: SortOrder,
    /// 1-based; out-of-range values are clamped by `run`
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_categories: Vec::new(),
            sort_order: SortOrder::Newest,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
    }

    /// Add the category to the selection, or remove it if already selected
    pub fn toggle_category(&mut self, category: &str) {
        match self.selected_categories.iter().position(|c| c == category) {
            Some(pos) => {
                self.selected_categories.remove(pos);
            }
            None => self.selected_categories.push(category.to_string()),
        }
        self.current_page = 1;
    }

    pub fn set_sort(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.current_page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }
}

/// One page of query results
#[derive(Debug)]
pub struct QueryPage<'a> {
    /// The visible slice, in sorted order
    pub results: Vec<&'a Post>,
    /// Number of posts matching the filters, before pagination
    pub total_results: usize,
    /// Always at least 1, even for an empty result set
    pub total_pages: usize,
    /// The page actually shown, after clamping
    pub current_page: usize,
}

/// Run the query pipeline: text filter, category filter, stable date
/// sort, then pagination.
pub fn run<'a>(posts: &'a [Post], state: &QueryState) -> QueryPage<'a> {
    let mut results: Vec<&Post> = posts.iter().collect();

    // 1. Text filter over title, excerpt and tags
    let needle = state.search_text.trim().to_lowercase();
    if !needle.is_empty() {
        results.retain(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.excerpt.to_lowercase().contains(&needle)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        });
    }

    // 2. Category filter, exact match as stored
    if !state.selected_categories.is_empty() {
        results.retain(|p| state.selected_categories.iter().any(|c| *c == p.category));
    }

    // 3. Stable sort by date; equal dates keep input order
    match state.sort_order {
        SortOrder::Newest => results.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => results.sort_by(|a, b| a.date.cmp(&b.date)),
    }

    // 4. Paginate, clamping the requested page into range
    let page_size = state.page_size.max(1);
    let total_results = results.len();
    let total_pages = std::cmp::max(1, total_results.div_ceil(page_size));
    let current_page = state.current_page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_results);
    let results = if start < total_results {
        results[start..end].to_vec()
    } else {
        Vec::new()
    };

    QueryPage {
        results,
        total_results,
        total_pages,
        current_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, date: &str, excerpt: &str, category: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            date: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            excerpt: excerpt.to_string(),
            cover_image: String::new(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: 1,
            content: String::new(),
        }
    }

    /// 13 posts, 5 in "Crafts", dated so that post-01 is oldest
    fn thirteen_posts() -> Vec<Post> {
        (1..=13)
            .map(|i| {
                let category = if i <= 5 { "Crafts" } else { "Web Dev" };
                post(
                    &format!("post-{:02}", i),
                    &format!("Post {:02}", i),
                    &format!("2024-01-{:02}", i),
                    "an excerpt",
                    category,
                    &[],
                )
            })
            .collect()
    }

    #[test]
    fn test_pagination_scenario() {
        let posts = thirteen_posts();
        let mut state = QueryState::default();

        let page1 = run(&posts, &state);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.total_results, 13);
        assert_eq!(page1.results.len(), 12);
        // Newest first
        assert_eq!(page1.results[0].slug, "post-13");

        state.set_page(2);
        let page2 = run(&posts, &state);
        assert_eq!(page2.results.len(), 1);
        assert_eq!(page2.results[0].slug, "post-01");
    }

    #[test]
    fn test_page_clamped_into_range() {
        let posts = thirteen_posts();
        let mut state = QueryState::default();
        state.set_page(99);

        let page = run(&posts, &state);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.results.len(), 1);

        state.set_page(0);
        let page = run(&posts, &state);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.results.len(), 12);
    }

    #[test]
    fn test_empty_dataset_has_one_page() {
        let page = run(&[], &QueryState::default());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_search_matches_excerpt_only_post() {
        let posts = vec![
            post("p", "Planters", "2024-01-01", "working with clay slabs", "Crafts", &[]),
            post("q", "Quilts", "2024-02-01", "fabric scraps", "Crafts", &["sewing"]),
            post("r", "Rust Tips", "2024-03-01", "lifetimes", "Web Dev", &["rust"]),
        ];
        let mut state = QueryState::default();
        state.set_search("clay");

        let page = run(&posts, &state);
        assert_eq!(page.total_results, 1);
        assert_eq!(page.results[0].slug, "p");
    }

    #[test]
    fn test_search_matches_title_and_tags() {
        let posts = vec![
            post("p", "Clay Planters", "2024-01-01", "", "Crafts", &[]),
            post("q", "Quilts", "2024-02-01", "", "Crafts", &["polymer clay"]),
            post("r", "Rust Tips", "2024-03-01", "", "Web Dev", &[]),
        ];
        let mut state = QueryState::default();
        state.set_search("CLAY");

        let page = run(&posts, &state);
        let slugs: Vec<_> = page.results.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["q", "p"]);
    }

    #[test]
    fn test_whitespace_search_is_noop() {
        let posts = thirteen_posts();
        let mut state = QueryState::default();
        state.set_search("   ");
        assert_eq!(run(&posts, &state).total_results, 13);
    }

    #[test]
    fn test_category_filter_exact() {
        let posts = thirteen_posts();
        let mut state = QueryState::default();
        state.toggle_category("Crafts");
        assert_eq!(run(&posts, &state).total_results, 5);

        // Case matters for the category filter, unlike the index views
        let mut state = QueryState::default();
        state.toggle_category("crafts");
        assert_eq!(run(&posts, &state).total_results, 0);

        // Absent category yields zero results
        let mut state = QueryState::default();
        state.toggle_category("Gardening");
        assert_eq!(run(&posts, &state).total_results, 0);
    }

    #[test]
    fn test_toggle_category_removes() {
        let mut state = QueryState::default();
        state.toggle_category("Crafts");
        state.toggle_category("Web Dev");
        state.toggle_category("Crafts");
        assert_eq!(state.selected_categories, vec!["Web Dev"]);
    }

    #[test]
    fn test_sort_order_reverses_distinct_dates() {
        let posts = thirteen_posts();
        let mut state = QueryState::default();
        state.page_size = 20;

        state.set_sort(SortOrder::Newest);
        let newest: Vec<_> = run(&posts, &state)
            .results
            .iter()
            .map(|p| p.slug.clone())
            .collect();

        state.set_sort(SortOrder::Oldest);
        let oldest: Vec<_> = run(&posts, &state)
            .results
            .iter()
            .map(|p| p.slug.clone())
            .collect();

        let mut reversed = newest.clone();
        reversed.reverse();
        assert_eq!(oldest, reversed);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let posts = vec![
            post("first", "A", "2024-01-01", "", "Crafts", &[]),
            post("second", "B", "2024-01-01", "", "Crafts", &[]),
            post("third", "C", "2024-01-01", "", "Crafts", &[]),
        ];
        let page = run(&posts, &QueryState::default());
        let slugs: Vec<_> = page.results.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_filters_reset_page() {
        let mut state = QueryState::default();
        state.set_page(3);
        state.set_search("clay");
        assert_eq!(state.current_page, 1);

        state.set_page(3);
        state.toggle_category("Crafts");
        assert_eq!(state.current_page, 1);

        state.set_page(3);
        state.set_sort(SortOrder::Oldest);
        assert_eq!(state.current_page, 1);
    }

    #[test]
    fn test_search_and_category_compose() {
        let posts = vec![
            post("p", "Planters", "2024-01-01", "clay slabs", "Crafts", &[]),
            post("q", "Clay Pipes", "2024-02-01", "plumbing", "Web Dev", &[]),
        ];
        let mut state = QueryState::default();
        state.set_search("clay");
        state.toggle_category("Web Dev");

        let page = run(&posts, &state);
        assert_eq!(page.total_results, 1);
        assert_eq!(page.results[0].slug, "q");
    }
}
