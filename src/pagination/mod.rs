//! Build-time pagination math for index pages

use serde::Serialize;

use crate::config::SiteConfig;
use crate::query::IndexQuery;

/// Position of one generated index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// 0-based; 0 is the unnumbered first page
    pub current_page: usize,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page_path: Option<String>,
    pub next_page_path: Option<String>,
    pub language: String,
    /// Site path this page is written to
    pub path: String,
    pub posts_limit: usize,
    pub posts_offset: usize,
}

impl PageContext {
    /// Query selecting this page's posts
    pub fn query(&self) -> IndexQuery {
        IndexQuery::new(self.posts_limit, self.posts_offset, self.language.clone())
    }
}

/// Number of index pages for `total` posts; an empty language still gets its first page
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Site path of index page `page` for a language prefix (`""` or `/ja`)
pub fn page_path(prefix: &str, pagination_dir: &str, page: usize) -> String {
    if page == 0 {
        if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.to_string()
        }
    } else {
        format!("{}/{}/{}", prefix, pagination_dir, page)
    }
}

/// Plan every index page of one language
pub fn plan_index_pages(config: &SiteConfig, language: &str, total: usize) -> Vec<PageContext> {
    let per_page = config.posts_per_page;
    let num_pages = page_count(total, per_page);
    let prefix = config.language_prefix(language);
    let dir = config.pagination_dir.as_str();

    (0..num_pages)
        .map(|i| {
            let has_prev_page = i > 0;
            let has_next_page = i + 1 < num_pages;
            PageContext {
                current_page: i,
                has_prev_page,
                has_next_page,
                prev_page_path: has_prev_page.then(|| page_path(&prefix, dir, i - 1)),
                next_page_path: has_next_page.then(|| page_path(&prefix, dir, i + 1)),
                language: language.to_string(),
                path: page_path(&prefix, dir, i),
                posts_limit: per_page,
                posts_offset: i * per_page,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(per_page: usize) -> SiteConfig {
        SiteConfig {
            languages: vec!["en".to_string(), "ja".to_string()],
            posts_per_page: per_page,
            ..Default::default()
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 4), 1);
        assert_eq!(page_count(4, 4), 1);
        assert_eq!(page_count(5, 4), 2);
        assert_eq!(page_count(9, 4), 3);
    }

    #[test]
    fn test_page_paths() {
        assert_eq!(page_path("", "page", 0), "/");
        assert_eq!(page_path("", "page", 2), "/page/2");
        assert_eq!(page_path("/ja", "page", 0), "/ja");
        assert_eq!(page_path("/ja", "page", 1), "/ja/page/1");
    }

    #[test]
    fn test_plan_default_language() {
        let pages = plan_index_pages(&config(4), "en", 10);
        assert_eq!(pages.len(), 3);

        let first = &pages[0];
        assert_eq!(first.current_page, 0);
        assert_eq!(first.path, "/");
        assert!(!first.has_prev_page);
        assert_eq!(first.prev_page_path, None);
        assert!(first.has_next_page);
        assert_eq!(first.next_page_path.as_deref(), Some("/page/1"));

        let middle = &pages[1];
        assert_eq!(middle.prev_page_path.as_deref(), Some("/"));
        assert_eq!(middle.next_page_path.as_deref(), Some("/page/2"));
        assert_eq!(middle.posts_offset, 4);

        let last = &pages[2];
        assert_eq!(last.path, "/page/2");
        assert!(!last.has_next_page);
        assert_eq!(last.next_page_path, None);
        assert_eq!(last.prev_page_path.as_deref(), Some("/page/1"));
        assert_eq!(last.query(), IndexQuery::new(4, 8, "en"));
    }

    #[test]
    fn test_plan_other_language() {
        let pages = plan_index_pages(&config(2), "ja", 3);
        let paths: Vec<_> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/ja", "/ja/page/1"]);
        assert_eq!(pages[1].prev_page_path.as_deref(), Some("/ja"));
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let pages = plan_index_pages(&config(3), "en", 11);
        for pair in pages.windows(2) {
            assert_eq!(
                pair[0].posts_offset + pair[0].posts_limit,
                pair[1].posts_offset
            );
        }
        let last = pages.last().unwrap();
        assert!(last.posts_offset < 11 && 11 <= last.posts_offset + last.posts_limit);
    }

    #[test]
    fn test_empty_language_gets_first_page() {
        let pages = plan_index_pages(&config(4), "ja", 0);
        assert_eq!(pages.len(), 1);
        assert!(!pages[0].has_prev_page);
        assert!(!pages[0].has_next_page);
    }
}
