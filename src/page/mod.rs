//! Index page assembly
//!
//! Composes one index page from its [`PageContext`], the post window its
//! query resolved to, and the site metadata. Filtering and ordering are the
//! repository's job and never happen here.

use serde::Serialize;

use crate::config::SiteMetadata;
use crate::content::PostSummary;
use crate::pagination::PageContext;

/// A composed index page, in layout order
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub title: String,
    pub description: String,
    pub language: String,
    pub path: String,
    pub sidebar: Sidebar,
    pub feed: Vec<PostSummary>,
    pub pagination: PaginationControl,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub is_index: bool,
}

/// Previous/next affordances; a path is only present when its flag is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControl {
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page_path: Option<String>,
    pub next_page_path: Option<String>,
}

impl PaginationControl {
    pub fn new(ctx: &PageContext) -> Self {
        Self {
            has_prev_page: ctx.has_prev_page,
            has_next_page: ctx.has_next_page,
            prev_page_path: ctx.prev_page_path.clone().filter(|_| ctx.has_prev_page),
            next_page_path: ctx.next_page_path.clone().filter(|_| ctx.has_next_page),
        }
    }
}

/// `Page<N> - <site title>` past the first page, the bare site title otherwise
pub fn page_title(current_page: usize, site_title: &str) -> String {
    if current_page > 0 {
        format!("Page{} - {}", current_page, site_title)
    } else {
        site_title.to_string()
    }
}

impl IndexPage {
    /// Compose a page. A language missing from the metadata yields blank strings.
    pub fn assemble(ctx: &PageContext, feed: Vec<PostSummary>, metadata: &SiteMetadata) -> Self {
        let site_title = metadata.title_for(&ctx.language).unwrap_or_default();
        let description = metadata.subtitle_for(&ctx.language).unwrap_or_default();

        Self {
            title: page_title(ctx.current_page, site_title),
            description: description.to_string(),
            language: ctx.language.clone(),
            path: ctx.path.clone(),
            sidebar: Sidebar { is_index: true },
            feed,
            pagination: PaginationControl::new(ctx),
        }
    }
}
