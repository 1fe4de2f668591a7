//! Post records

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Template kind of entries listed on index pages
pub const POST_TEMPLATE: &str = "post";

/// A blog post as loaded from the content directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// URL path of the post
    pub slug: String,

    /// Category name
    pub category: String,

    /// URL path of the category listing
    pub category_slug: String,

    /// Short description shown in feeds
    pub description: String,

    /// Template kind (`post`, `page`, ...)
    pub template: Option<String>,

    /// Drafts never appear on index pages
    pub draft: bool,

    /// Language code
    pub language: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Source file path (relative to the content dir)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, language: String, source: String) -> Self {
        let slug = format!("/posts/{}", slug::slugify(&title));
        Self {
            title,
            date,
            slug,
            category: String::new(),
            category_slug: String::new(),
            description: String::new(),
            template: Some(POST_TEMPLATE.to_string()),
            draft: false,
            language,
            tags: Vec::new(),
            source: source.clone(),
            full_source: PathBuf::from(&source),
        }
    }

    /// Whether this post belongs on the index pages of `language`
    pub fn is_listed_in(&self, language: &str) -> bool {
        self.template.as_deref() == Some(POST_TEMPLATE) && !self.draft && self.language == language
    }

    /// Trimmed projection used by feeds
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            category_slug: self.category_slug.clone(),
            title: self.title.clone(),
            date: self.date,
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }
}

/// One entry of an index page feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub category_slug: String,
    pub title: String,
    pub date: DateTime<Local>,
    pub category: String,
    pub description: String,
}
