//! Index queries over the loaded post collection
//!
//! Index pages never look at the post collection directly. Each page is
//! planned with an [`IndexQuery`] (limit, offset, language) and receives
//! the ordered [`PostSummary`] window a [`PostRepository`] resolves for it.

use serde::Serialize;
use thiserror::Error;

use crate::content::{Post, PostSummary};

/// Query errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("posts_limit must be a positive integer")]
    InvalidLimit,
}

/// One page worth of index entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexQuery {
    pub posts_limit: usize,
    pub posts_offset: usize,
    pub language: String,
}

impl IndexQuery {
    pub fn new(posts_limit: usize, posts_offset: usize, language: impl Into<String>) -> Self {
        Self {
            posts_limit,
            posts_offset,
            language: language.into(),
        }
    }
}

/// Source of index page entries
pub trait PostRepository {
    /// Listed posts of the query language, newest first, windowed by offset/limit
    fn index_posts(&self, query: &IndexQuery) -> Result<Vec<PostSummary>, QueryError>;

    /// Number of listed posts of a language, used for page math
    fn count_index_posts(&self, language: &str) -> usize;
}

/// In-memory post collection
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    /// Listed posts of a language sorted newest first.
    /// Equal dates keep collection order.
    fn listed(&self, language: &str) -> Vec<&Post> {
        let mut listed: Vec<&Post> = self
            .posts
            .iter()
            .filter(|p| p.is_listed_in(language))
            .collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date));
        listed
    }
}

impl PostRepository for PostCollection {
    fn index_posts(&self, query: &IndexQuery) -> Result<Vec<PostSummary>, QueryError> {
        if query.posts_limit == 0 {
            return Err(QueryError::InvalidLimit);
        }

        Ok(self
            .listed(&query.language)
            .into_iter()
            .skip(query.posts_offset)
            .take(query.posts_limit)
            .map(Post::summary)
            .collect())
    }

    fn count_index_posts(&self, language: &str) -> usize {
        self.posts
            .iter()
            .filter(|p| p.is_listed_in(language))
            .count()
    }
}
