//! Content module - front-matter parsing and post records

mod frontmatter;
pub mod loader;
mod post;

use std::path::PathBuf;
use thiserror::Error;

pub use frontmatter::FrontMatter;
pub use post::{Post, PostSummary, POST_TEMPLATE};

/// Errors raised while reading content files
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter: {0}")]
    FrontMatter(String),
}
