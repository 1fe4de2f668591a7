//! Site metadata resolved once from the configuration

use indexmap::IndexMap;
use serde::Serialize;

use super::site::{AuthorConfig, MenuItem, SiteConfig};

/// Language-keyed display strings shared by every rendered page.
///
/// Built once per build and handed to the page assembler by reference;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SiteMetadata {
    pub title: IndexMap<String, String>,
    pub subtitle: IndexMap<String, String>,
    pub author: AuthorConfig,
    pub menu: Vec<MenuItem>,
    pub copyright: String,
}

impl SiteMetadata {
    /// Resolve metadata from the loaded configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            author: config.author.clone(),
            menu: config.menu.clone(),
            copyright: config.copyright.clone(),
        }
    }

    /// Site title for a language, if configured
    pub fn title_for(&self, language: &str) -> Option<&str> {
        self.title.get(language).map(String::as_str)
    }

    /// Site subtitle for a language, if configured
    pub fn subtitle_for(&self, language: &str) -> Option<&str> {
        self.subtitle.get(language).map(String::as_str)
    }

    /// Languages that lack a title or subtitle entry
    pub fn missing_languages<'a>(&self, languages: &'a [String]) -> Vec<&'a str> {
        languages
            .iter()
            .filter(|lang| self.title_for(lang).is_none() || self.subtitle_for(lang).is_none())
            .map(String::as_str)
            .collect()
    }
}
