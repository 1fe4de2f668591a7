//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    /// Site title keyed by language code
    pub title: IndexMap<String, String>,
    /// Site subtitle keyed by language code
    pub subtitle: IndexMap<String, String>,
    pub author: AuthorConfig,
    pub menu: Vec<MenuItem>,
    pub copyright: String,

    // Languages
    pub default_language: String,
    pub languages: Vec<String>,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Index pages
    pub posts_per_page: usize,
    pub pagination_dir: String,
    pub date_format: String,

    pub locale_redirect: LocaleRedirectConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut title = IndexMap::new();
        title.insert("en".to_string(), "Blog".to_string());
        let mut subtitle = IndexMap::new();
        subtitle.insert("en".to_string(), String::new());

        Self {
            title,
            subtitle,
            author: AuthorConfig::default(),
            menu: Vec::new(),
            copyright: String::new(),

            default_language: "en".to_string(),
            languages: vec!["en".to_string()],

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            posts_per_page: 4,
            pagination_dir: "page".to_string(),
            date_format: "MMMM YYYY".to_string(),

            locale_redirect: LocaleRedirectConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the page math cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.posts_per_page == 0 {
            anyhow::bail!("posts_per_page must be a positive integer");
        }
        if !self.languages.contains(&self.default_language) {
            anyhow::bail!(
                "default_language `{}` is not listed in languages",
                self.default_language
            );
        }
        Ok(())
    }

    /// URL prefix for a language's pages; the default language lives at the root
    pub fn language_prefix(&self, language: &str) -> String {
        if language == self.default_language {
            String::new()
        } else {
            format!("/{}", language)
        }
    }
}

/// Author shown in the sidebar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub photo: String,
    pub bio: String,
}

/// Sidebar menu entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub path: String,
}

/// Browser-language redirect emitted into index pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleRedirectConfig {
    pub enabled: bool,
    pub language: String,
    pub path: String,
}

impl Default for LocaleRedirectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "ja".to_string(),
            path: "/ja".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.posts_per_page, 4);
        assert_eq!(config.locale_redirect.language, "ja");
        assert_eq!(config.locale_redirect.path, "/ja");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title:
  en: My Blog
  ja: 私のブログ
subtitle:
  en: Notes
default_language: en
languages: [en, ja]
posts_per_page: 2
menu:
  - label: About
    path: /about
locale_redirect:
  enabled: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title["ja"], "私のブログ");
        assert_eq!(config.subtitle.get("ja"), None);
        assert_eq!(config.languages, vec!["en", "ja"]);
        assert_eq!(config.posts_per_page, 2);
        assert_eq!(config.menu[0].label, "About");
        assert!(!config.locale_redirect.enabled);
        assert_eq!(config.locale_redirect.path, "/ja");
    }

    #[test]
    fn test_omitted_sections_use_defaults() {
        let config: SiteConfig = serde_yaml::from_str("title:\n  en: Blog\n").unwrap();
        assert!(config.menu.is_empty());
        assert!(config.locale_redirect.enabled);
        assert_eq!(config.locale_redirect.language, "ja");
        assert_eq!(config.posts_per_page, 4);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = SiteConfig {
            posts_per_page: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_default_language() {
        let config = SiteConfig {
            default_language: "fr".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_language_prefix() {
        let config = SiteConfig {
            languages: vec!["en".to_string(), "ja".to_string()],
            ..Default::default()
        };
        assert_eq!(config.language_prefix("en"), "");
        assert_eq!(config.language_prefix("ja"), "/ja");
    }
}
