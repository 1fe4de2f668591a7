//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title:
  en: My Blog
  ja: 私のブログ
subtitle:
  en: Notes and essays
  ja: ノートとエッセイ
author:
  name: John Doe
  photo: /photo.jpg
  bio: Writing about things.
menu:
  - label: Articles
    path: /
copyright: © All rights reserved.

# Languages
default_language: en
languages: [en, ja]

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public

# Index pages
posts_per_page: 4
pagination_dir: page
date_format: MMMM YYYY

# Browsers preferring this language are sent to its index
locale_redirect:
  enabled: true
  language: ja
  path: /ja
"#;

const HELLO_POST: &str = r#"---
title: Hello World
date: 2024-01-01T00:00:00Z
template: post
draft: false
language: en
slug: /posts/hello-world/
category: General
description: The first post of this blog.
---

Welcome to your new blog.
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A blog already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    fs::write(
        target_dir.join("content/posts/2024-01-01---hello-world.md"),
        HELLO_POST,
    )?;

    tracing::info!("Initialized blog in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Blog;

    #[test]
    fn test_init_creates_loadable_site() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.config.languages, vec!["en", "ja"]);
        assert_eq!(blog.config.title["ja"], "私のブログ");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].is_listed_in("en"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
