//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a new post file under `<content_dir>/posts` and return its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    language: Option<&str>,
    draft: bool,
) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let language = language.unwrap_or(&blog.config.default_language);

    if !blog.config.languages.iter().any(|l| l == language) {
        anyhow::bail!(
            "Unknown language `{}`. Configured: {}",
            language,
            blog.config.languages.join(", ")
        );
    }

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title `{}` does not produce a usable file name", title);
    }

    let target_dir = blog.content_dir.join("posts");
    fs::create_dir_all(&target_dir)?;

    let file_name = if language == blog.config.default_language {
        format!("{}---{}.md", now.format("%Y-%m-%d"), slug)
    } else {
        format!("{}---{}.{}.md", now.format("%Y-%m-%d"), slug, language)
    };
    let file_path = target_dir.join(file_name);

    let scaffold_path = blog.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    let content = scaffold
        .replace("{{ title }}", &yaml_quote(title))
        .replace("{{ date }}", &now.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
        .replace("{{ draft }}", if draft { "true" } else { "false" })
        .replace("{{ language }}", language)
        .replace("{{ slug }}", &slug);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

const DEFAULT_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
template: post
draft: {{ draft }}
language: {{ language }}
slug: /posts/{{ slug }}/
category: ""
description: ""
tags: []
---
"#;

/// Double-quoted YAML scalar
fn yaml_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
