//! Generator module - writes the paginated index pages of every language

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use tera::Context;
use walkdir::WalkDir;

use crate::config::SiteMetadata;
use crate::helpers;
use crate::page::IndexPage;
use crate::pagination::{self, PageContext};
use crate::query::PostRepository;
use crate::redirect::{self, LocaleRedirect};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Static index generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
    metadata: SiteMetadata,
    redirect_script: Option<String>,
}

impl Generator {
    /// Create a new generator; site metadata is resolved here, once
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new(&blog.config.root)?;
        let metadata = SiteMetadata::from_config(&blog.config);
        let redirect_script = LocaleRedirect::from_config(&blog.config.locale_redirect)
            .map(|r| LocaleRedirect {
                target: helpers::url_for(&blog.config.root, &r.target),
                ..r
            })
            .map(|r| redirect::client_script(&r));

        Ok(Self {
            blog: blog.clone(),
            renderer,
            metadata,
            redirect_script,
        })
    }

    /// Generate the index pages of every configured language.
    /// Returns the number of pages written.
    pub fn generate(&self, posts: &dyn PostRepository) -> Result<usize> {
        fs::create_dir_all(&self.blog.public_dir)?;
        self.copy_static_assets()?;

        for language in self.metadata.missing_languages(&self.blog.config.languages) {
            tracing::warn!(
                "No title or subtitle configured for language `{}`; index pages will render them blank",
                language
            );
        }

        let mut written = 0;
        for language in &self.blog.config.languages {
            let total = posts.count_index_posts(language);
            let pages = pagination::plan_index_pages(&self.blog.config, language, total);
            tracing::debug!(
                "Language {}: {} posts over {} index pages",
                language,
                total,
                pages.len()
            );

            for ctx in &pages {
                self.generate_index_page(ctx, posts)?;
                written += 1;
            }
        }

        Ok(written)
    }

    /// Resolve, assemble, render and write one index page
    fn generate_index_page(&self, ctx: &PageContext, posts: &dyn PostRepository) -> Result<()> {
        let feed = posts.index_posts(&ctx.query())?;
        let page = IndexPage::assemble(ctx, feed, &self.metadata);
        let html = self.render_index(&page)?;

        let output_path = self.output_path(&page.path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Render an assembled page to HTML
    pub fn render_index(&self, page: &IndexPage) -> Result<String> {
        let config = &self.blog.config;
        let home_path = pagination::page_path(
            &config.language_prefix(&page.language),
            &config.pagination_dir,
            0,
        );

        let mut context = Context::new();
        context.insert("page", page);
        context.insert("site", &self.metadata);
        context.insert("date_format", &config.date_format);
        context.insert("home_path", &home_path);
        context.insert(
            "canonical_url",
            &helpers::full_url_for(&config.url, &config.root, &page.path),
        );
        context.insert("redirect_script", &self.redirect_script);

        self.renderer.render("index.html", &context)
    }

    /// `public/<path>/index.html`
    fn output_path(&self, path: &str) -> PathBuf {
        let relative = path.trim_matches('/');
        if relative.is_empty() {
            self.blog.public_dir.join("index.html")
        } else {
            self.blog.public_dir.join(relative).join("index.html")
        }
    }

    /// Copy `static/` (photos, css) into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.blog.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Post;
    use crate::query::PostCollection;
    use chrono::{Local, TimeZone};

    fn blog(dir: &std::path::Path) -> Blog {
        let yaml = r#"
title:
  en: My Blog
  ja: 私のブログ
subtitle:
  en: Thoughts
  ja: 考え
languages: [en, ja]
posts_per_page: 2
author:
  name: Jane <Doe>
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        Blog::with_config(dir, config)
    }

    fn posts() -> PostCollection {
        let post = |title: &str, day: u32, lang: &str| {
            let date = Local.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
            let mut p = Post::new(title.to_string(), date, lang.to_string(), String::new());
            if lang == "ja" {
                p.slug = format!("/ja{}", p.slug);
            }
            p
        };
        PostCollection::new(vec![
            post("One", 1, "en"),
            post("Two", 2, "en"),
            post("Three", 3, "en"),
            post("Ichi", 1, "ja"),
        ])
    }

    #[test]
    fn test_writes_pages_per_language() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog(tmp.path());
        let generator = Generator::new(&blog).unwrap();

        let written = generator.generate(&posts()).unwrap();
        assert_eq!(written, 3);
        assert!(blog.public_dir.join("index.html").exists());
        assert!(blog.public_dir.join("page/1/index.html").exists());
        assert!(blog.public_dir.join("ja/index.html").exists());
        assert!(!blog.public_dir.join("page/2/index.html").exists());
    }

    #[test]
    fn test_rendered_index_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog(tmp.path());
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&posts()).unwrap();

        let first = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(first.contains("<title>My Blog</title>"));
        assert!(first.contains(r#"content="Thoughts""#));
        assert!(first.contains("<h1 class=\"author__title\">"));
        assert!(first.contains("Jane &lt;Doe&gt;"));
        assert!(first.contains(r#"href="/posts/three""#));
        assert!(first.contains(r#"href="/page/1" class="pagination__next-link""#));
        assert!(first.contains("pagination__prev-link--disable"));
        assert!(first.contains("May 2024"));
        assert!(first.contains(r#"language === "ja""#));

        let second = fs::read_to_string(blog.public_dir.join("page/1/index.html")).unwrap();
        assert!(second.contains("<title>Page1 - My Blog</title>"));
        assert!(second.contains(r#"href="/" class="pagination__prev-link""#));
        assert!(second.contains("pagination__next-link--disable"));
        assert!(second.contains(">One</a>"));
        assert!(!second.contains(">Three</a>"));

        let ja = fs::read_to_string(blog.public_dir.join("ja/index.html")).unwrap();
        assert!(ja.contains("<title>私のブログ</title>"));
        assert!(ja.contains(r#"<html lang="ja">"#));
    }

    #[test]
    fn test_redirect_script_can_be_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let mut blog = blog(tmp.path());
        blog.config.locale_redirect.enabled = false;
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&posts()).unwrap();

        let html = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_redirect_target_follows_site_root() {
        let tmp = tempfile::tempdir().unwrap();
        let mut blog = blog(tmp.path());
        blog.config.root = "/blog/".to_string();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&posts()).unwrap();

        let ja = fs::read_to_string(blog.public_dir.join("ja/index.html")).unwrap();
        assert!(ja.contains(r#"href="/blog/ja""#));
        assert!(ja.contains(r#"var target = "/blog/ja";"#));
        assert!(!ja.contains(r#"var target = "/ja";"#));
    }

    #[test]
    fn test_copies_static_assets() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog(tmp.path());
        fs::create_dir_all(blog.static_dir.join("media")).unwrap();
        fs::write(blog.static_dir.join("media/photo.jpg"), b"jpg").unwrap();

        Generator::new(&blog).unwrap().generate(&posts()).unwrap();
        assert!(blog.public_dir.join("media/photo.jpg").exists());
    }
}
