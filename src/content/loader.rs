//! Content loader - loads posts from the content directory

use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, Post};
use crate::Blog;

/// Loads posts from `<content_dir>/posts`
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load every post, in file-name order.
    ///
    /// Files that fail to parse are logged and skipped.
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        let posts_dir = self.blog.content_dir.join("posts");
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, _body) = FrontMatter::parse(&content)?;

        let config = &self.blog.config;

        let date = match fm.parse_date() {
            Some(date) => date,
            None => {
                let modified = fs::metadata(path)
                    .and_then(|m| m.modified())
                    .map_err(|source| ContentError::Io {
                        path: path.to_path_buf(),
                        source,
                    })?;
                chrono::DateTime::<Local>::from(modified)
            }
        };

        let stem = post_stem(path);
        let title = fm.title.clone().unwrap_or_else(|| stem.clone());

        let language = fm
            .language
            .clone()
            .unwrap_or_else(|| config.default_language.clone());
        let prefix = config.language_prefix(&language);

        let slug = match fm.slug.as_deref() {
            Some(custom) => format!("{}/{}", prefix, custom.trim_matches('/')),
            None => format!("{}/posts/{}", prefix, slug::slugify(&stem)),
        };

        let category = fm.category.clone().unwrap_or_default();
        let category_slug = if category.is_empty() {
            String::new()
        } else {
            format!("{}/category/{}/", prefix, slug::slugify(&category))
        };

        let source = path
            .strip_prefix(&self.blog.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(title, date, language, source);
        post.slug = slug;
        post.category = category;
        post.category_slug = category_slug;
        post.description = fm.description.unwrap_or_default();
        post.template = fm.template;
        post.draft = fm.draft.unwrap_or(false);
        post.tags = fm.tags;
        post.full_source = path.to_path_buf();

        Ok(post)
    }
}

/// File stem, or the parent directory name for `index.md`
fn post_stem(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("untitled");
    if stem == "index" {
        if let Some(dir) = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
        {
            return dir.to_string();
        }
    }
    stem.to_string()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::path::PathBuf;

    fn blog_in(dir: &Path) -> Blog {
        let config = SiteConfig {
            languages: vec!["en".to_string(), "ja".to_string()],
            ..Default::default()
        };
        Blog::with_config(dir, config)
    }

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_post_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog_in(tmp.path());
        let path = write(
            &blog.content_dir,
            "posts/2024-01-15---Hello/index.md",
            "---\ntitle: Hello\ndate: 2024-01-15\ntemplate: post\ncategory: Design Inspiration\ndescription: First\n---\nBody\n",
        );

        let post = ContentLoader::new(&blog).load_post(&path).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.language, "en");
        assert_eq!(post.slug, "/posts/2024-01-15-hello");
        assert_eq!(post.category_slug, "/category/design-inspiration/");
        assert_eq!(post.description, "First");
        assert_eq!(post.source, "posts/2024-01-15---Hello/index.md");
    }

    #[test]
    fn test_load_post_custom_slug_and_language() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog_in(tmp.path());
        let path = write(
            &blog.content_dir,
            "posts/konnichiwa.md",
            "---\ntitle: こんにちは\ndate: 2024-02-01\ntemplate: post\nlanguage: ja\nslug: /posts/hello-ja/\ncategory: Life\n---\n",
        );

        let post = ContentLoader::new(&blog).load_post(&path).unwrap();
        assert_eq!(post.language, "ja");
        assert_eq!(post.slug, "/ja/posts/hello-ja");
        assert_eq!(post.category_slug, "/ja/category/life/");
    }

    #[test]
    fn test_load_posts_skips_broken_files() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog_in(tmp.path());
        write(
            &blog.content_dir,
            "posts/a.md",
            "---\ntitle: A\ndate: 2024-01-01\ntemplate: post\n---\n",
        );
        write(
            &blog.content_dir,
            "posts/b.md",
            "---\ntitle: [broken\n---\n",
        );
        write(&blog.content_dir, "posts/notes.txt", "not markdown");

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "A");
    }

    #[test]
    fn test_empty_draft_key_is_not_a_draft() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog_in(tmp.path());
        write(
            &blog.content_dir,
            "posts/a.md",
            "---\ntitle: A\ndate: 2024-01-01\ntemplate: post\ndraft:\n---\n",
        );
        write(
            &blog.content_dir,
            "posts/b.md",
            "---\ntitle: B\ndate: 2024-01-02\ntemplate: post\ndraft: ~\n---\n",
        );

        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| !p.draft && p.is_listed_in("en")));
    }

    #[test]
    fn test_missing_posts_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = blog_in(tmp.path());
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());
    }
}
