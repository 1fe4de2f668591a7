//! Generate static files

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::query::PostCollection;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = PostCollection::new(ContentLoader::new(blog).load_posts()?);
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(blog)?;
    let pages = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} index pages in {:.2}s",
        pages,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Regenerate on every change until interrupted
pub async fn watch(blog: &Blog) -> Result<()> {
    let blog = blog.clone();
    tokio::task::spawn_blocking(move || crate::watch::watch_and_rebuild(&blog, || {})).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_generates_from_content_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        let posts_dir = blog.content_dir.join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(
            posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\ntemplate: post\n---\nBody\n",
        )
        .unwrap();

        run(&blog).unwrap();

        let html = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(html.contains(">Hello</a>"));
    }
}
