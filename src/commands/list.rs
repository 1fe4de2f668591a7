//! List index pages and the posts each one shows

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::pagination;
use crate::query::{PostCollection, PostRepository};
use crate::Blog;

/// Print every planned index page, optionally for one language only
pub fn run(blog: &Blog, language: Option<&str>) -> Result<()> {
    let posts = PostCollection::new(ContentLoader::new(blog).load_posts()?);

    let languages: Vec<&str> = match language {
        Some(lang) => {
            if !blog.config.languages.iter().any(|l| l == lang) {
                anyhow::bail!(
                    "Unknown language: {}. Available: {}",
                    lang,
                    blog.config.languages.join(", ")
                );
            }
            vec![lang]
        }
        None => blog.config.languages.iter().map(String::as_str).collect(),
    };

    for lang in languages {
        let total = posts.count_index_posts(lang);
        let pages = pagination::plan_index_pages(&blog.config, lang, total);
        println!("[{}] {} posts, {} pages", lang, total, pages.len());

        for ctx in &pages {
            println!("  {}", ctx.path);
            for post in posts.index_posts(&ctx.query())? {
                println!("    {} - {}", post.date.format("%Y-%m-%d"), post.title);
            }
        }
    }

    let unlisted = unlisted_count(blog, &posts);
    if unlisted > 0 {
        println!(
            "{} of {} posts are not on any index page",
            unlisted,
            posts.len()
        );
    }

    Ok(())
}

/// Drafts, pages and posts in unconfigured languages
fn unlisted_count(blog: &Blog, posts: &PostCollection) -> usize {
    posts
        .iter()
        .filter(|p| !blog.config.languages.iter().any(|l| p.is_listed_in(l)))
        .count()
}
