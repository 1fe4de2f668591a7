//! Debounced file watching, shared by `generate --watch` and the dev server
//!
//! Watches the content directory, `static/` and `_config.yml`. Each burst of
//! changes triggers one full rebuild with a freshly loaded config.

use anyhow::{Context, Result};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Blog;

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Paths a rebuild depends on, with whether to watch them recursively
fn watched_paths(blog: &Blog) -> Vec<(PathBuf, RecursiveMode)> {
    [
        (blog.content_dir.clone(), RecursiveMode::Recursive),
        (blog.static_dir.clone(), RecursiveMode::Recursive),
        (blog.base_dir.join("_config.yml"), RecursiveMode::NonRecursive),
    ]
    .into_iter()
    .filter(|(path, _)| path.exists())
    .collect()
}

/// Editor swap files and VCS internals never trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let ignored_component = path.components().any(|c| {
        let c = c.as_os_str().to_string_lossy();
        c == ".git" || c == "node_modules"
    });
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    !ignored_component
        && name != ".DS_Store"
        && !name.ends_with('~')
        && !name.ends_with(".swp")
}

/// Block and regenerate the site after every burst of relevant changes.
///
/// `on_rebuild` runs after each successful generation. A failed build is
/// logged and watching continues.
pub fn watch_and_rebuild<F: FnMut()>(blog: &Blog, mut on_rebuild: F) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx).context("Failed to create file watcher")?;

    for (path, mode) in watched_paths(blog) {
        debouncer
            .watcher()
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
        tracing::debug!("Watching: {:?}", path);
    }
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        let events: Vec<DebouncedEvent> = match result {
            Ok(events) => events.into_iter().filter(|e| is_relevant(&e.path)).collect(),
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };
        if events.is_empty() {
            continue;
        }
        for event in &events {
            tracing::info!("File changed: {}", event.path.display());
        }

        match Blog::new(&blog.base_dir).and_then(|fresh| fresh.generate()) {
            Ok(()) => on_rebuild(),
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}
